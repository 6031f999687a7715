//! Marching-squares meshing of cave grids
//!
//! Pipeline:
//! 1. `SquareGrid::build` turns grid cells into control nodes and closes a
//!    square over each 2x2 block, classifying it into one of 16 cases.
//! 2. `triangulate` looks up each case's contour and fans it into triangles,
//!    sharing vertices between squares that touch the same node.

pub mod cases;
pub mod mesh;
pub mod nodes;

pub use cases::{contour, Role, CONTOURS};
pub use mesh::{triangulate, Mesh, MeshStats};
pub use nodes::{node_capacity, ControlNode, Node, NodeId, Square, SquareGrid, Vec3};
