//! Dual grid for marching squares
//!
//! Every grid cell becomes a control node. Each control node also owns two
//! edge nodes, the midpoints toward its upper (+z) and right (+x)
//! neighbours. A square borrows its four edge nodes from its corners, so
//! neighbouring squares refer to the same midpoint through the same
//! `NodeId` and end up sharing a single mesh vertex.

use bytemuck::{Pod, Zeroable};

use crate::cave::CaveGrid;
use crate::tilemap::Tilemap;

/// World-space position. The cave lies in the XZ plane with y = 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// Grid "up", toward increasing y in grid coordinates.
    pub const FORWARD: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };
    pub const RIGHT: Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Index of a node in the [`SquareGrid`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// A point that can become a mesh vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub position: Vec3,
    /// Output vertex index, assigned the first time a square references
    /// this node during triangulation.
    pub vertex_index: Option<u32>,
}

impl Node {
    fn new(position: Vec3) -> Self {
        Self { position, vertex_index: None }
    }
}

/// A node sitting on a grid cell, carrying that cell's wall flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlNode {
    pub node: NodeId,
    pub active: bool,
    /// Midpoint toward the cell at y + 1
    pub above: NodeId,
    /// Midpoint toward the cell at x + 1
    pub right: NodeId,
}

/// A 2x2 block of control nodes plus the four edge midpoints between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square {
    pub top_left: NodeId,
    pub top_right: NodeId,
    pub bottom_right: NodeId,
    pub bottom_left: NodeId,
    pub centre_top: NodeId,
    pub centre_right: NodeId,
    pub centre_bottom: NodeId,
    pub centre_left: NodeId,
    /// Active corners as bits: top-left 8, top-right 4, bottom-right 2, bottom-left 1.
    pub configuration: u8,
}

impl Square {
    fn new(top_left: &ControlNode, top_right: &ControlNode, bottom_right: &ControlNode, bottom_left: &ControlNode) -> Self {
        Self {
            top_left: top_left.node,
            top_right: top_right.node,
            bottom_right: bottom_right.node,
            bottom_left: bottom_left.node,
            centre_top: top_left.right,
            centre_right: bottom_right.above,
            centre_bottom: bottom_left.right,
            centre_left: bottom_left.above,
            configuration: configuration(top_left.active, top_right.active, bottom_right.active, bottom_left.active),
        }
    }
}

/// Marching-squares case for a square's four corner flags.
pub fn configuration(top_left: bool, top_right: bool, bottom_right: bool, bottom_left: bool) -> u8 {
    (top_left as u8) << 3 | (top_right as u8) << 2 | (bottom_right as u8) << 1 | bottom_left as u8
}

/// Number of nodes the dual grid of a `width` x `height` cave needs, or
/// `None` when that many nodes cannot be addressed by a `u32` [`NodeId`].
/// Each control node owns two edge nodes, and every node may become a vertex.
pub fn node_capacity(width: usize, height: usize) -> Option<usize> {
    width
        .checked_mul(height)
        .and_then(|cells| cells.checked_mul(3))
        .filter(|&count| count <= u32::MAX as usize)
}

/// All nodes and squares for one cave grid.
#[derive(Clone, Debug)]
pub struct SquareGrid {
    nodes: Vec<Node>,
    control_nodes: Tilemap<ControlNode>,
    squares: Tilemap<Square>,
}

impl SquareGrid {
    /// Lay out control nodes centred on the origin and close a square over
    /// every 2x2 block. A grid narrower than 2 cells on either axis yields
    /// no squares.
    ///
    /// Panics if the grid needs more nodes than `u32` ids can address;
    /// [`CaveParams::validate`](crate::CaveParams::validate) rejects such grids up front.
    pub fn build(grid: &CaveGrid, cell_size: f32) -> Self {
        let node_count_x = grid.width;
        let node_count_y = grid.height;
        let capacity = node_capacity(node_count_x, node_count_y)
            .unwrap_or_else(|| panic!("{node_count_x}x{node_count_y} grid overflows u32 node ids"));
        let map_width = node_count_x as f32 * cell_size;
        let map_height = node_count_y as f32 * cell_size;
        let half_cell = cell_size / 2.0;

        let mut nodes = Vec::with_capacity(capacity);
        let mut push = |position: Vec3| {
            let id = NodeId(nodes.len() as u32);
            nodes.push(Node::new(position));
            id
        };

        let control_nodes = Tilemap::from_fn(node_count_x, node_count_y, |x, y| {
            let position = Vec3::new(
                -map_width / 2.0 + x as f32 * cell_size + half_cell,
                0.0,
                -map_height / 2.0 + y as f32 * cell_size + half_cell,
            );
            ControlNode {
                node: push(position),
                active: grid.get(x, y).is_wall(),
                above: push(position + Vec3::FORWARD * half_cell),
                right: push(position + Vec3::RIGHT * half_cell),
            }
        });

        let squares_x = node_count_x.saturating_sub(1);
        let squares_y = node_count_y.saturating_sub(1);
        let squares = Tilemap::from_fn(squares_x, squares_y, |x, y| {
            Square::new(
                control_nodes.get(x, y + 1),
                control_nodes.get(x + 1, y + 1),
                control_nodes.get(x + 1, y),
                control_nodes.get(x, y),
            )
        });

        Self { nodes, control_nodes, squares }
    }

    /// Squares along x.
    pub fn width(&self) -> usize {
        self.squares.width
    }

    /// Squares along y.
    pub fn height(&self) -> usize {
        self.squares.height
    }

    pub fn square(&self, x: usize, y: usize) -> &Square {
        self.squares.get(x, y)
    }

    pub fn control_node(&self, x: usize, y: usize) -> &ControlNode {
        self.control_nodes.get(x, y)
    }

    /// Squares in triangulation order: x outer, y inner.
    pub fn squares(&self) -> impl Iterator<Item = &Square> + '_ {
        (0..self.squares.width).flat_map(move |x| (0..self.squares.height).map(move |y| self.squares.get(x, y)))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Forget every vertex assignment.
    pub fn clear_vertex_indices(&mut self) {
        for node in &mut self.nodes {
            node.vertex_index = None;
        }
    }
}
