//! Triangulation of a square grid into a flat mesh
//!
//! Vertices are shared by node identity: the first square to touch a node
//! appends its position and records the index on the node, later squares
//! reuse it. Two nodes at the same position but with different ids would
//! still get separate vertices; the dual grid never creates such pairs.

use log::debug;
use serde::Serialize;

use super::cases::contour;
use super::nodes::{NodeId, Square, SquareGrid, Vec3};

/// Triangle soup with shared vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangle indices as one flat list, three per triangle.
    pub fn indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Vertex positions as tightly packed little-endian `f32` xyz bytes,
    /// ready for a GPU vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Twice the signed area of a triangle projected onto the XZ plane.
    /// Every triangle this crate emits is negative (clockwise seen from +y
    /// with z pointing up the page).
    pub fn signed_area_xz(&self, triangle: [u32; 3]) -> f32 {
        let [a, b, c] = triangle.map(|i| self.vertices[i as usize]);
        (b.x - a.x) * (c.z - a.z) - (c.x - a.x) * (b.z - a.z)
    }
}

/// Summary of a triangulated grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Number of squares per configuration.
    pub configurations: [usize; 16],
}

impl MeshStats {
    pub fn collect(squares: &SquareGrid, mesh: &Mesh) -> Self {
        let mut configurations = [0; 16];
        for square in squares.squares() {
            configurations[square.configuration as usize] += 1;
        }
        Self {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            configurations,
        }
    }

    /// Squares that produced any geometry.
    pub fn filled_squares(&self) -> usize {
        self.configurations[1..].iter().sum()
    }
}

/// Builds a mesh square by square.
struct Triangulator<'a> {
    grid: &'a mut SquareGrid,
    mesh: Mesh,
}

impl<'a> Triangulator<'a> {
    /// Vertex index for a node, appending its position on first use.
    fn vertex(&mut self, id: NodeId) -> u32 {
        // At most one vertex per node, and build() keeps node ids within u32.
        debug_assert!(self.mesh.vertices.len() <= self.grid.node_count());
        let node = self.grid.node_mut(id);
        match node.vertex_index {
            Some(index) => index,
            None => {
                let index = self.mesh.vertices.len() as u32;
                node.vertex_index = Some(index);
                self.mesh.vertices.push(node.position);
                index
            }
        }
    }

    /// Assign every point a vertex, then fan from the first one.
    fn mesh_from_points(&mut self, points: &[NodeId]) {
        let mut indices = [0u32; 6];
        for (slot, &id) in indices.iter_mut().zip(points) {
            *slot = self.vertex(id);
        }
        let indices = &indices[..points.len()];

        if let Some((&first, rest)) = indices.split_first() {
            for pair in rest.windows(2) {
                self.mesh.triangles.push([first, pair[0], pair[1]]);
            }
        }
    }
}

/// Turn every square into triangles. Vertex assignments left on the grid
/// by an earlier call are cleared first, and the fresh ones stay on the
/// nodes afterwards.
pub fn triangulate(grid: &mut SquareGrid) -> Mesh {
    grid.clear_vertex_indices();

    let squares: Vec<Square> = grid.squares().copied().collect();

    let mut triangulator = Triangulator { grid, mesh: Mesh::default() };
    let mut points = Vec::with_capacity(6);
    for square in &squares {
        points.clear();
        points.extend(contour(square.configuration).iter().map(|&role| square.node(role)));
        triangulator.mesh_from_points(&points);
    }

    let mesh = triangulator.mesh;
    debug!("Triangulated {} squares into {} vertices, {} triangles", squares.len(), mesh.vertex_count(), mesh.triangle_count());
    mesh
}
