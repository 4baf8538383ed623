use crate::core::geometry::{Vertex, VertexOut};
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// How the index buffer assembles triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// Consecutive groups of three indices.
    TriangleList,
    /// Overlapping windows of three indices; odd-numbered triangles flip
    /// winding and are swapped back during assembly.
    TriangleStrip,
}

/// A renderable object: immutable vertex/index data, a world transform and
/// the transient per-frame output of the geometry transform.
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: PrimitiveTopology,
    pub world_matrix: Matrix4<f32>,
    /// Filled by the geometry transform, cleared and rebuilt once per frame
    /// before any triangle of this mesh is rasterized. Never read across
    /// frames.
    pub vertices_out: Vec<VertexOut>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, topology: PrimitiveTopology) -> Self {
        Self {
            vertices,
            indices,
            topology,
            world_matrix: Matrix4::identity(),
            vertices_out: Vec::new(),
        }
    }

    pub fn with_world_matrix(mut self, world_matrix: Matrix4<f32>) -> Self {
        self.world_matrix = world_matrix;
        self
    }

    /// Number of triangles the index buffer assembles under the topology.
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            PrimitiveTopology::TriangleList => self.indices.len() / 3,
            PrimitiveTopology::TriangleStrip => self.indices.len().saturating_sub(2),
        }
    }

    /// A unit test triangle facing the camera, counter-clockwise.
    pub fn create_test_triangle() -> Self {
        let vertices = vec![
            Vertex::new(
                Point3::new(0.0, 0.5, 0.0),
                Vector3::new(0.0, 0.0, -1.0),
                Vector2::new(0.5, 1.0),
            ),
            Vertex::new(
                Point3::new(-0.5, -0.5, 0.0),
                Vector3::new(0.0, 0.0, -1.0),
                Vector2::new(0.0, 0.0),
            ),
            Vertex::new(
                Point3::new(0.5, -0.5, 0.0),
                Vector3::new(0.0, 0.0, -1.0),
                Vector2::new(1.0, 0.0),
            ),
        ];

        Self::new(vertices, vec![0, 1, 2], PrimitiveTopology::TriangleList)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_count_per_topology() {
        let quad_indices = vec![0, 1, 2, 3];
        let strip = Mesh::new(Vec::new(), quad_indices.clone(), PrimitiveTopology::TriangleStrip);
        assert_eq!(strip.triangle_count(), 2);

        let list = Mesh::new(Vec::new(), vec![0, 1, 2, 0, 2, 3], PrimitiveTopology::TriangleList);
        assert_eq!(list.triangle_count(), 2);
    }

    #[test]
    fn short_strip_has_no_triangles() {
        let strip = Mesh::new(Vec::new(), vec![0, 1], PrimitiveTopology::TriangleStrip);
        assert_eq!(strip.triangle_count(), 0);
    }
}
