use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::VertexOut;
use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::core::pipeline::FragmentShader;
use crate::core::rasterizer::Rasterizer;
use crate::scene::mesh::{Mesh, PrimitiveTopology};
use nalgebra::{Matrix4, Point3, Vector4};

/// The frame driver: owns the framebuffer and rasterizer, runs the geometry
/// transform per mesh and walks its triangles in topology order.
///
/// All mutable state (both buffers, each mesh's `vertices_out`) is owned
/// exclusively for the duration of a frame; the finished color buffer is only
/// handed out after rasterization completes.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    /// Clears both buffers; must run at the start of every frame.
    pub fn clear(&mut self, color: nalgebra::Vector3<f32>) {
        self.framebuffer.clear(color);
    }

    /// Transforms and rasterizes one mesh with the supplied combined
    /// view-projection transform and camera position.
    pub fn draw_mesh<S: FragmentShader>(
        &mut self,
        mesh: &mut Mesh,
        shader: &S,
        view_projection: &Matrix4<f32>,
        camera_position: &Point3<f32>,
    ) {
        self.transform_vertices(mesh, view_projection, camera_position);

        match mesh.topology {
            PrimitiveTopology::TriangleList => {
                for chunk in mesh.indices.chunks_exact(3) {
                    self.rasterize_indexed(mesh, shader, chunk[0], chunk[1], chunk[2]);
                }
            }
            PrimitiveTopology::TriangleStrip => {
                for i in 0..mesh.triangle_count() {
                    // Odd strip triangles are wound the other way; swapping
                    // the second and third vertex restores the convention.
                    let (i0, i1, i2) = if i % 2 == 1 {
                        (mesh.indices[i], mesh.indices[i + 2], mesh.indices[i + 1])
                    } else {
                        (mesh.indices[i], mesh.indices[i + 1], mesh.indices[i + 2])
                    };
                    self.rasterize_indexed(mesh, shader, i0, i1, i2);
                }
            }
        }
    }

    fn rasterize_indexed<S: FragmentShader>(
        &mut self,
        mesh: &Mesh,
        shader: &S,
        i0: u32,
        i1: u32,
        i2: u32,
    ) {
        // A bad index drops this triangle, never the frame.
        let (Some(v0), Some(v1), Some(v2)) = (
            mesh.vertices_out.get(i0 as usize),
            mesh.vertices_out.get(i1 as usize),
            mesh.vertices_out.get(i2 as usize),
        ) else {
            return;
        };
        let (v0, v1, v2) = (*v0, *v1, *v2);
        self.rasterizer
            .rasterize_triangle(&mut self.framebuffer, shader, &v0, &v1, &v2);
    }

    /// Geometry transform: rebuilds `mesh.vertices_out` from scratch.
    ///
    /// World-view-projection is combined once per mesh; positions get the
    /// perspective divide and viewport mapping, while normals and tangents
    /// are taken through the world matrix only and renormalized. The
    /// clip-space w survives in `position.w` for the interpolator.
    fn transform_vertices(
        &self,
        mesh: &mut Mesh,
        view_projection: &Matrix4<f32>,
        camera_position: &Point3<f32>,
    ) {
        let width = self.framebuffer.width as f32;
        let height = self.framebuffer.height as f32;

        let wvp = view_projection * mesh.world_matrix;
        let world_rotation = mesh.world_matrix.fixed_view::<3, 3>(0, 0);

        // Stale-data invariant: cleared and rebuilt before any triangle of
        // this mesh is rasterized.
        mesh.vertices_out.clear();
        mesh.vertices_out.reserve(mesh.vertices.len());

        for vertex in &mesh.vertices {
            let clip = wvp * vertex.position.to_homogeneous();

            let Some(ndc) = apply_perspective_division(&clip) else {
                mesh.vertices_out.push(VertexOut::degenerate());
                continue;
            };

            let screen = ndc_to_screen(ndc.x, ndc.y, width, height);

            let world_pos = mesh.world_matrix.transform_point(&vertex.position);
            let view_dir = (world_pos - camera_position).normalize();

            mesh.vertices_out.push(VertexOut {
                position: Vector4::new(screen.x, screen.y, ndc.z, clip.w),
                color: vertex.color,
                uv: vertex.uv,
                normal: normalized_or_zero(world_rotation * vertex.normal),
                tangent: normalized_or_zero(world_rotation * vertex.tangent),
                view_dir,
            });
        }
    }
}

fn normalized_or_zero(v: nalgebra::Vector3<f32>) -> nalgebra::Vector3<f32> {
    let norm = v.norm();
    if norm > 1e-6 { v / norm } else { v }
}
