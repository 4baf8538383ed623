use crate::core::color::{max_to_one, remap};
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::VertexOut;
use crate::core::math::interpolation::{
    BarycentricWeights, edge_function, edge_weights, interpolate_depth, interpolate_fragment,
};
use crate::core::pipeline::FragmentShader;
use nalgebra::{Vector2, Vector3};

const EPSILON: f32 = 1e-6;

/// Bounding boxes are widened by one pixel to avoid seams between adjacent
/// triangles caused by floor/ceil rounding.
const BOUNDING_BOX_MARGIN: i32 = 1;

/// Depth-visualization band: stored depths cluster just below 1.0, so this
/// narrow range is stretched to full grayscale.
const DEPTH_VIS_MIN: f32 = 0.995;
const DEPTH_VIS_MAX: f32 = 1.0;

/// What the rasterizer writes for fragments that pass the depth test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Shaded color output.
    FinalColor,
    /// Stored depth remapped to grayscale for debugging.
    DepthBuffer,
}

impl RenderMode {
    /// Explicit transition table; cycling never relies on integer casts.
    pub fn next(self) -> Self {
        match self {
            RenderMode::FinalColor => RenderMode::DepthBuffer,
            RenderMode::DepthBuffer => RenderMode::FinalColor,
        }
    }
}

/// Draws screen-space triangles into the framebuffer.
pub struct Rasterizer {
    pub render_mode: RenderMode,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            render_mode: RenderMode::FinalColor,
        }
    }

    /// Rasterizes one triangle of already-transformed vertices.
    ///
    /// Degenerate input (a vertex with an unusable w, or near-zero area) is
    /// skipped, and triangles with any vertex outside the screen rectangle
    /// are culled whole; out-of-range geometry is never clipped into new
    /// vertices. Per-pixel flow: edge-function coverage, perspective-correct
    /// depth, depth test, then shading.
    pub fn rasterize_triangle<S: FragmentShader>(
        &self,
        framebuffer: &mut FrameBuffer,
        shader: &S,
        v0: &VertexOut,
        v1: &VertexOut,
        v2: &VertexOut,
    ) {
        if v0.is_degenerate() || v1.is_degenerate() || v2.is_degenerate() {
            return;
        }

        let width = framebuffer.width as f32;
        let height = framebuffer.height as f32;

        // Cheap frustum-adjacent cull: one vertex off screen drops the whole
        // triangle (no true clipping, see DESIGN notes).
        for v in [v0, v1, v2] {
            if v.position.x < 0.0
                || v.position.x > width
                || v.position.y < 0.0
                || v.position.y > height
            {
                return;
            }
        }

        let p0 = v0.screen_xy();
        let p1 = v1.screen_xy();
        let p2 = v2.screen_xy();

        // Twice the signed area; also the normalization denominator for the
        // barycentric weights.
        let double_area = edge_function(&p0, &p1, &p2);
        if double_area.abs() < EPSILON {
            return;
        }

        let (min_x, min_y, max_x, max_y) = bounding_box(&p0, &p1, &p2, framebuffer);

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let pixel = Vector2::new(px as f32 + 0.5, py as f32 + 0.5);

                let (w0, w1, w2) = edge_weights(&p0, &p1, &p2, &pixel);
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let Some(bary) = BarycentricWeights::normalize(w0, w1, w2, double_area) else {
                    continue;
                };

                let Some(depth) = interpolate_depth(
                    &bary,
                    v0.position.z,
                    v1.position.z,
                    v2.position.z,
                ) else {
                    continue;
                };
                // Behind the near plane or beyond the far plane.
                if !(0.0..=1.0).contains(&depth) {
                    continue;
                }

                if !framebuffer.depth_test_and_update(px, py, depth) {
                    continue;
                }

                let color = match self.render_mode {
                    RenderMode::FinalColor => {
                        match interpolate_fragment(&bary, v0, v1, v2, &pixel, depth) {
                            Some(fragment) => shader.shade(&fragment),
                            None => continue,
                        }
                    }
                    RenderMode::DepthBuffer => {
                        let gray = remap(depth, DEPTH_VIS_MIN, DEPTH_VIS_MAX).clamp(0.0, 1.0);
                        Vector3::new(gray, gray, gray)
                    }
                };

                framebuffer.set_pixel(px, py, max_to_one(color));
            }
        }
    }
}

/// Integer pixel rectangle covering the triangle, expanded by the seam margin
/// and clamped to the viewport.
fn bounding_box(
    p0: &Vector2<f32>,
    p1: &Vector2<f32>,
    p2: &Vector2<f32>,
    framebuffer: &FrameBuffer,
) -> (usize, usize, usize, usize) {
    let min_x = p0.x.min(p1.x).min(p2.x).floor() as i32 - BOUNDING_BOX_MARGIN;
    let min_y = p0.y.min(p1.y).min(p2.y).floor() as i32 - BOUNDING_BOX_MARGIN;
    let max_x = p0.x.max(p1.x).max(p2.x).ceil() as i32 + BOUNDING_BOX_MARGIN;
    let max_y = p0.y.max(p1.y).max(p2.y).ceil() as i32 + BOUNDING_BOX_MARGIN;

    (
        min_x.max(0) as usize,
        min_y.max(0) as usize,
        max_x.min(framebuffer.width as i32 - 1) as usize,
        max_y.min(framebuffer.height as i32 - 1) as usize,
    )
}
