use crate::core::geometry::VertexOut;
use nalgebra::Vector3;

/// Programmable pixel stage of the pipeline.
///
/// The rasterizer hands an interpolated, perspective-correct [`VertexOut`] to
/// the shader once the fragment has passed the depth test; the shader returns
/// a linear RGB color in [0, 1]^3 (the rasterizer normalizes over-bright
/// results before writing).
pub trait FragmentShader {
    fn shade(&self, fragment: &VertexOut) -> Vector3<f32>;
}
