use crate::core::geometry::VertexOut;
use crate::core::pipeline::FragmentShader;
use nalgebra::Vector3;

/// Outputs the interpolated per-vertex color without any lighting.
/// Debug path, and the workhorse of the end-to-end pipeline tests.
pub struct UnlitShader;

impl FragmentShader for UnlitShader {
    fn shade(&self, fragment: &VertexOut) -> Vector3<f32> {
        fragment.color
    }
}
