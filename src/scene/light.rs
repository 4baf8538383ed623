use nalgebra::Vector3;

/// The scene's single fixed directional light plus the constant ambient term.
///
/// `direction` is the direction the light travels; shading uses its negation
/// for the surface-facing test.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub intensity: f32,
    pub ambient: Vector3<f32>,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vector3::new(0.577, -0.577, 0.577),
            intensity: 7.0,
            ambient: Vector3::new(0.025, 0.025, 0.025),
        }
    }
}

impl DirectionalLight {
    pub fn new(direction: Vector3<f32>, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            intensity,
            ..Self::default()
        }
    }

    /// Lambert cosine factor for a world-space surface normal; negative for
    /// surfaces facing away from the light.
    #[inline]
    pub fn observed_area(&self, normal: &Vector3<f32>) -> f32 {
        normal.dot(&-self.direction)
    }
}
