use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// A single mesh vertex in local object space.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Per-vertex color (linear RGB). White when the mesh carries none.
    pub color: Vector3<f32>,
    /// Texture coordinates (UV).
    pub uv: Vector2<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
    /// Tangent vector for normal mapping.
    pub tangent: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, uv: Vector2<f32>) -> Self {
        Self {
            position,
            color: Vector3::new(1.0, 1.0, 1.0),
            uv,
            normal,
            tangent: Vector3::zeros(),
        }
    }

    pub fn with_color(position: Point3<f32>, color: Vector3<f32>) -> Self {
        Self {
            position,
            color,
            uv: Vector2::zeros(),
            normal: Vector3::new(0.0, 0.0, -1.0),
            tangent: Vector3::zeros(),
        }
    }
}

/// Output of the geometry transform, consumed by triangle setup within the
/// same frame.
///
/// `position` holds screen-space x,y in pixels, z as NDC depth in [0, 1] and
/// w as the untouched clip-space w (needed for perspective-correct attribute
/// interpolation). A vertex with `position.w == 0.0` is a degenerate marker:
/// the perspective divide was impossible and every triangle referencing it
/// must be skipped.
#[derive(Debug, Clone, Copy)]
pub struct VertexOut {
    pub position: Vector4<f32>,
    pub color: Vector3<f32>,
    pub uv: Vector2<f32>,
    /// Normal in world space.
    pub normal: Vector3<f32>,
    /// Tangent in world space.
    pub tangent: Vector3<f32>,
    /// Direction from the camera to the surface point, world space.
    pub view_dir: Vector3<f32>,
}

impl VertexOut {
    /// Marker for a vertex whose clip-space w was too close to zero.
    pub fn degenerate() -> Self {
        Self {
            position: Vector4::zeros(),
            color: Vector3::zeros(),
            uv: Vector2::zeros(),
            normal: Vector3::zeros(),
            tangent: Vector3::zeros(),
            view_dir: Vector3::zeros(),
        }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.position.w == 0.0
    }

    /// Screen-space x,y as a 2D vector.
    #[inline]
    pub fn screen_xy(&self) -> Vector2<f32> {
        Vector2::new(self.position.x, self.position.y)
    }
}
