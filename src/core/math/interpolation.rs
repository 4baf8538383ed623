use crate::core::geometry::VertexOut;
use nalgebra::{Vector2, Vector4};

const EPSILON: f32 = 1e-6;

/// Signed 2D edge function: which side of the directed edge a->b the point p
/// lies on. Positive for the triangle's interior under the winding convention
/// used by the rasterizer; `edge_function(v0, v1, v2.xy)` equals twice the
/// triangle's signed area.
#[inline]
pub fn edge_function(a: &Vector2<f32>, b: &Vector2<f32>, p: &Vector2<f32>) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Unnormalized edge weights of `p` against triangle (v0, v1, v2).
///
/// `w0` is taken against the edge v1->v2 (and so scales with the sub-triangle
/// opposite v0), and likewise for the others. The pixel is covered iff all
/// three are >= 0.
#[inline]
pub fn edge_weights(
    v0: &Vector2<f32>,
    v1: &Vector2<f32>,
    v2: &Vector2<f32>,
    p: &Vector2<f32>,
) -> (f32, f32, f32) {
    (
        edge_function(v1, v2, p),
        edge_function(v2, v0, p),
        edge_function(v0, v1, p),
    )
}

/// Barycentric weights normalized by twice the triangle area; they sum to 1.
#[derive(Debug, Clone, Copy)]
pub struct BarycentricWeights {
    pub w0: f32,
    pub w1: f32,
    pub w2: f32,
}

impl BarycentricWeights {
    /// Normalizes raw edge weights by the triangle's doubled area.
    /// Returns `None` for degenerate (near-zero-area) triangles.
    pub fn normalize(w0: f32, w1: f32, w2: f32, double_area: f32) -> Option<Self> {
        if double_area.abs() < EPSILON {
            return None;
        }
        let inv = 1.0 / double_area;
        Some(Self {
            w0: w0 * inv,
            w1: w1 * inv,
            w2: w2 * inv,
        })
    }
}

/// Interpolates depth for the depth test: 1/z is affine in screen space while
/// z itself is not, so the reciprocals are weighted linearly and the result
/// inverted.
///
/// Returns `None` when the interpolated value is not finite (an all-zero
/// reciprocal sum, or NaN from a boundary weight against a zero depth); the
/// caller additionally rejects values outside [0, 1]. A vertex exactly at
/// z = 0 yields an infinite reciprocal and therefore depth 0, matching the
/// near plane.
pub fn interpolate_depth(weights: &BarycentricWeights, z0: f32, z1: f32, z2: f32) -> Option<f32> {
    let inv_z = weights.w0 / z0 + weights.w1 / z1 + weights.w2 / z2;
    let depth = 1.0 / inv_z;
    depth.is_finite().then_some(depth)
}

/// Perspective-correct attribute interpolation for one covered pixel.
///
/// Every attribute uses the reciprocal of the homogeneous w (not z):
/// `attr = sum(wi * attr_i / w_i) / sum(wi / w_i)`. Plain screen-space
/// barycentric interpolation is visibly wrong for projected geometry.
///
/// Unit-length attributes (normal, tangent, view direction) are renormalized
/// afterwards; UV is clamped to [0, 1] for the sampler. The fragment position
/// holds the pixel center, the depth-buffer value and the interpolated w.
pub fn interpolate_fragment(
    weights: &BarycentricWeights,
    v0: &VertexOut,
    v1: &VertexOut,
    v2: &VertexOut,
    pixel: &Vector2<f32>,
    depth: f32,
) -> Option<VertexOut> {
    let r0 = weights.w0 / v0.position.w;
    let r1 = weights.w1 / v1.position.w;
    let r2 = weights.w2 / v2.position.w;

    let inv_w = r0 + r1 + r2;
    if inv_w.abs() < EPSILON || !inv_w.is_finite() {
        return None;
    }
    let w_interpolated = 1.0 / inv_w;

    let color = (v0.color * r0 + v1.color * r1 + v2.color * r2) * w_interpolated;
    let uv = (v0.uv * r0 + v1.uv * r1 + v2.uv * r2) * w_interpolated;
    let normal = (v0.normal * r0 + v1.normal * r1 + v2.normal * r2) * w_interpolated;
    let tangent = (v0.tangent * r0 + v1.tangent * r1 + v2.tangent * r2) * w_interpolated;
    let view_dir = (v0.view_dir * r0 + v1.view_dir * r1 + v2.view_dir * r2) * w_interpolated;

    Some(VertexOut {
        position: Vector4::new(pixel.x, pixel.y, depth, w_interpolated),
        color,
        uv: Vector2::new(uv.x.clamp(0.0, 1.0), uv.y.clamp(0.0, 1.0)),
        normal: renormalize(normal),
        tangent: renormalize(tangent),
        view_dir: renormalize(view_dir),
    })
}

// Linear interpolation of unit vectors is not unit length.
#[inline]
fn renormalize(v: nalgebra::Vector3<f32>) -> nalgebra::Vector3<f32> {
    let norm = v.norm();
    if norm > EPSILON { v / norm } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Vector2, Vector3, Vector4};

    // Screen-space triangle wound so that all edge weights are positive
    // inside (the winding produced by the viewport transform's Y flip).
    fn test_triangle() -> (Vector2<f32>, Vector2<f32>, Vector2<f32>) {
        (
            Vector2::new(400.0, 600.0),
            Vector2::new(800.0, 0.0),
            Vector2::new(0.0, 0.0),
        )
    }

    fn vertex_out(x: f32, y: f32, z: f32, w: f32, uv: Vector2<f32>) -> VertexOut {
        VertexOut {
            position: Vector4::new(x, y, z, w),
            color: Vector3::new(1.0, 1.0, 1.0),
            uv,
            normal: Vector3::new(0.0, 0.0, -1.0),
            tangent: Vector3::new(1.0, 0.0, 0.0),
            view_dir: Vector3::new(0.0, 0.0, 1.0),
        }
    }

    #[test]
    fn centroid_is_inside_its_own_triangle() {
        let (v0, v1, v2) = test_triangle();
        let centroid = (v0 + v1 + v2) / 3.0;
        let (w0, w1, w2) = edge_weights(&v0, &v1, &v2, &centroid);
        assert!(w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0);
    }

    #[test]
    fn weight_sum_equals_double_area() {
        let (v0, v1, v2) = test_triangle();
        let double_area = edge_function(&v0, &v1, &v2);
        let p = Vector2::new(350.5, 200.5);
        let (w0, w1, w2) = edge_weights(&v0, &v1, &v2, &p);
        assert_relative_eq!(w0 + w1 + w2, double_area, max_relative = 1e-5);
    }

    #[test]
    fn normalized_weights_sum_to_one() {
        let (v0, v1, v2) = test_triangle();
        let double_area = edge_function(&v0, &v1, &v2);
        let p = Vector2::new(412.5, 300.5);
        let (w0, w1, w2) = edge_weights(&v0, &v1, &v2, &p);
        let bary = BarycentricWeights::normalize(w0, w1, w2, double_area).unwrap();
        assert_relative_eq!(bary.w0 + bary.w1 + bary.w2, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn degenerate_triangle_is_rejected() {
        assert!(BarycentricWeights::normalize(0.0, 0.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn outside_point_fails_at_least_one_edge() {
        let (v0, v1, v2) = test_triangle();
        let (w0, w1, w2) = edge_weights(&v0, &v1, &v2, &Vector2::new(-50.0, -50.0));
        assert!(w0 < 0.0 || w1 < 0.0 || w2 < 0.0);
    }

    #[test]
    fn depth_interpolates_reciprocally() {
        // Two vertices at z=0.2, one at z=0.4, evaluated at the weight
        // (1/2, 1/2, 0): 1 / (0.5/0.2 + 0.5/0.4) = 0.2666...
        let w = BarycentricWeights {
            w0: 0.5,
            w1: 0.5,
            w2: 0.0,
        };
        let depth = interpolate_depth(&w, 0.2, 0.4, 0.3).unwrap();
        assert_relative_eq!(depth, 1.0 / (0.5 / 0.2 + 0.5 / 0.4), epsilon = 1e-6);
    }

    #[test]
    fn zero_vertex_depth_maps_to_near_plane() {
        // 1/0 -> inf reciprocal -> depth 0 under IEEE arithmetic.
        let w = BarycentricWeights {
            w0: 1.0,
            w1: 0.0,
            w2: 0.0,
        };
        assert_eq!(interpolate_depth(&w, 0.0, 0.5, 0.5), Some(0.0));
    }

    #[test]
    fn depth_of_a_flat_triangle_is_constant() {
        let w = BarycentricWeights {
            w0: 0.3,
            w1: 0.3,
            w2: 0.4,
        };
        let depth = interpolate_depth(&w, 0.5, 0.5, 0.5).unwrap();
        assert_relative_eq!(depth, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn shared_attributes_survive_projective_weighting() {
        // All three vertices share uv/color/normal but have very different
        // depths and w; the interpolated attributes must equal the constant.
        let uv = Vector2::new(0.25, 0.75);
        let v0 = vertex_out(400.0, 600.0, 0.1, 1.0, uv);
        let v1 = vertex_out(800.0, 0.0, 0.9, 40.0, uv);
        let v2 = vertex_out(0.0, 0.0, 0.5, 7.0, uv);

        let w = BarycentricWeights {
            w0: 0.2,
            w1: 0.3,
            w2: 0.5,
        };
        let frag = interpolate_fragment(&w, &v0, &v1, &v2, &Vector2::new(400.5, 300.5), 0.5)
            .unwrap();

        assert_relative_eq!(frag.uv.x, uv.x, epsilon = 1e-5);
        assert_relative_eq!(frag.uv.y, uv.y, epsilon = 1e-5);
        assert_relative_eq!(frag.color.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(frag.normal.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn attributes_bias_toward_nearer_vertex() {
        // Halfway in screen space between w=1 and w=3 vertices the correct
        // result is 0.75/0.25, not the affine 0.5/0.5.
        let v0 = vertex_out(0.0, 0.0, 0.2, 1.0, Vector2::new(0.0, 0.0));
        let v1 = vertex_out(100.0, 0.0, 0.8, 3.0, Vector2::new(1.0, 0.0));
        let v2 = vertex_out(50.0, 100.0, 0.5, 2.0, Vector2::new(0.0, 0.0));

        let w = BarycentricWeights {
            w0: 0.5,
            w1: 0.5,
            w2: 0.0,
        };
        let frag = interpolate_fragment(&w, &v0, &v1, &v2, &Vector2::new(50.0, 0.0), 0.3)
            .unwrap();
        assert_relative_eq!(frag.uv.x, 0.25, epsilon = 1e-5);
    }

    #[test]
    fn interpolated_unit_vectors_are_renormalized() {
        let mut v0 = vertex_out(0.0, 0.0, 0.2, 1.0, Vector2::zeros());
        let mut v1 = vertex_out(100.0, 0.0, 0.2, 1.0, Vector2::zeros());
        let v2 = vertex_out(50.0, 100.0, 0.2, 1.0, Vector2::zeros());
        v0.normal = Vector3::new(1.0, 0.0, 0.0);
        v1.normal = Vector3::new(0.0, 1.0, 0.0);

        let w = BarycentricWeights {
            w0: 0.5,
            w1: 0.5,
            w2: 0.0,
        };
        let frag = interpolate_fragment(&w, &v0, &v1, &v2, &Vector2::new(50.0, 0.0), 0.2)
            .unwrap();
        assert_relative_eq!(frag.normal.norm(), 1.0, epsilon = 1e-5);
    }
}
