use crate::core::geometry::VertexOut;
use crate::core::pipeline::FragmentShader;
use crate::scene::light::DirectionalLight;
use crate::scene::material::Material;
use nalgebra::Vector3;

/// Which lighting terms the Phong shader outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    /// The raw Lambert cosine as grayscale.
    ObservedArea,
    /// Lambertian diffuse only.
    Diffuse,
    /// Phong specular only.
    Specular,
    /// Diffuse + specular + ambient (default).
    Combined,
}

impl ShadingMode {
    /// Explicit transition table; cycling never relies on integer casts.
    pub fn next(self) -> Self {
        match self {
            ShadingMode::ObservedArea => ShadingMode::Diffuse,
            ShadingMode::Diffuse => ShadingMode::Specular,
            ShadingMode::Specular => ShadingMode::Combined,
            ShadingMode::Combined => ShadingMode::ObservedArea,
        }
    }
}

/// Normal-mapped Phong shader: samples the material's diffuse, normal, gloss
/// and specular maps, perturbs the surface normal in tangent space and
/// evaluates Lambertian diffuse + Phong specular + ambient against the single
/// directional light.
pub struct PhongShader {
    pub material: Material,
    pub light: DirectionalLight,
    pub mode: ShadingMode,
    pub use_normal_map: bool,
}

impl PhongShader {
    pub fn new(material: Material) -> Self {
        Self {
            material,
            light: DirectionalLight::default(),
            mode: ShadingMode::Combined,
            use_normal_map: true,
        }
    }

    /// World-space shading normal: either the interpolated surface normal or
    /// the normal-map texel rotated into world space through the tangent
    /// frame.
    fn shading_normal(&self, fragment: &VertexOut) -> Vector3<f32> {
        if !self.use_normal_map {
            return fragment.normal;
        }

        let normal = fragment.normal;
        let tangent = fragment.tangent;
        let binormal = normal.cross(&tangent);

        // Texel [0,1] -> direction [-1,1]
        let sample = self.material.normal_map.sample(&fragment.uv);
        let tangent_space = Vector3::new(
            2.0 * sample.x - 1.0,
            2.0 * sample.y - 1.0,
            2.0 * sample.z - 1.0,
        );

        let world = tangent * tangent_space.x + binormal * tangent_space.y + normal * tangent_space.z;
        let norm = world.norm();
        if norm > 1e-6 { world / norm } else { normal }
    }

    fn lambert_diffuse(&self, fragment: &VertexOut) -> Vector3<f32> {
        let diffuse_color = self.material.diffuse_map.sample(&fragment.uv);
        diffuse_color / std::f32::consts::PI
    }

    fn phong_specular(&self, fragment: &VertexOut, normal: &Vector3<f32>) -> Vector3<f32> {
        let light_dir = self.light.direction;
        let reflected = light_dir - normal * (2.0 * normal.dot(&light_dir));
        let cos_alpha = reflected.dot(&-fragment.view_dir).max(0.0);

        let gloss = self.material.gloss_map.sample(&fragment.uv).x;
        let exponent = gloss * self.material.shininess;
        let specular_color = self.material.specular_map.sample(&fragment.uv);

        specular_color * cos_alpha.powf(exponent)
    }
}

impl FragmentShader for PhongShader {
    fn shade(&self, fragment: &VertexOut) -> Vector3<f32> {
        let normal = self.shading_normal(fragment);

        let observed_area = self.light.observed_area(&normal);
        if observed_area <= 0.0 {
            // Back-facing relative to the light: no light arrives at all.
            return Vector3::zeros();
        }

        match self.mode {
            ShadingMode::ObservedArea => {
                Vector3::new(observed_area, observed_area, observed_area)
            }
            ShadingMode::Diffuse => {
                self.lambert_diffuse(fragment) * self.light.intensity * observed_area
            }
            ShadingMode::Specular => self.phong_specular(fragment, &normal) * observed_area,
            ShadingMode::Combined => {
                let diffuse = self.lambert_diffuse(fragment) * self.light.intensity;
                let specular = self.phong_specular(fragment, &normal);
                (diffuse + specular + self.light.ambient) * observed_area
            }
        }
    }
}
