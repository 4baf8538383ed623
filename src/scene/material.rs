use crate::scene::texture::Texture;
use nalgebra::Vector3;
use std::path::Path;

/// Shininess multiplier applied to the sampled gloss value when building the
/// Phong specular exponent.
pub const SHININESS: f32 = 25.0;

/// The four texture maps of the normal-mapped Phong shading model.
///
/// A material cannot exist with a missing map: texture load failure is a
/// fatal precondition surfaced at load time, never a per-pixel fallback.
#[derive(Debug, Clone)]
pub struct Material {
    pub diffuse_map: Texture,
    pub normal_map: Texture,
    pub gloss_map: Texture,
    pub specular_map: Texture,
    pub shininess: f32,
}

impl Material {
    pub fn new(
        diffuse_map: Texture,
        normal_map: Texture,
        gloss_map: Texture,
        specular_map: Texture,
    ) -> Self {
        Self {
            diffuse_map,
            normal_map,
            gloss_map,
            specular_map,
            shininess: SHININESS,
        }
    }

    /// Loads all four maps; any failure aborts the whole material.
    pub fn load<P: AsRef<Path>>(
        diffuse: P,
        normal: P,
        gloss: P,
        specular: P,
    ) -> Result<Self, String> {
        Ok(Self::new(
            Texture::load(diffuse)?,
            Texture::load(normal)?,
            Texture::load(gloss)?,
            Texture::load(specular)?,
        ))
    }

    /// A flat material with the given albedo, an unperturbed normal map and
    /// neutral gloss/specular. Used by tests and untextured meshes.
    pub fn flat(albedo: Vector3<f32>) -> Self {
        Self::new(
            Texture::solid(albedo),
            // (0.5, 0.5, 1.0) decodes to the straight-up tangent-space normal.
            Texture::solid(Vector3::new(0.5, 0.5, 1.0)),
            Texture::solid(Vector3::new(1.0, 1.0, 1.0)),
            Texture::solid(Vector3::new(1.0, 1.0, 1.0)),
        )
    }
}
