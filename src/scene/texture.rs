use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use log::info;
use nalgebra::{Vector2, Vector3};
use std::path::Path;
use std::sync::Arc;

/// A sampleable 2D texture map.
#[derive(Debug, Clone)]
pub struct Texture {
    image: Arc<DynamicImage>,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref)
            .map_err(|e| format!("Failed to load texture {:?}: {}", path_ref, e))?;

        let width = img.width();
        let height = img.height();
        info!("Loaded texture: {:?} ({}x{})", path_ref, width, height);

        Ok(Self {
            image: Arc::new(img),
            width,
            height,
        })
    }

    /// A 1x1 single-color texture, handy for tests and untextured materials.
    pub fn solid(color: Vector3<f32>) -> Self {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let mut img = RgbImage::new(1, 1);
        img.put_pixel(0, 0, Rgb([to_byte(color.x), to_byte(color.y), to_byte(color.z)]));
        Self {
            image: Arc::new(DynamicImage::ImageRgb8(img)),
            width: 1,
            height: 1,
        }
    }

    /// Nearest-neighbor sample, RGB in [0, 1].
    ///
    /// The caller must clamp `uv` to [0, 1] beforehand; the index is still
    /// guarded so a uv of exactly 1.0 lands on the last texel.
    pub fn sample(&self, uv: &Vector2<f32>) -> Vector3<f32> {
        let x = ((uv.x * self.width as f32) as u32).min(self.width - 1);
        let y = ((uv.y * self.height as f32) as u32).min(self.height - 1);

        let pixel = self.image.get_pixel(x, y);
        Vector3::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn solid_texture_samples_its_color() {
        let tex = Texture::solid(Vector3::new(1.0, 0.5, 0.0));
        let c = tex.sample(&Vector2::new(0.3, 0.7));
        assert_relative_eq!(c.x, 1.0, epsilon = 1e-2);
        assert_relative_eq!(c.y, 0.5, epsilon = 1e-2);
        assert_relative_eq!(c.z, 0.0, epsilon = 1e-2);
    }

    #[test]
    fn uv_of_one_stays_in_bounds() {
        let tex = Texture::solid(Vector3::new(0.25, 0.25, 0.25));
        // Must not panic on the inclusive edge.
        let _ = tex.sample(&Vector2::new(1.0, 1.0));
    }
}
