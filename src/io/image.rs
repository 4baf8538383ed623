use crate::core::color::linear_to_srgb;
use crate::core::framebuffer::FrameBuffer;
use image::{ImageBuffer, Rgb};
use log::info;
use std::path::Path;

/// Saves the framebuffer's linear color data as an sRGB PNG.
pub fn save_framebuffer<P: AsRef<Path>>(framebuffer: &FrameBuffer, path: P) -> Result<(), String> {
    let path_ref = path.as_ref();
    let width = framebuffer.width;
    let data = framebuffer.color_data();

    let mut img_buf = ImageBuffer::new(width as u32, framebuffer.height as u32);

    for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
        let linear = data[(y as usize) * width + (x as usize)];
        let srgb = linear_to_srgb(linear);

        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
        *pixel = Rgb([to_byte(srgb.x), to_byte(srgb.y), to_byte(srgb.z)]);
    }

    img_buf
        .save(path_ref)
        .map_err(|e| format!("Failed to save image to {:?}: {}", path_ref, e))?;

    info!("Render saved to {:?}", path_ref);
    Ok(())
}
