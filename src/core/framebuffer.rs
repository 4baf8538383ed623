use nalgebra::Vector3;

/// Per-frame color and depth storage.
///
/// Both buffers are allocated once at startup for the viewport size and
/// cleared in place every frame; they are never reallocated mid-run. The
/// renderer is single-threaded, so there is exactly one writer per frame and
/// no synchronization is needed.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    color_buffer: Vec<Vector3<f32>>,
    depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![Vector3::zeros(); size],
            depth_buffer: vec![f32::INFINITY; size],
        }
    }

    /// Resets the color buffer to `color` and every depth entry to +infinity.
    /// Must run at the start of every frame.
    pub fn clear(&mut self, color: Vector3<f32>) {
        self.color_buffer.fill(color);
        self.depth_buffer.fill(f32::INFINITY);
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Depth test with update: accepts iff `new_depth <= stored` (equal depth
    /// overwrites, so the last triangle drawn wins exact ties). On success
    /// the stored depth is replaced and the caller may write the pixel color.
    #[inline]
    pub fn depth_test_and_update(&mut self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        if new_depth <= self.depth_buffer[idx] {
            self.depth_buffer[idx] = new_depth;
            true
        } else {
            false
        }
    }

    /// Writes a pixel color. Should only be called after
    /// `depth_test_and_update` returned true.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Vector3<f32>) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.color_buffer[idx] = color;
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.color_buffer[self.index(x, y)])
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)])
    }

    /// Row-major view of the color buffer for the presentation layer.
    pub fn color_data(&self) -> &[Vector3<f32>] {
        &self.color_buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_color_and_depth() {
        let mut fb = FrameBuffer::new(4, 4);
        assert!(fb.depth_test_and_update(1, 1, 0.5));
        fb.set_pixel(1, 1, Vector3::new(1.0, 0.0, 0.0));

        fb.clear(Vector3::new(0.2, 0.2, 0.2));
        assert_eq!(fb.get_pixel(1, 1).unwrap(), Vector3::new(0.2, 0.2, 0.2));
        assert_eq!(fb.depth_at(1, 1).unwrap(), f32::INFINITY);
    }

    #[test]
    fn nearer_fragment_wins() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(fb.depth_test_and_update(0, 0, 0.8));
        assert!(fb.depth_test_and_update(0, 0, 0.3));
        assert!(!fb.depth_test_and_update(0, 0, 0.5));
        assert_eq!(fb.depth_at(0, 0).unwrap(), 0.3);
    }

    #[test]
    fn equal_depth_overwrites() {
        // Ties accept: last drawn wins at exactly equal depth.
        let mut fb = FrameBuffer::new(2, 2);
        assert!(fb.depth_test_and_update(1, 0, 0.4));
        assert!(fb.depth_test_and_update(1, 0, 0.4));
    }

    #[test]
    fn accepted_depths_are_non_increasing() {
        let mut fb = FrameBuffer::new(1, 1);
        let candidates = [0.9, 0.7, 0.8, 0.7, 0.2, 0.5];
        let mut accepted = Vec::new();
        for depth in candidates {
            if fb.depth_test_and_update(0, 0, depth) {
                accepted.push(depth);
            }
        }
        assert!(accepted.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(fb.depth_at(0, 0).unwrap(), 0.2);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(!fb.depth_test_and_update(2, 0, 0.1));
        assert!(fb.get_pixel(0, 2).is_none());
    }
}
