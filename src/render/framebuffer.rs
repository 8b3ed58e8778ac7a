//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a safe view into color and depth buffers with bounds-checked
//! access. The depth buffer enables hidden surface removal independent of
//! draw order.

/// Depth buffer clear value: `1/w` as `w` goes to infinity, i.e. nothing
/// has been drawn and everything wins against it.
pub const FAR_DEPTH: f32 = 0.0;

/// A view into color and depth buffers.
///
/// Wraps 1D slices with width/height metadata to enable safe 2D pixel
/// access. This is a borrowed view, not an owning type - it's meant to be
/// created temporarily when you need to pass buffers + dimensions together.
///
/// # Depth Buffer
///
/// The depth buffer stores interpolated 1/w values (reciprocal of the
/// clip-space w). 1/w is used instead of z because it interpolates linearly
/// in screen space. Larger values are closer to the camera.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    ///
    /// # Panics
    /// Panics in debug builds if buffer lengths don't match width * height
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f32],
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            (width * height) as usize,
            "Color buffer size doesn't match dimensions"
        );
        debug_assert_eq!(
            depth_buffer.len(),
            (width * height) as usize,
            "Depth buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is written iff the new depth is strictly greater than the
    /// stored depth at that location (strictly nearer, since we store 1/w).
    /// Color and depth are updated together or not at all. Silently ignores
    /// out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let idx = (y as u32 * self.width + x as u32) as usize;
            if depth > self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth;
                self.color_buffer[idx] = color;
            }
        }
    }

    /// Set a pixel without depth testing (wireframe overlay path).
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.color_buffer[(y as u32 * self.width + x as u32) as usize] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.color_buffer[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    /// Get the stored depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.depth_buffer[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }
}
