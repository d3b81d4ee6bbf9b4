//! Owned frame storage.
//!
//! The [`Renderer`] owns the color and depth buffers for one output surface
//! and hands out [`FrameBuffer`] views for the rasterizer to write through.
//! Both buffers are logically recreated (cleared) at the start of every frame;
//! nothing persists across frames.

use super::framebuffer::{FrameBuffer, FAR_DEPTH};
use crate::colors;

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    // Scratch pixels for presenting the depth buffer as grayscale
    depth_visual: Vec<u32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![FAR_DEPTH; size],
            depth_visual: vec![0; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.depth_buffer = vec![FAR_DEPTH; size];
        self.depth_visual = vec![0; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset both buffers for a new frame: color to the background, depth to
    /// the far sentinel.
    pub fn clear(&mut self, background: u32) {
        self.color_buffer.fill(background);
        self.depth_buffer.fill(FAR_DEPTH);
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }

    pub fn color_pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Render the depth buffer into grayscale pixels for presentation.
    pub fn depth_pixels(&mut self) -> &[u32] {
        for (out, &d) in self.depth_visual.iter_mut().zip(&self.depth_buffer) {
            *out = colors::depth_to_gray(d);
        }
        &self.depth_visual
    }

    /// View the color buffer as raw bytes (ARGB8888, 4 bytes per pixel).
    pub fn color_bytes(&self) -> &[u8] {
        Self::pixels_as_bytes(&self.color_buffer)
    }

    /// View the depth buffer as grayscale bytes (ARGB8888, 4 bytes per pixel).
    pub fn depth_bytes(&mut self) -> &[u8] {
        self.depth_pixels();
        Self::pixels_as_bytes(&self.depth_visual)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.color_buffer[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    pub fn depth(&self, x: i32, y: i32) -> Option<f32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.depth_buffer[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    fn pixels_as_bytes(pixels: &[u32]) -> &[u8] {
        unsafe { std::slice::from_raw_parts(pixels.as_ptr() as *const u8, pixels.len() * 4) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_both_buffers() {
        let mut renderer = Renderer::new(8, 8);
        {
            let mut fb = renderer.as_framebuffer();
            fb.set_pixel_depth_tested(3, 3, 0.25, 0xFFFF0000);
        }
        renderer.clear(colors::BACKGROUND);

        assert_eq!(renderer.pixel(3, 3), Some(colors::BACKGROUND));
        assert_eq!(renderer.depth(3, 3), Some(FAR_DEPTH));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut renderer = Renderer::new(8, 8);
        renderer.clear(0xFF123456);
        renderer.clear(0xFF123456);

        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(renderer.pixel(x, y), Some(0xFF123456));
            }
        }
    }

    #[test]
    fn byte_view_matches_pixel_layout() {
        let mut renderer = Renderer::new(2, 1);
        renderer.clear(0xFF2067B2);
        let bytes = renderer.color_bytes();
        assert_eq!(bytes.len(), 8);
        // Little-endian u32: B, G, R, A in memory
        assert_eq!(&bytes[0..4], &[0xB2, 0x67, 0x20, 0xFF]);
    }
}
