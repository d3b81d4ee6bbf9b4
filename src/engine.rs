//! Core rendering engine.
//!
//! The [`Engine`] struct is the entry point of the software pipeline. It owns
//! the color and depth buffers, the viewport derived from their size, and the
//! two debug mode toggles, and exposes the draw commands the host frame loop
//! drives: clear, draw a triangle, cycle a mode, fetch the output buffer.

use std::path::Path;

use crate::colors;
use crate::math::vec3::Vec3;
use crate::render::{RasterizerMode, Renderer, ScanlineRasterizer, Triangle};
use crate::transform::VertexTransform;
use crate::viewport::Viewport;

/// Which buffer is handed to presentation at the end of a frame.
///
/// Presenting the depth buffer directly is a debug aid for judging whether
/// depth interpolation behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Color,
    Depth,
}

impl OutputMode {
    /// Advance to the next mode: Color -> Depth -> Color.
    pub fn cycle(self) -> Self {
        match self {
            OutputMode::Color => OutputMode::Depth,
            OutputMode::Depth => OutputMode::Color,
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Color => write!(f, "Color"),
            OutputMode::Depth => write!(f, "Depth"),
        }
    }
}

pub struct Engine {
    renderer: Renderer,
    rasterizer: ScanlineRasterizer,
    viewport: Viewport,
    rasterizer_mode: RasterizerMode,
    output_mode: OutputMode,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
            rasterizer: ScanlineRasterizer::new(),
            viewport: Viewport::from_size(width, height),
            rasterizer_mode: RasterizerMode::default(),
            output_mode: OutputMode::default(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.viewport = Viewport::from_size(width, height);
    }

    pub fn width(&self) -> u32 {
        self.renderer.width()
    }

    pub fn height(&self) -> u32 {
        self.renderer.height()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Begin a frame: color buffer to `background`, depth buffer to far.
    pub fn clear(&mut self, background: u32) {
        self.renderer.clear(background);
    }

    /// Transform, viewport-map, and rasterize one flat-colored triangle.
    ///
    /// The three vertices are object-space positions; `transform` maps them to
    /// projected space and the engine's viewport maps those to screen space.
    pub fn draw_triangle(&mut self, vertices: [Vec3; 3], color: u32, transform: &VertexTransform) {
        let points = vertices.map(|v| self.viewport.to_screen(transform.apply(v)));
        let triangle = Triangle::new(points, color);

        let mut buffer = self.renderer.as_framebuffer();
        self.rasterizer
            .fill_triangle(&triangle, self.rasterizer_mode, &mut buffer);
    }

    pub fn rasterizer_mode(&self) -> RasterizerMode {
        self.rasterizer_mode
    }

    pub fn cycle_rasterizer_mode(&mut self) {
        self.rasterizer_mode = self.rasterizer_mode.cycle();
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn cycle_output_mode(&mut self) {
        self.output_mode = self.output_mode.cycle();
    }

    /// The buffer selected by the output mode, as ARGB8888 bytes ready for a
    /// 4-bytes-per-pixel presentation copy.
    pub fn output_frame(&mut self) -> &[u8] {
        match self.output_mode {
            OutputMode::Color => self.renderer.color_bytes(),
            OutputMode::Depth => self.renderer.depth_bytes(),
        }
    }

    /// Color at pixel (x, y), or None if out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.renderer.pixel(x, y)
    }

    /// Depth sample at pixel (x, y), or None if out of bounds.
    pub fn depth(&self, x: i32, y: i32) -> Option<f32> {
        self.renderer.depth(x, y)
    }

    /// Save the buffer selected by the output mode as a PNG.
    pub fn save_frame(&mut self, path: &Path) -> Result<(), String> {
        let (width, height) = (self.width(), self.height());
        let pixels = match self.output_mode {
            OutputMode::Color => self.renderer.color_pixels().to_vec(),
            OutputMode::Depth => self.renderer.depth_pixels().to_vec(),
        };
        let rgba = colors::argb_to_rgba_bytes(&pixels);
        image::save_buffer(path, &rgba, width, height, image::ExtendedColorType::Rgba8)
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // An equilateral-ish triangle around the NDC origin; covers the surface
    // center for any reasonable buffer size
    const CENTER_TRIANGLE: [Vec3; 3] = [
        Vec3::new(-0.5, -0.5, 0.0),
        Vec3::new(0.5, -0.5, 0.0),
        Vec3::new(0.0, 0.5, 0.0),
    ];

    fn at_depth(z: f32) -> [Vec3; 3] {
        CENTER_TRIANGLE.map(|v| Vec3::new(v.x, v.y, z))
    }

    #[test]
    fn clear_is_idempotent_and_forgets_draws() {
        let mut engine = Engine::new(64, 64);
        engine.draw_triangle(at_depth(0.3), colors::RED, &VertexTransform::identity());

        engine.clear(colors::BACKGROUND);
        engine.clear(colors::BACKGROUND);

        for (x, y) in [(0, 0), (32, 32), (63, 63)] {
            assert_eq!(engine.pixel(x, y), Some(colors::BACKGROUND));
        }
    }

    #[test]
    fn final_color_reflects_the_minimum_depth_triangle() {
        let identity = VertexTransform::identity();

        // Nearer drawn first
        let mut engine = Engine::new(64, 64);
        engine.clear(colors::BACKGROUND);
        engine.draw_triangle(at_depth(0.2), colors::RED, &identity);
        engine.draw_triangle(at_depth(0.8), colors::BLUE, &identity);
        assert_eq!(engine.pixel(32, 32), Some(colors::RED));

        // Nearer drawn second
        let mut engine = Engine::new(64, 64);
        engine.clear(colors::BACKGROUND);
        engine.draw_triangle(at_depth(0.8), colors::BLUE, &identity);
        engine.draw_triangle(at_depth(0.2), colors::RED, &identity);
        assert_eq!(engine.pixel(32, 32), Some(colors::RED));
    }

    #[test]
    fn degenerate_triangle_mutates_nothing() {
        let mut engine = Engine::new(64, 64);
        engine.clear(colors::BACKGROUND);

        // All three vertices share a Y, so the split is undefined and the
        // draw must be skipped wholesale
        let flat = [
            Vec3::new(-0.5, 0.0, 0.1),
            Vec3::new(0.0, 0.0, 0.2),
            Vec3::new(0.5, 0.0, 0.3),
        ];
        engine.draw_triangle(flat, colors::RED, &VertexTransform::identity());

        for y in 0..64 {
            for x in 0..64 {
                assert_eq!(engine.pixel(x, y), Some(colors::BACKGROUND));
                assert_eq!(engine.depth(x, y), Some(1.0));
            }
        }
    }

    #[test]
    fn rasterizer_mode_cycles_with_period_three() {
        let mut engine = Engine::new(8, 8);
        let start = engine.rasterizer_mode();
        engine.cycle_rasterizer_mode();
        assert_ne!(engine.rasterizer_mode(), start);
        engine.cycle_rasterizer_mode();
        engine.cycle_rasterizer_mode();
        assert_eq!(engine.rasterizer_mode(), start);
    }

    #[test]
    fn output_mode_cycles_with_period_two() {
        let mut engine = Engine::new(8, 8);
        let start = engine.output_mode();
        engine.cycle_output_mode();
        assert_ne!(engine.output_mode(), start);
        engine.cycle_output_mode();
        assert_eq!(engine.output_mode(), start);
    }

    #[test]
    fn output_frame_switches_buffers_with_the_mode() {
        let mut engine = Engine::new(16, 16);
        engine.clear(colors::BACKGROUND);

        // Color mode: background pixels
        let frame = engine.output_frame();
        assert_eq!(&frame[0..4], &[0xB2, 0x67, 0x20, 0xFF]);

        // Depth mode: far sentinel renders white
        engine.cycle_output_mode();
        let frame = engine.output_frame();
        assert_eq!(&frame[0..4], &[0xFF, 0xFF, 0xFF, 0xFF]);
    }
}
