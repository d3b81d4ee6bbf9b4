//! Scanline triangle rasterization.
//!
//! Implements the classic flat-top/flat-bottom decomposition: sort the three
//! vertices by Y, synthesize a fourth vertex on the long edge at the middle
//! vertex's height, then fill the two resulting sub-triangles one horizontal
//! scanline at a time.
//!
//! ```text
//!        v1                   v1
//!        /\                   /\
//!       /  \                 /  \
//!      / v2 \       =>      v2---v4   <- split at v2.y
//!      \     \               \   /
//!       \     \               \ /
//!        \_____\               v3
//!              v3
//! ```
//!
//! Sampling follows the pixel-center convention: scanlines and spans step
//! through `round(coord) + 0.5`, never the pixel corner. All interpolation is
//! driven by a single fraction measured from the sub-triangle's apex toward
//! the shared horizontal edge, so X bounds and depth stay consistent on both
//! sides of the split.

use super::{RasterizerMode, Triangle};
use crate::math::{lerp, remap, vec3::Vec3};
use crate::render::framebuffer::FrameBuffer;

/// Depth-tested scanline rasterizer.
///
/// Vertices may arrive in any order; sorting happens internally. Degenerate
/// triangles (zero height after sorting) are skipped outright rather than
/// letting the split fraction divide by zero.
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Fill a screen-space triangle into the frame buffer.
    ///
    /// `mode` selects which halves of the decomposition are rendered; the
    /// per-pixel depth test happens inside the buffer write.
    pub fn fill_triangle(
        &self,
        triangle: &Triangle,
        mode: RasterizerMode,
        buffer: &mut FrameBuffer,
    ) {
        let [mut v1, mut v2, mut v3] = triangle.points;
        Self::sort_by_y(&mut v1, &mut v2, &mut v3);

        let Some(v4) = Self::split_vertex(v1, v2, v3) else {
            return;
        };

        if mode.fills_top() {
            Self::fill_flat_bottom(v1, v2, v4, triangle.color, buffer);
        }
        if mode.fills_bottom() {
            Self::fill_flat_top(v3, v2, v4, triangle.color, buffer);
        }
    }

    /// Sort three vertices ascending by Y with pairwise compare-and-swap.
    /// Afterward `v1.y <= v2.y <= v3.y`.
    fn sort_by_y(v1: &mut Vec3, v2: &mut Vec3, v3: &mut Vec3) {
        if v1.y > v2.y {
            std::mem::swap(v1, v2);
        }
        if v1.y > v3.y {
            std::mem::swap(v1, v3);
        }
        if v2.y > v3.y {
            std::mem::swap(v2, v3);
        }
    }

    /// Synthesize the vertex that splits a Y-sorted triangle into two halves
    /// sharing a horizontal edge with `v2`.
    ///
    /// Returns `None` for a zero-height triangle, where the split fraction
    /// has nothing to divide by.
    fn split_vertex(v1: Vec3, v2: Vec3, v3: Vec3) -> Option<Vec3> {
        if (v3.y - v1.y).abs() < f32::EPSILON {
            return None;
        }
        let s = remap(v1.y, v3.y, v2.y);
        Some(Vec3::new(lerp(v1.x, v3.x, s), v2.y, lerp(v1.z, v3.z, s)))
    }

    /// Fill the upper half: apex `v1` above the horizontal edge `v2`-`v4`.
    fn fill_flat_bottom(v1: Vec3, v2: Vec3, v4: Vec3, color: u32, buffer: &mut FrameBuffer) {
        debug_assert!(v2.y == v4.y);
        debug_assert!(v1.y <= v2.y);

        let mut y = v1.y.round() + 0.5;
        let y_end = v2.y.round() + 0.5;
        while y < y_end {
            Self::fill_scanline(v1, v2, v4, color, y, buffer);
            y += 1.0;
        }
    }

    /// Fill the lower half: apex `v3` below the horizontal edge `v2`-`v4`.
    fn fill_flat_top(v3: Vec3, v2: Vec3, v4: Vec3, color: u32, buffer: &mut FrameBuffer) {
        debug_assert!(v2.y == v4.y);
        debug_assert!(v3.y >= v2.y);

        let mut y = v2.y.round() + 0.5;
        let y_end = v3.y.round() + 0.5;
        while y < y_end {
            Self::fill_scanline(v3, v2, v4, color, y, buffer);
            y += 1.0;
        }
    }

    /// Compute one scanline of a sub-triangle and hand it to the span walker.
    ///
    /// A single fraction from the apex toward the horizontal edge drives all
    /// four interpolants (both X bounds and both depths), which keeps the two
    /// halves consistent along their shared edge.
    fn fill_scanline(apex: Vec3, v2: Vec3, v4: Vec3, color: u32, y: f32, buffer: &mut FrameBuffer) {
        let s = remap(apex.y, v2.y, y);
        let x0 = lerp(apex.x, v2.x, s);
        let x1 = lerp(apex.x, v4.x, s);
        let d0 = lerp(apex.z, v2.z, s);
        let d1 = lerp(apex.z, v4.z, s);
        Self::draw_span(y, x0, x1, d0, d1, color, buffer);
    }

    /// Walk pixel centers across a horizontal span, depth-testing each sample.
    fn draw_span(
        y: f32,
        x0: f32,
        x1: f32,
        d0: f32,
        d1: f32,
        color: u32,
        buffer: &mut FrameBuffer,
    ) {
        let left = x0.min(x1);
        let right = x0.max(x1);

        let mut x = left.round() + 0.5;
        let x_end = right.round() + 0.5;
        while x < x_end {
            // Remap against (x0, x1) rather than (left, right) so each depth
            // endpoint stays paired with its own edge when the span runs
            // right-to-left
            let depth = lerp(d0, d1, remap(x0, x1, x));
            // floor, not truncation: centers left of the surface must map to
            // negative columns so the bounds check rejects them
            buffer.set_pixel_depth_tested(x.floor() as i32, y.floor() as i32, depth, color);
            x += 1.0;
        }
    }
}

impl Default for ScanlineRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::framebuffer::FAR_DEPTH;
    use approx::assert_relative_eq;

    const W: u32 = 32;
    const H: u32 = 32;

    fn buffers() -> (Vec<u32>, Vec<f32>) {
        (
            vec![0u32; (W * H) as usize],
            vec![FAR_DEPTH; (W * H) as usize],
        )
    }

    fn fill(
        color: &mut [u32],
        depth: &mut [f32],
        points: [Vec3; 3],
        argb: u32,
        mode: RasterizerMode,
    ) {
        let mut fb = FrameBuffer::new(color, depth, W, H);
        ScanlineRasterizer::new().fill_triangle(&Triangle::new(points, argb), mode, &mut fb);
    }

    #[test]
    fn sort_orders_any_permutation_by_y() {
        let a = Vec3::new(5.0, 1.0, 0.0);
        let b = Vec3::new(3.0, 2.0, 0.0);
        let c = Vec3::new(1.0, 3.0, 0.0);
        for perm in [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]] {
            let [mut v1, mut v2, mut v3] = perm;
            ScanlineRasterizer::sort_by_y(&mut v1, &mut v2, &mut v3);
            assert!(v1.y <= v2.y && v2.y <= v3.y);
        }
    }

    #[test]
    fn split_vertex_lands_on_the_long_edge() {
        let v1 = Vec3::new(0.0, 0.0, 0.0);
        let v2 = Vec3::new(2.0, 5.0, 1.0);
        let v3 = Vec3::new(10.0, 10.0, 2.0);

        let v4 = ScanlineRasterizer::split_vertex(v1, v2, v3).unwrap();
        assert_relative_eq!(v4.y, 5.0);
        assert_relative_eq!(v4.x, 5.0);
        assert_relative_eq!(v4.z, 1.0);
    }

    #[test]
    fn zero_height_triangle_leaves_buffers_untouched() {
        let (mut color, mut depth) = buffers();
        let flat = [
            Vec3::new(2.0, 10.0, 0.1),
            Vec3::new(12.0, 10.0, 0.2),
            Vec3::new(25.0, 10.0, 0.3),
        ];
        fill(&mut color, &mut depth, flat, 0xFFFF0000, RasterizerMode::Both);

        assert!(color.iter().all(|&p| p == 0));
        assert!(depth.iter().all(|&d| d == FAR_DEPTH));
    }

    #[test]
    fn fills_interior_pixels_of_a_simple_triangle() {
        let (mut color, mut depth) = buffers();
        let tri = [
            Vec3::new(4.0, 4.0, 0.5),
            Vec3::new(28.0, 4.0, 0.5),
            Vec3::new(16.0, 28.0, 0.5),
        ];
        fill(&mut color, &mut depth, tri, 0xFFFF0000, RasterizerMode::Both);

        let center = (16 * W + 16) as usize;
        assert_eq!(color[center], 0xFFFF0000);
        assert!(depth[center] < FAR_DEPTH);
        // A corner well outside the triangle stays untouched
        assert_eq!(color[0], 0);
    }

    #[test]
    fn top_and_bottom_modes_together_cover_exactly_the_both_mode() {
        let tri = [
            Vec3::new(6.0, 3.0, 0.4),
            Vec3::new(27.0, 14.0, 0.4),
            Vec3::new(3.0, 29.0, 0.4),
        ];

        let (mut halves_color, mut halves_depth) = buffers();
        fill(
            &mut halves_color,
            &mut halves_depth,
            tri,
            0xFFFF0000,
            RasterizerMode::Top,
        );
        fill(
            &mut halves_color,
            &mut halves_depth,
            tri,
            0xFFFF0000,
            RasterizerMode::Bottom,
        );

        let (mut both_color, mut both_depth) = buffers();
        fill(
            &mut both_color,
            &mut both_depth,
            tri,
            0xFFFF0000,
            RasterizerMode::Both,
        );

        assert_eq!(halves_color, both_color);
        assert_eq!(halves_depth, both_depth);
    }

    #[test]
    fn overlapping_triangles_resolve_to_the_nearer_regardless_of_order() {
        let near = [
            Vec3::new(4.0, 4.0, 0.2),
            Vec3::new(28.0, 4.0, 0.2),
            Vec3::new(16.0, 28.0, 0.2),
        ];
        let far = [
            Vec3::new(4.0, 4.0, 0.8),
            Vec3::new(28.0, 4.0, 0.8),
            Vec3::new(16.0, 28.0, 0.8),
        ];
        let probe = (16 * W + 16) as usize;

        // Nearer first: the farther triangle must not overwrite it
        let (mut color, mut depth) = buffers();
        fill(&mut color, &mut depth, near, 0xFFFF0000, RasterizerMode::Both);
        fill(&mut color, &mut depth, far, 0xFF0000FF, RasterizerMode::Both);
        assert_eq!(color[probe], 0xFFFF0000);

        // Farther first: the nearer triangle wins the depth test
        let (mut color, mut depth) = buffers();
        fill(&mut color, &mut depth, far, 0xFF0000FF, RasterizerMode::Both);
        fill(&mut color, &mut depth, near, 0xFFFF0000, RasterizerMode::Both);
        assert_eq!(color[probe], 0xFFFF0000);
    }

    #[test]
    fn depth_varies_along_a_nonplanar_span() {
        // Triangle tilted in depth: left edge near, right edge far
        let tri = [
            Vec3::new(2.0, 8.0, 0.0),
            Vec3::new(30.0, 8.0, 1.0),
            Vec3::new(16.0, 30.0, 0.5),
        ];
        let (mut color, mut depth) = buffers();
        fill(&mut color, &mut depth, tri, 0xFFFF0000, RasterizerMode::Both);

        let row = 16usize;
        let left = depth[row * W as usize + 10];
        let right = depth[row * W as usize + 22];
        assert!(left < FAR_DEPTH && right < FAR_DEPTH);
        assert!(left < right, "depth should increase toward the far edge");
    }
}
