//! A from-scratch CPU triangle rasterizer that mirrors a hardware pipeline.
//!
//! The engine takes object-space vertices plus a per-draw transform and
//! produces a filled, depth-tested image: vertex transform, viewport mapping,
//! flat-top/flat-bottom triangle decomposition, scanline interpolation, and a
//! per-pixel depth comparison, all in plain memory. SDL2 is used only to put
//! the finished pixels on screen.
//!
//! # Quick Start
//!
//! ```ignore
//! use softras::prelude::*;
//!
//! let mut engine = Engine::new(1280, 720);
//! engine.clear(colors::BACKGROUND);
//! engine.draw_triangle(vertices, colors::WHITE, &VertexTransform::identity());
//! let frame = engine.output_frame(); // ARGB8888 bytes, ready to present
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod engine;
pub mod math;
pub mod transform;
pub mod viewport;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use engine::{Engine, OutputMode};
pub use render::RasterizerMode;
pub use transform::VertexTransform;
pub use viewport::Viewport;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softras::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::engine::{Engine, OutputMode};

    // Pipeline inputs
    pub use crate::render::RasterizerMode;
    pub use crate::transform::VertexTransform;
    pub use crate::viewport::Viewport;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Colors
    pub use crate::colors;

    // Window & presentation
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{FrameBuffer, RasterizerMode, ScanlineRasterizer, Triangle};
}
