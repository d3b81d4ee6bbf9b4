//! Per-draw vertex transforms.
//!
//! The host supplies one [`VertexTransform`] with every draw call. Both
//! variants map an object-space vertex to projected space with X and Y
//! nominally in [-1, 1]; the caller guarantees the geometry stays in view, so
//! no clipping happens downstream.

use crate::math::{mat4::Mat4, vec3::Vec3, vec4::Vec4};

/// Transform descriptor applied to each vertex of a draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VertexTransform {
    /// Uniform scale on X and Y plus a per-axis offset.
    ///
    /// Z is translated but not scaled, so a shared piece of geometry can be
    /// stamped at several screen positions and depths.
    OffsetScale { offset: Vec3, scale: f32 },

    /// Full 4x4 world-view-projection matrix.
    ///
    /// The result's W component is dropped, never divided by. A perspective
    /// matrix therefore produces geometrically skewed but fully deterministic
    /// output; that is the contract, not an oversight.
    Matrix(Mat4),
}

impl VertexTransform {
    /// A transform that leaves vertices where they are.
    pub fn identity() -> Self {
        Self::OffsetScale {
            offset: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Map an object-space vertex to projected space.
    pub fn apply(&self, vertex: Vec3) -> Vec3 {
        match self {
            Self::OffsetScale { offset, scale } => Vec3::new(
                vertex.x * scale + offset.x,
                vertex.y * scale + offset.y,
                vertex.z + offset.z,
            ),
            Self::Matrix(matrix) => (*matrix * Vec4::from(vertex)).to_vec3(),
        }
    }
}
