//! Error types for fractal generation.

use crate::fractals::common::FractalKind;

/// Errors that can occur while generating the shapes of a fractal figure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FractalError {
    /// A depth, size or interval was outside of its valid domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The region descriptor belongs to a different kind of fractal.
    #[error("a `{region}` region cannot be used to generate a `{kind}` figure")]
    RegionMismatch {
        kind: FractalKind,
        region: FractalKind,
    },

    /// The requested depth would emit more vertices than the generator allows.
    #[error("`{kind}` at depth {depth} emits {vertex_count} vertices, over the budget of {budget}")]
    ShapeBudgetExceeded {
        kind: FractalKind,
        depth: u32,
        vertex_count: u64,
        budget: u64,
    },
}

impl FractalError {
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> FractalError {
        FractalError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
