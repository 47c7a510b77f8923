//! Recursion-depth policy: how deep each figure may go, and how many shapes
//! and vertices a given depth produces.

use crate::fractals::common::FractalKind;

/// Upper bound on the number of vertices a single generation pass may emit.
pub const MAX_VERTEX_BUDGET: u64 = 1 << 24;

impl FractalKind {
    /// Largest depth the caller should ever request for this kind.
    pub fn max_depth(&self) -> u32 {
        match self {
            FractalKind::Cantor | FractalKind::Tree => 15,
            FractalKind::Carpet => 7,
            FractalKind::Sierpinski | FractalKind::Snowflake => 12,
        }
    }
}

/// Clamps a user-requested depth into `[0, kind.max_depth()]`.
pub fn clamp_depth(kind: FractalKind, requested: i64) -> u32 {
    requested.clamp(0, kind.max_depth() as i64) as u32
}

/**
 * Clamps a user-requested depth into `[0, kind.max_depth()]`, then lowers it
 * further until the output fits in `MAX_VERTEX_BUDGET`.
 */
pub fn clamp_depth_to_budget(kind: FractalKind, requested: i64) -> u32 {
    let limit = clamp_depth(kind, requested);
    (0..=limit)
        .rev()
        .find(|depth| expected_vertex_count(kind, *depth) <= MAX_VERTEX_BUDGET)
        .unwrap_or(0)
}

/**
 * Exact number of shapes emitted for `kind` at `depth`, saturating at
 * `u64::MAX`.
 */
pub fn expected_shape_count(kind: FractalKind, depth: u32) -> u64 {
    match kind {
        // One line (or square) per node of a full binary tree.
        FractalKind::Cantor | FractalKind::Tree => {
            depth
                .checked_add(1)
                .and_then(|nodes_exponent| 2_u64.checked_pow(nodes_exponent))
                .map_or(u64::MAX, |count| count - 1)
        }
        FractalKind::Sierpinski => 3_u64.saturating_pow(depth),
        FractalKind::Carpet => {
            let solid = 8_u64.saturating_pow(depth);
            solid.saturating_add((solid - 1) / 7)
        }
        FractalKind::Snowflake => 1,
    }
}

/**
 * Exact number of vertices emitted for `kind` at `depth` (two per line),
 * saturating at `u64::MAX`.
 */
pub fn expected_vertex_count(kind: FractalKind, depth: u32) -> u64 {
    match kind {
        FractalKind::Cantor => expected_shape_count(kind, depth).saturating_mul(2),
        FractalKind::Sierpinski => expected_shape_count(kind, depth).saturating_mul(3),
        FractalKind::Tree | FractalKind::Carpet => {
            expected_shape_count(kind, depth).saturating_mul(4)
        }
        FractalKind::Snowflake => 4_u64.saturating_pow(depth).saturating_mul(3),
    }
}
