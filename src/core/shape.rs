use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::geometry::{bounding_box, Point};

/// RGBA color, one byte per channel.
pub type Rgba = [u8; 4];

/**
 * A drawable primitive emitted by one of the fractal generators. Shapes are
 * plain data: they carry their geometry (canvas coordinates) and their style,
 * and are turned into pixels or vector output by a `RenderSink`.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Shape {
    /// Horizontal segment from `x1` to `x2` at height `y`.
    Line {
        x1: f64,
        x2: f64,
        y: f64,
        stroke_rgba: Rgba,
        stroke_weight: f64,
    },
    Triangle {
        vertices: [Point; 3],
        fill_rgba: Rgba,
    },
    Square {
        vertices: [Point; 4],
        stroke_rgba: Rgba,
        fill_rgba: Rgba,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill_rgba: Rgba,
    },
    /// Closed outline; may be concave.
    Polygon {
        vertices: Vec<Point>,
        stroke_rgba: Rgba,
        fill_rgba: Rgba,
    },
}

impl Shape {
    pub fn vertex_count(&self) -> usize {
        match self {
            Shape::Line { .. } => 2,
            Shape::Triangle { .. } => 3,
            Shape::Square { .. } | Shape::Rect { .. } => 4,
            Shape::Polygon { vertices, .. } => vertices.len(),
        }
    }

    /**
     * Outline of the shape as a closed polygon. Lines are returned as the
     * two end points of their center line.
     */
    pub fn outline(&self) -> Vec<Point> {
        match self {
            Shape::Line { x1, x2, y, .. } => vec![Point::new(*x1, *y), Point::new(*x2, *y)],
            Shape::Triangle { vertices, .. } => vertices.to_vec(),
            Shape::Square { vertices, .. } => vertices.to_vec(),
            Shape::Rect {
                x,
                y,
                width,
                height,
                ..
            } => vec![
                Point::new(*x, *y),
                Point::new(x + width, *y),
                Point::new(x + width, y + height),
                Point::new(*x, y + height),
            ],
            Shape::Polygon { vertices, .. } => vertices.clone(),
        }
    }

    /// Axis-aligned bounds as `(min, max)`, ignoring stroke width.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        bounding_box(&self.outline())
    }
}

/**
 * SHA-256 digest (lower-case hex) of the serialized shape sequence. Two
 * generation passes with identical inputs produce identical fingerprints.
 */
pub fn shape_fingerprint(shapes: &[Shape]) -> Result<String, serde_json::Error> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(shapes)?);
    Ok(format!("{:x}", hasher.finalize()))
}
