use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::shape::{Rgba, Shape};

pub const DEFAULT_LINE_SPACING: f64 = 20.0;

fn default_line_spacing() -> f64 {
    DEFAULT_LINE_SPACING
}

/**
 * The interval `[start, end]` drawn at height `y`. Each recursion level is
 * drawn `line_spacing` further down the canvas than its parent.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CantorRegion {
    pub start: f64,
    pub end: f64,
    pub y: f64,
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f64,
}

impl CantorRegion {
    pub fn new(start: f64, end: f64, y: f64) -> CantorRegion {
        CantorRegion {
            start,
            end,
            y,
            line_spacing: DEFAULT_LINE_SPACING,
        }
    }
}

/// How each line of the Cantor figure is colored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum CantorStroke {
    Solid(Rgba),
    /// A fresh random opaque color per line, drawn from a seeded generator.
    Random { seed: u64 },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CantorStyle {
    pub stroke: CantorStroke,
    pub stroke_weight: f64,
}

impl Default for CantorStyle {
    fn default() -> CantorStyle {
        CantorStyle {
            stroke: CantorStroke::Random { seed: 0 },
            stroke_weight: 4.0,
        }
    }
}

enum LineColors {
    Solid(Rgba),
    Random(StdRng),
}

impl LineColors {
    fn new(stroke: &CantorStroke) -> LineColors {
        match stroke {
            CantorStroke::Solid(rgba) => LineColors::Solid(*rgba),
            CantorStroke::Random { seed } => LineColors::Random(StdRng::seed_from_u64(*seed)),
        }
    }

    fn next(&mut self) -> Rgba {
        match self {
            LineColors::Solid(rgba) => *rgba,
            LineColors::Random(rng) => [rng.gen(), rng.gen(), rng.gen(), 255],
        }
    }
}

struct CantorBuilder {
    line_spacing: f64,
    stroke_weight: f64,
    max_depth: u32,
    colors: LineColors,
    shapes: Vec<Shape>,
}

impl CantorBuilder {
    fn line(&mut self, start: f64, end: f64, y: f64) {
        let stroke_rgba = self.colors.next();
        self.shapes.push(Shape::Line {
            x1: start,
            x2: end,
            y,
            stroke_rgba,
            stroke_weight: self.stroke_weight,
        });
    }

    fn recurse(&mut self, start: f64, end: f64, y: f64, depth: u32) {
        if depth >= self.max_depth {
            self.line(start, end, y);
            return;
        }
        let third = (end - start) / 3.0;
        let child_y = y + self.line_spacing;
        self.recurse(start, start + third, child_y, depth + 1);
        self.recurse(start + 2.0 * third, end, child_y, depth + 1);
        self.line(start, end, y);
    }
}

/**
 * Draws every level of the Cantor construction as a stack of lines: the full
 * interval at the top, its outer thirds one `line_spacing` below, and so on
 * down to `max_depth`. Children are emitted before their parent, so the
 * figure contains `2^(max_depth + 1) - 1` lines.
 */
pub fn generate_cantor(region: &CantorRegion, max_depth: u32, style: &CantorStyle) -> Vec<Shape> {
    let mut builder = CantorBuilder {
        line_spacing: region.line_spacing,
        stroke_weight: style.stroke_weight,
        max_depth,
        colors: LineColors::new(&style.stroke),
        shapes: Vec::new(),
    };
    builder.recurse(region.start, region.end, region.y, 0);
    builder.shapes
}
