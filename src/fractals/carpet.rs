use serde::{Deserialize, Serialize};

use crate::core::geometry::Point;
use crate::core::shape::{Rgba, Shape};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CarpetRegion {
    pub top_left: Point,
    pub size: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CarpetStyle {
    pub fill_rgba: Rgba,
    /// Color of the removed center cells; normally the background color.
    pub hole_rgba: Rgba,
}

impl Default for CarpetStyle {
    fn default() -> CarpetStyle {
        CarpetStyle {
            fill_rgba: [128, 0, 128, 255],
            hole_rgba: [255, 255, 255, 255],
        }
    }
}

fn square(top_left: &Point, size: f64, fill_rgba: Rgba) -> Shape {
    Shape::Rect {
        x: top_left[0],
        y: top_left[1],
        width: size,
        height: size,
        fill_rgba,
    }
}

fn carpet_recursive(
    top_left: Point,
    size: f64,
    depth: u32,
    style: &CarpetStyle,
    shapes: &mut Vec<Shape>,
) {
    if depth == 0 {
        shapes.push(square(&top_left, size, style.fill_rgba));
        return;
    }
    let third = size / 3.0;
    for row in 0..3 {
        for col in 0..3 {
            if row == 1 && col == 1 {
                continue;
            }
            let cell = top_left + Point::new(col as f64 * third, row as f64 * third);
            carpet_recursive(cell, third, depth - 1, style, shapes);
        }
    }
    let center = top_left + Point::new(third, third);
    shapes.push(square(&center, third, style.hole_rgba));
}

/**
 * Splits the square into a 3x3 grid, recurses into the eight outer cells
 * (row-major) and then paints the center cell with the hole color. Holes are
 * only ever painted inside a cell that would otherwise be solid, so nothing
 * is drawn outside of the region.
 *
 * Depth `d` yields `8^d` solid squares and `(8^d - 1) / 7` holes.
 */
pub fn generate_carpet(region: &CarpetRegion, depth: u32, style: &CarpetStyle) -> Vec<Shape> {
    let mut shapes = Vec::new();
    carpet_recursive(region.top_left, region.size, depth, style, &mut shapes);
    shapes
}
