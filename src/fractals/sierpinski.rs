use serde::{Deserialize, Serialize};

use crate::core::geometry::{equilateral_triangle_height, equilateral_triangle_vertices, Point};
use crate::core::shape::{Rgba, Shape};

/**
 * An upward-pointing equilateral triangle, described by its top vertex and
 * the length of its sides.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TriangleRegion {
    pub apex: Point,
    pub size: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SierpinskiStyle {
    pub fill_rgba: Rgba,
}

impl Default for SierpinskiStyle {
    fn default() -> SierpinskiStyle {
        SierpinskiStyle {
            fill_rgba: [0, 0, 255, 255],
        }
    }
}

fn sierpinski_recursive(
    apex: Point,
    size: f64,
    depth: u32,
    style: &SierpinskiStyle,
    shapes: &mut Vec<Shape>,
) {
    if depth == 0 {
        shapes.push(Shape::Triangle {
            vertices: equilateral_triangle_vertices(&apex, size),
            fill_rgba: style.fill_rgba,
        });
        return;
    }
    let half_size = 0.5 * size;
    let half_height = 0.5 * equilateral_triangle_height(size);
    let quarter_size = 0.25 * size;

    sierpinski_recursive(apex, half_size, depth - 1, style, shapes);
    sierpinski_recursive(
        apex + Point::new(-quarter_size, half_height),
        half_size,
        depth - 1,
        style,
        shapes,
    );
    sierpinski_recursive(
        apex + Point::new(quarter_size, half_height),
        half_size,
        depth - 1,
        style,
        shapes,
    );
}

/**
 * Only the leaf triangles are emitted: the central hole of each subdivision
 * is the gap left between its three children. Depth `d` yields `3^d`
 * triangles, ordered top, bottom-left, bottom-right at every level.
 */
pub fn generate_sierpinski(
    region: &TriangleRegion,
    depth: u32,
    style: &SierpinskiStyle,
) -> Vec<Shape> {
    let mut shapes = Vec::new();
    sierpinski_recursive(region.apex, region.size, depth, style, &mut shapes);
    shapes
}
