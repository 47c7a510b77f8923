use serde::{Deserialize, Serialize};

use crate::core::geometry::{equilateral_triangle_vertices, rotate_point, Point};
use crate::core::shape::{Rgba, Shape};
use crate::fractals::sierpinski::TriangleRegion;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SnowflakeStyle {
    pub fill_rgba: Rgba,
    pub stroke_rgba: Rgba,
}

impl Default for SnowflakeStyle {
    fn default() -> SnowflakeStyle {
        SnowflakeStyle {
            fill_rgba: [173, 216, 230, 255],
            stroke_rgba: [0, 0, 255, 255],
        }
    }
}

/**
 * Appends the Koch curve from `start` towards `end`, excluding `end` itself.
 * Each level replaces the edge by four edges a third as long, with the middle
 * two folded out into a bump. The bump points to the left of the direction of
 * travel (in y-down coordinates), which is outside of a triangle traversed
 * apex, bottom-right, bottom-left.
 */
fn koch_edge(start: Point, end: Point, depth: u32, vertices: &mut Vec<Point>) {
    if depth == 0 {
        vertices.push(start);
        return;
    }
    let step = (end - start) / 3.0;
    let first_third = start + step;
    let second_third = start + 2.0 * step;
    let peak = rotate_point(&second_third, &first_third, -60.0);

    koch_edge(start, first_third, depth - 1, vertices);
    koch_edge(first_third, peak, depth - 1, vertices);
    koch_edge(peak, second_third, depth - 1, vertices);
    koch_edge(second_third, end, depth - 1, vertices);
}

/**
 * Koch snowflake grown from the equilateral triangle described by `region`.
 * The whole outline is emitted as a single closed polygon with
 * `3 * 4^depth` vertices.
 */
pub fn generate_snowflake(region: &TriangleRegion, depth: u32, style: &SnowflakeStyle) -> Vec<Shape> {
    let corners = equilateral_triangle_vertices(&region.apex, region.size);
    let mut vertices = Vec::new();
    for k in 0..corners.len() {
        koch_edge(corners[k], corners[(k + 1) % corners.len()], depth, &mut vertices);
    }
    vec![Shape::Polygon {
        vertices,
        stroke_rgba: style.stroke_rgba,
        fill_rgba: style.fill_rgba,
    }]
}
