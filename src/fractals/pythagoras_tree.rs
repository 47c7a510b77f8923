use serde::{Deserialize, Serialize};

use crate::core::geometry::{rotate_point, square_corners, Point};
use crate::core::shape::{Rgba, Shape};

/// Angle between a square and each of its two children.
pub const BRANCH_ANGLE_DEGREES: f64 = 45.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TreeRegion {
    pub center: Point,
    pub size: f64,
    pub rotation_degrees: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TreeStyle {
    pub fill_rgba: Rgba,
    pub stroke_rgba: Rgba,
}

impl Default for TreeStyle {
    fn default() -> TreeStyle {
        TreeStyle {
            fill_rgba: [165, 42, 42, 255],
            stroke_rgba: [0, 128, 0, 255],
        }
    }
}

/// Side length of the squares `depth` levels below a square of `initial_size`.
pub fn square_size_at_depth(initial_size: f64, depth: u32) -> f64 {
    initial_size / std::f64::consts::SQRT_2.powi(depth as i32)
}

struct TreeBuilder<'a> {
    max_depth: u32,
    style: &'a TreeStyle,
    shapes: Vec<Shape>,
}

impl TreeBuilder<'_> {
    fn recurse(&mut self, center: Point, size: f64, rotation_degrees: f64, depth: u32) {
        let vertices =
            square_corners(&center, 0.5 * size).map(|corner| rotate_point(&corner, &center, rotation_degrees));
        self.shapes.push(Shape::Square {
            vertices,
            stroke_rgba: self.style.stroke_rgba,
            fill_rgba: self.style.fill_rgba,
        });

        if depth >= self.max_depth {
            return;
        }

        // Children sit one child-size away from this center, along their own heading.
        let child_size = size / std::f64::consts::SQRT_2;
        for branch in [BRANCH_ANGLE_DEGREES, -BRANCH_ANGLE_DEGREES] {
            let child_rotation = rotation_degrees + branch;
            let (sin, cos) = child_rotation.to_radians().sin_cos();
            let child_center = center + child_size * Point::new(cos, sin);
            self.recurse(child_center, child_size, child_rotation, depth + 1);
        }
    }
}

/**
 * Box tree: every square is drawn, then spawns two squares `1/sqrt(2)` its
 * size, rotated by `+45` and `-45` degrees. The squares are emitted in
 * pre-order (parent, then the `+45` subtree, then the `-45` subtree), for a
 * total of `2^(max_depth + 1) - 1` squares.
 */
pub fn generate_tree(region: &TreeRegion, max_depth: u32, style: &TreeStyle) -> Vec<Shape> {
    let mut builder = TreeBuilder {
        max_depth,
        style,
        shapes: Vec::new(),
    };
    builder.recurse(region.center, region.size, region.rotation_degrees, 0);
    builder.shapes
}
