//! Small set of planar geometry helpers shared by the fractal generators.
//!
//! All points live in canvas coordinates: x grows to the right and y grows
//! downward. A positive rotation therefore turns clockwise on screen.

pub type Point = nalgebra::Vector2<f64>;

/**
 * Rotates `point` about `center` by `angle_degrees`, using the standard
 * 2D rotation matrix.
 */
pub fn rotate_point(point: &Point, center: &Point, angle_degrees: f64) -> Point {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let delta = point - center;
    Point::new(
        center[0] + delta[0] * cos - delta[1] * sin,
        center[1] + delta[0] * sin + delta[1] * cos,
    )
}

pub fn equilateral_triangle_height(size: f64) -> f64 {
    size * 3.0_f64.sqrt() / 2.0
}

/**
 * Corners of the axis-aligned square centered on `center`, in the winding
 * order: bottom-left, bottom-right, top-right, top-left. "Bottom" is the
 * larger y value, because y points down the canvas.
 */
pub fn square_corners(center: &Point, half_size: f64) -> [Point; 4] {
    [
        Point::new(center[0] - half_size, center[1] + half_size),
        Point::new(center[0] + half_size, center[1] + half_size),
        Point::new(center[0] + half_size, center[1] - half_size),
        Point::new(center[0] - half_size, center[1] - half_size),
    ]
}

/**
 * Vertices of the upward-pointing equilateral triangle with its top vertex
 * at `apex`, ordered: apex, bottom-right, bottom-left.
 */
pub fn equilateral_triangle_vertices(apex: &Point, size: f64) -> [Point; 3] {
    let height = equilateral_triangle_height(size);
    [
        *apex,
        Point::new(apex[0] + 0.5 * size, apex[1] + height),
        Point::new(apex[0] - 0.5 * size, apex[1] + height),
    ]
}

/**
 * Axis-aligned bounding box of a set of points, returned as `(min, max)`.
 */
pub fn bounding_box(points: &[Point]) -> Option<(Point, Point)> {
    let first = points.first()?;
    let mut min_corner = *first;
    let mut max_corner = *first;
    for point in points.iter() {
        min_corner = min_corner.inf(point);
        max_corner = max_corner.sup(point);
    }
    Some((min_corner, max_corner))
}
