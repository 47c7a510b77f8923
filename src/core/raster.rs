//! Rasterizes shapes into an in-memory RGBA image, which can then be written
//! to a PNG file. Shapes are given in canvas coordinates, which map one-to-one
//! onto pixels: pixel `(i, j)` covers `[i, i+1) x [j, j+1)` and is painted when
//! its center lies inside the shape.

use std::ops::Range;
use std::path::Path;

use rayon::prelude::*;

use crate::core::geometry::Point;
use crate::core::render_sink::RenderSink;
use crate::core::shape::{Rgba, Shape};

// Shapes spanning fewer rows than this are filled on the calling thread.
const PARALLEL_ROW_THRESHOLD: usize = 64;

// Distance between samples when tracing an outline, in pixels.
const OUTLINE_SAMPLE_STEP: f64 = 0.5;

pub struct RasterSink {
    image: image::RgbaImage,
    background: image::Rgba<u8>,
}

impl RasterSink {
    pub fn new(resolution: &nalgebra::Vector2<u32>, background_rgba: Rgba) -> RasterSink {
        let background = image::Rgba(background_rgba);
        RasterSink {
            image: image::RgbaImage::from_pixel(resolution[0], resolution[1], background),
            background,
        }
    }

    pub fn image(&self) -> &image::RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> image::RgbaImage {
        self.image
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.image.save(path)
    }

    fn row_range(&self, y_min: f64, y_max: f64) -> Range<usize> {
        pixel_range(y_min, y_max, self.image.height() as usize)
    }

    /**
     * Paints every pixel in `rows` whose center falls inside one of the
     * horizontal spans returned by `spans` for that row index.
     */
    fn fill_rows<F>(&mut self, rows: Range<usize>, color: image::Rgba<u8>, spans: F)
    where
        F: Fn(usize) -> Vec<(f64, f64)> + Sync,
    {
        if rows.is_empty() {
            return;
        }
        let width = self.image.width() as usize;
        let row_stride = 4 * width;
        let first_row = rows.start;
        let row_count = rows.len();
        let buffer: &mut [u8] = &mut self.image;
        let block = &mut buffer[first_row * row_stride..rows.end * row_stride];

        let fill_row = |(offset, row): (usize, &mut [u8])| {
            for (x_start, x_end) in spans(first_row + offset) {
                for i in pixel_range(x_start, x_end, width) {
                    row[4 * i..4 * i + 4].copy_from_slice(&color.0);
                }
            }
        };

        if row_count >= PARALLEL_ROW_THRESHOLD {
            block
                .par_chunks_mut(row_stride)
                .enumerate()
                .for_each(fill_row);
        } else {
            block.chunks_mut(row_stride).enumerate().for_each(fill_row);
        }
    }

    fn fill_rect(&mut self, min: Point, max: Point, color: image::Rgba<u8>) {
        let rows = self.row_range(min[1], max[1]);
        self.fill_rows(rows, color, |_| vec![(min[0], max[0])]);
    }

    fn fill_polygon(&mut self, vertices: &[Point], color: image::Rgba<u8>) {
        if vertices.len() < 3 {
            return;
        }
        let y_min = vertices.iter().map(|v| v[1]).fold(f64::INFINITY, f64::min);
        let y_max = vertices.iter().map(|v| v[1]).fold(f64::NEG_INFINITY, f64::max);
        let rows = self.row_range(y_min, y_max);
        let first_row = rows.start;
        let table = scanline_crossings(vertices, rows.clone());
        self.fill_rows(rows, color, |row| even_odd_spans(&table[row - first_row]));
    }

    fn stroke_polygon(&mut self, vertices: &[Point], color: image::Rgba<u8>) {
        let count = vertices.len();
        let width = self.image.width() as f64;
        let height = self.image.height() as f64;
        for k in 0..count {
            let (start, end) =
                match clip_segment(vertices[k], vertices[(k + 1) % count], width, height) {
                    Some(segment) => segment,
                    None => continue,
                };
            let length = (end - start).norm();
            let steps = (length / OUTLINE_SAMPLE_STEP).ceil().max(1.0) as usize;
            for s in 0..=steps {
                let point = start + (end - start) * (s as f64 / steps as f64);
                self.put_pixel(&point, color);
            }
        }
    }

    fn put_pixel(&mut self, point: &Point, color: image::Rgba<u8>) {
        let (x, y) = (point[0].floor(), point[1].floor());
        if x < 0.0 || y < 0.0 {
            return;
        }
        if let Some(pixel) = self.image.get_pixel_mut_checked(x as u32, y as u32) {
            *pixel = color;
        }
    }
}

impl RenderSink for RasterSink {
    fn clear(&mut self) {
        let background = self.background;
        for pixel in self.image.pixels_mut() {
            *pixel = background;
        }
    }

    fn draw(&mut self, shape: Shape) {
        match shape {
            Shape::Line {
                x1,
                x2,
                y,
                stroke_rgba,
                stroke_weight,
            } => {
                let half_weight = 0.5 * stroke_weight;
                self.fill_rect(
                    Point::new(x1.min(x2), y - half_weight),
                    Point::new(x1.max(x2), y + half_weight),
                    image::Rgba(stroke_rgba),
                );
            }
            Shape::Triangle {
                vertices,
                fill_rgba,
            } => self.fill_polygon(&vertices, image::Rgba(fill_rgba)),
            Shape::Square {
                vertices,
                stroke_rgba,
                fill_rgba,
            } => {
                self.fill_polygon(&vertices, image::Rgba(fill_rgba));
                self.stroke_polygon(&vertices, image::Rgba(stroke_rgba));
            }
            Shape::Rect {
                x,
                y,
                width,
                height,
                fill_rgba,
            } => self.fill_rect(
                Point::new(x, y),
                Point::new(x + width, y + height),
                image::Rgba(fill_rgba),
            ),
            Shape::Polygon {
                vertices,
                stroke_rgba,
                fill_rgba,
            } => {
                self.fill_polygon(&vertices, image::Rgba(fill_rgba));
                self.stroke_polygon(&vertices, image::Rgba(stroke_rgba));
            }
        }
    }
}

/**
 * Indices of the pixels whose centers lie in `[start, end)`, clipped to
 * `[0, count)`.
 */
fn pixel_range(start: f64, end: f64, count: usize) -> Range<usize> {
    let first = (start - 0.5).ceil().max(0.0);
    let last = (end - 0.5).ceil().max(0.0);
    let first = (first as usize).min(count);
    let last = (last as usize).min(count);
    first..last.max(first)
}

/**
 * Edge table of a polygon: for each row in `rows`, the sorted x positions at
 * which the outline crosses that row's center line. Each edge only visits the
 * rows its y-span covers, so the cost is linear in the number of vertices plus
 * the number of crossings.
 */
fn scanline_crossings(vertices: &[Point], rows: Range<usize>) -> Vec<Vec<f64>> {
    let mut table = vec![Vec::new(); rows.len()];
    let count = vertices.len();
    for k in 0..count {
        let (a, b) = (vertices[k], vertices[(k + 1) % count]);
        let (top, bottom) = if a[1] <= b[1] { (a, b) } else { (b, a) };
        let slope = (bottom[0] - top[0]) / (bottom[1] - top[1]);
        for row in pixel_range(top[1], bottom[1], rows.end) {
            if row < rows.start {
                continue;
            }
            let y = row as f64 + 0.5;
            table[row - rows.start].push(top[0] + (y - top[1]) * slope);
        }
    }
    table
        .par_iter_mut()
        .for_each(|crossings| crossings.sort_by(|p, q| p.total_cmp(q)));
    table
}

/// Pairs up sorted crossings into filled spans (even-odd rule).
fn even_odd_spans(crossings: &[f64]) -> Vec<(f64, f64)> {
    crossings
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/**
 * Part of the segment inside `[0, width] x [0, height]` (Liang-Barsky), or
 * `None` when it misses the image entirely.
 */
fn clip_segment(start: Point, end: Point, width: f64, height: f64) -> Option<(Point, Point)> {
    let delta = end - start;
    let mut t_enter: f64 = 0.0;
    let mut t_exit: f64 = 1.0;
    let boundaries = [
        (-delta[0], start[0]),
        (delta[0], width - start[0]),
        (-delta[1], start[1]),
        (delta[1], height - start[1]),
    ];
    for (p, q) in boundaries.iter() {
        if *p == 0.0 {
            if *q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if *p < 0.0 {
            t_enter = t_enter.max(t);
        } else {
            t_exit = t_exit.min(t);
        }
        if t_enter > t_exit {
            return None;
        }
    }
    Some((start + delta * t_enter, start + delta * t_exit))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const WHITE: Rgba = [255, 255, 255, 255];
    const RED: Rgba = [255, 0, 0, 255];
    const GREEN: Rgba = [0, 255, 0, 255];

    fn sink(width: u32, height: u32) -> RasterSink {
        RasterSink::new(&nalgebra::Vector2::new(width, height), WHITE)
    }

    fn color_at(sink: &RasterSink, x: u32, y: u32) -> Rgba {
        sink.image().get_pixel(x, y).0
    }

    #[test]
    fn test_pixel_range_clips_to_image() {
        assert_eq!(pixel_range(0.0, 3.0, 10), 0..3);
        assert_eq!(pixel_range(-5.0, 2.0, 10), 0..2);
        assert_eq!(pixel_range(8.0, 50.0, 10), 8..10);
        assert_eq!(pixel_range(4.0, 2.0, 10), 4..4);
        assert_eq!(pixel_range(0.2, 0.4, 10), 0..0);
    }

    #[test]
    fn test_rect_fills_exact_pixels() {
        let mut raster = sink(10, 10);
        raster.draw(Shape::Rect {
            x: 2.0,
            y: 3.0,
            width: 4.0,
            height: 2.0,
            fill_rgba: RED,
        });
        let mut painted = 0;
        for (x, y, pixel) in raster.image().enumerate_pixels() {
            let inside = (2..6).contains(&x) && (3..5).contains(&y);
            assert_eq!(pixel.0, if inside { RED } else { WHITE }, "pixel ({}, {})", x, y);
            if inside {
                painted += 1;
            }
        }
        assert_eq!(painted, 8);
    }

    #[test]
    fn test_line_uses_stroke_weight() {
        let mut raster = sink(20, 20);
        raster.draw(Shape::Line {
            x1: 15.0,
            x2: 5.0,
            y: 10.0,
            stroke_rgba: GREEN,
            stroke_weight: 4.0,
        });
        for y in 8..12 {
            assert_eq!(color_at(&raster, 5, y), GREEN);
            assert_eq!(color_at(&raster, 14, y), GREEN);
        }
        assert_eq!(color_at(&raster, 10, 7), WHITE);
        assert_eq!(color_at(&raster, 10, 12), WHITE);
        assert_eq!(color_at(&raster, 15, 10), WHITE);
    }

    #[test]
    fn test_triangle_fill() {
        let mut raster = sink(100, 100);
        raster.draw(Shape::Triangle {
            vertices: [
                Point::new(50.0, 0.0),
                Point::new(100.0, 86.0),
                Point::new(0.0, 86.0),
            ],
            fill_rgba: RED,
        });
        assert_eq!(color_at(&raster, 50, 50), RED);
        assert_eq!(color_at(&raster, 50, 85), RED);
        assert_eq!(color_at(&raster, 2, 2), WHITE);
        assert_eq!(color_at(&raster, 97, 10), WHITE);
        assert_eq!(color_at(&raster, 50, 90), WHITE);
    }

    #[test]
    fn test_concave_polygon_leaves_notch_empty() {
        // "U" shape: the notch between the two arms stays background.
        let vertices = vec![
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 90.0),
            Point::new(60.0, 90.0),
            Point::new(60.0, 0.0),
            Point::new(90.0, 0.0),
            Point::new(90.0, 100.0),
            Point::new(0.0, 100.0),
        ];
        let mut raster = sink(100, 100);
        raster.draw(Shape::Polygon {
            vertices,
            stroke_rgba: GREEN,
            fill_rgba: RED,
        });
        assert_eq!(color_at(&raster, 15, 50), RED);
        assert_eq!(color_at(&raster, 75, 50), RED);
        assert_eq!(color_at(&raster, 45, 95), RED);
        assert_eq!(color_at(&raster, 45, 50), WHITE);
        assert_eq!(color_at(&raster, 95, 50), WHITE);
    }

    #[test]
    fn test_square_is_filled_and_outlined() {
        let mut raster = sink(200, 200);
        raster.draw(Shape::Square {
            vertices: [
                Point::new(20.5, 179.5),
                Point::new(179.5, 179.5),
                Point::new(179.5, 20.5),
                Point::new(20.5, 20.5),
            ],
            stroke_rgba: GREEN,
            fill_rgba: RED,
        });
        assert_eq!(color_at(&raster, 100, 100), RED);
        assert_eq!(color_at(&raster, 20, 100), GREEN);
        assert_eq!(color_at(&raster, 100, 179), GREEN);
        assert_eq!(color_at(&raster, 10, 10), WHITE);
    }

    #[test]
    fn test_scanline_crossings_per_row() {
        let square = [
            Point::new(1.0, 1.0),
            Point::new(5.0, 1.0),
            Point::new(5.0, 4.0),
            Point::new(1.0, 4.0),
        ];
        let table = scanline_crossings(&square, pixel_range(1.0, 4.0, 10));
        assert_eq!(table, vec![vec![1.0, 5.0]; 3]);
        assert_eq!(even_odd_spans(&table[0]), vec![(1.0, 5.0)]);
    }

    #[test]
    fn test_many_vertex_polygon_fills_like_its_outline() {
        // A 100 x 60 rectangle whose top edge is a fine sawtooth of 40000
        // teeth, each 2.5e-3 wide and a tenth of a pixel tall.
        let teeth = 40_000;
        let mut vertices = vec![Point::new(0.0, 60.0), Point::new(100.0, 60.0)];
        for k in (0..=teeth).rev() {
            let x = 100.0 * k as f64 / teeth as f64;
            let y = if k % 2 == 0 { 10.0 } else { 10.1 };
            vertices.push(Point::new(x, y));
        }
        let mut raster = sink(100, 70);
        raster.fill_polygon(&vertices, image::Rgba(RED));
        for x in [0, 37, 99] {
            assert_eq!(color_at(&raster, x, 9), WHITE);
            assert_eq!(color_at(&raster, x, 10), RED);
            assert_eq!(color_at(&raster, x, 59), RED);
            assert_eq!(color_at(&raster, x, 60), WHITE);
        }
    }

    #[test]
    fn test_clip_segment() {
        let inside = clip_segment(Point::new(1.0, 1.0), Point::new(3.0, 2.0), 10.0, 10.0);
        assert_eq!(inside, Some((Point::new(1.0, 1.0), Point::new(3.0, 2.0))));

        let (start, end) =
            clip_segment(Point::new(-1e15, 5.5), Point::new(1e15, 5.5), 10.0, 10.0).unwrap();
        assert_relative_eq!(start[0], 0.0, epsilon = 0.5);
        assert_relative_eq!(end[0], 10.0, epsilon = 0.5);
        assert_eq!((start[1], end[1]), (5.5, 5.5));

        assert_eq!(
            clip_segment(Point::new(-1e15, -3.0), Point::new(1e15, -3.0), 10.0, 10.0),
            None
        );
    }

    #[test]
    fn test_huge_polygon_is_clipped_to_the_image() {
        let mut raster = sink(10, 10);
        raster.draw(Shape::Polygon {
            vertices: vec![
                Point::new(-1e15, 5.5),
                Point::new(1e15, 5.5),
                Point::new(1e15, 1e15),
                Point::new(-1e15, 1e15),
            ],
            stroke_rgba: GREEN,
            fill_rgba: RED,
        });
        for x in 0..10 {
            assert_eq!(color_at(&raster, x, 4), WHITE);
            assert_eq!(color_at(&raster, x, 5), GREEN);
            assert_eq!(color_at(&raster, x, 9), RED);
        }
    }

    #[test]
    fn test_clear_restores_background() {
        let mut raster = sink(8, 8);
        raster.draw(Shape::Rect {
            x: 0.0,
            y: 0.0,
            width: 8.0,
            height: 8.0,
            fill_rgba: RED,
        });
        assert_eq!(color_at(&raster, 4, 4), RED);
        raster.clear();
        assert!(raster.image().pixels().all(|pixel| pixel.0 == WHITE));
    }

    #[test]
    fn test_shapes_outside_image_are_ignored() {
        let mut raster = sink(8, 8);
        raster.draw(Shape::Rect {
            x: -50.0,
            y: 20.0,
            width: 10.0,
            height: 10.0,
            fill_rgba: RED,
        });
        raster.draw(Shape::Polygon {
            vertices: vec![
                Point::new(-10.0, -10.0),
                Point::new(-5.0, -10.0),
                Point::new(-5.0, -5.0),
            ],
            stroke_rgba: GREEN,
            fill_rgba: RED,
        });
        assert!(raster.image().pixels().all(|pixel| pixel.0 == WHITE));
    }
}
