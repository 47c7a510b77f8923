use std::io::Write;
use std::path::Path;

use svg::node::element::{Line, Polygon, Rectangle as Rect};
use svg::{Document, Node};

use crate::core::geometry::Point;
use crate::core::render_sink::RenderSink;
use crate::core::shape::{Rgba, Shape};

/**
 * Renders shapes as SVG elements. The document uses the canvas coordinates
 * of the shapes directly, with the background drawn as a full-size rect.
 */
pub struct SvgSink {
    width: u32,
    height: u32,
    background_rgba: Rgba,
    document: Document,
    element_count: usize,
}

impl SvgSink {
    pub fn new(resolution: &nalgebra::Vector2<u32>, background_rgba: Rgba) -> SvgSink {
        let (width, height) = (resolution[0], resolution[1]);
        SvgSink {
            width,
            height,
            background_rgba,
            document: blank_document(width, height, &background_rgba),
            element_count: 0,
        }
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn write<W: Write>(&self, writer: W) -> std::io::Result<()> {
        svg::write(writer, &self.document)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        svg::save(path, &self.document)
    }
}

impl RenderSink for SvgSink {
    fn clear(&mut self) {
        self.document = blank_document(self.width, self.height, &self.background_rgba);
        self.element_count = 0;
    }

    fn draw(&mut self, shape: Shape) {
        match shape {
            Shape::Line {
                x1,
                x2,
                y,
                stroke_rgba,
                stroke_weight,
            } => self.document.append(with_stroke(
                Line::new()
                    .set("x1", x1)
                    .set("y1", y)
                    .set("x2", x2)
                    .set("y2", y)
                    .set("stroke-width", stroke_weight),
                &stroke_rgba,
            )),
            Shape::Triangle {
                vertices,
                fill_rgba,
            } => self.document.append(with_fill(
                Polygon::new().set("points", points_attribute(&vertices)),
                &fill_rgba,
            )),
            Shape::Square {
                vertices,
                stroke_rgba,
                fill_rgba,
            } => self.document.append(with_stroke(
                with_fill(
                    Polygon::new().set("points", points_attribute(&vertices)),
                    &fill_rgba,
                ),
                &stroke_rgba,
            )),
            Shape::Rect {
                x,
                y,
                width,
                height,
                fill_rgba,
            } => self.document.append(with_fill(
                Rect::new()
                    .set("x", x)
                    .set("y", y)
                    .set("width", width)
                    .set("height", height),
                &fill_rgba,
            )),
            Shape::Polygon {
                vertices,
                stroke_rgba,
                fill_rgba,
            } => self.document.append(with_stroke(
                with_fill(
                    Polygon::new().set("points", points_attribute(&vertices)),
                    &fill_rgba,
                ),
                &stroke_rgba,
            )),
        }
        self.element_count += 1;
    }
}

fn blank_document(width: u32, height: u32, background_rgba: &Rgba) -> Document {
    let background = with_fill(
        Rect::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", width)
            .set("height", height),
        background_rgba,
    );
    Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0, 0, width, height))
        .add(background)
}

fn points_attribute(vertices: &[Point]) -> String {
    vertices
        .iter()
        .map(|v| format!("{},{}", v[0], v[1]))
        .collect::<Vec<_>>()
        .join(" ")
}

fn color_string(rgba: &Rgba) -> String {
    format!("rgb({},{},{})", rgba[0], rgba[1], rgba[2])
}

fn opacity(rgba: &Rgba) -> f64 {
    rgba[3] as f64 / 255.0
}

fn with_fill<N: Node>(mut node: N, rgba: &Rgba) -> N {
    node.assign("fill", color_string(rgba));
    node.assign("fill-opacity", opacity(rgba));
    node
}

fn with_stroke<N: Node>(mut node: N, rgba: &Rgba) -> N {
    node.assign("stroke", color_string(rgba));
    node.assign("stroke-opacity", opacity(rgba));
    node
}
