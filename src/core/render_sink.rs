use crate::core::shape::Shape;

/// Consumer of the shapes emitted by the fractal generators. Implementations
/// own the drawing surface; the generators never touch it directly.
pub trait RenderSink {
    /// Resets the drawing surface before a new figure is drawn.
    fn clear(&mut self);

    /// Draws a single shape on top of everything drawn so far.
    fn draw(&mut self, shape: Shape);
}

/**
 * Clears the sink and then draws every shape, in order. Later shapes end up
 * on top of earlier ones.
 */
pub fn draw_all<S, I>(sink: &mut S, shapes: I)
where
    S: RenderSink + ?Sized,
    I: IntoIterator<Item = Shape>,
{
    sink.clear();
    for shape in shapes {
        sink.draw(shape);
    }
}

/// Keeps every shape it is given. Used for exporting and for testing.
#[derive(Debug, Default, Clone)]
pub struct ShapeRecorder {
    pub shapes: Vec<Shape>,
}

impl ShapeRecorder {
    pub fn new() -> ShapeRecorder {
        ShapeRecorder::default()
    }

    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }
}

impl RenderSink for ShapeRecorder {
    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn draw(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64) -> Shape {
        Shape::Rect {
            x,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            fill_rgba: [0, 0, 0, 255],
        }
    }

    #[test]
    fn test_draw_all_clears_previous_figure() {
        let mut recorder = ShapeRecorder::new();
        draw_all(&mut recorder, vec![rect(0.0), rect(1.0)]);
        draw_all(&mut recorder, vec![rect(2.0)]);
        assert_eq!(recorder.into_shapes(), vec![rect(2.0)]);
    }

    #[test]
    fn test_draw_all_through_trait_object() {
        let mut recorder = ShapeRecorder::new();
        {
            let sink: &mut dyn RenderSink = &mut recorder;
            draw_all(sink, vec![rect(0.0), rect(1.0), rect(2.0)]);
        }
        assert_eq!(recorder.shapes, vec![rect(0.0), rect(1.0), rect(2.0)]);
    }
}
