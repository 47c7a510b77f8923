use std::io::Write;

use tracing::info;

use crate::cli::render::generate_figure;
use crate::core::render_sink::{draw_all, ShapeRecorder};
use crate::fractals::common::FigureParams;

/**
 * Writes the ordered shape sequence of a figure as pretty-printed JSON.
 * Returns the number of shapes written.
 */
pub fn export_shapes<W: Write>(
    params: &FigureParams,
    mut writer: W,
) -> Result<usize, Box<dyn std::error::Error>> {
    let (depth, shapes) = generate_figure(params)?;

    let mut recorder = ShapeRecorder::new();
    draw_all(&mut recorder, shapes);
    serde_json::to_writer_pretty(&mut writer, &recorder.shapes)?;
    writeln!(writer)?;
    writer.flush()?;

    info!(kind = %params.kind, depth, shape_count = recorder.shapes.len(), "exported shapes");
    Ok(recorder.shapes.len())
}
