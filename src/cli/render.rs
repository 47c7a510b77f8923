use std::io::Write;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::core::file_io::{serialize_to_json, FilePrefix};
use crate::core::raster::RasterSink;
use crate::core::render_sink::draw_all;
use crate::core::shape::{shape_fingerprint, Shape};
use crate::core::stopwatch::Stopwatch;
use crate::core::svg::SvgSink;
use crate::error::FractalError;
use crate::fractals::common::{generate, FigureParams};
use crate::fractals::depth_limit::clamp_depth_to_budget;

/// What a call to `render_figure` produced.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub depth: u32,
    pub shape_count: usize,
    pub fingerprint: String,
    pub png_path: PathBuf,
    pub svg_path: Option<PathBuf>,
}

/**
 * Clamps the requested depth to the limit of the figure, and to the vertex
 * budget, and generates its shapes. Returns the depth that was actually used.
 */
pub fn generate_figure(params: &FigureParams) -> Result<(u32, Vec<Shape>), FractalError> {
    let depth = clamp_depth_to_budget(params.kind, params.depth);
    if i64::from(depth) != params.depth {
        warn!(
            kind = %params.kind,
            requested = params.depth,
            depth,
            "requested depth is outside of [0, {}] or over the vertex budget; clamped",
            params.kind.max_depth()
        );
    }
    let shapes = generate(params.kind, i64::from(depth), &params.region(), &params.palette)?;
    Ok((depth, shapes))
}

/**
 * Generates the figure and writes it out next to a copy of its parameters:
 * `<base>.png`, optionally `<base>.svg`, `<base>_params.json`, and
 * `<base>_diagnostics.txt` with timing, depth, shape count and fingerprint.
 */
pub fn render_figure(
    params: &FigureParams,
    mut file_prefix: FilePrefix,
) -> Result<RenderSummary, Box<dyn std::error::Error>> {
    let mut stopwatch = Stopwatch::new("Figure Render Stopwatch".to_owned());
    file_prefix.create_and_step_into_sub_directory(params.kind.name())?;

    let (depth, shapes) = generate_figure(params)?;
    let shape_count = shapes.len();
    let fingerprint = shape_fingerprint(&shapes)?;
    stopwatch.record_split("generate".to_owned());

    let svg_path = if params.write_svg {
        let mut svg = SvgSink::new(&params.resolution, params.background_color_rgba);
        draw_all(&mut svg, shapes.iter().cloned());
        let mut file = file_prefix.create_file_with_suffix(".svg")?;
        svg.write(&mut file)?;
        file.flush()?;
        let path = file_prefix.full_path_with_suffix(".svg");
        info!(path = %path.display(), "wrote SVG file");
        stopwatch.record_split("write_svg".to_owned());
        Some(path)
    } else {
        None
    };

    let mut raster = RasterSink::new(&params.resolution, params.background_color_rgba);
    draw_all(&mut raster, shapes);
    stopwatch.record_split("rasterize".to_owned());

    let png_path = file_prefix.full_path_with_suffix(".png");
    raster.save(&png_path)?;
    stopwatch.record_split("write_png".to_owned());
    info!(path = %png_path.display(), "wrote image file");

    serialize_to_json(params, &file_prefix.full_path_with_suffix("_params.json"))?;

    let mut diagnostics = file_prefix.create_file_with_suffix("_diagnostics.txt")?;
    writeln!(
        diagnostics,
        "Figure: {} | Depth: {} | Shapes: {} | Fingerprint: {}",
        params.kind, depth, shape_count, fingerprint
    )?;
    stopwatch.display(&mut diagnostics)?;
    diagnostics.flush()?;

    info!(
        kind = %params.kind,
        depth,
        shape_count,
        elapsed = ?stopwatch.total_elapsed(),
        "rendered figure"
    );

    Ok(RenderSummary {
        depth,
        shape_count,
        fingerprint,
        png_path,
        svg_path,
    })
}
