use std::io::BufWriter;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use recursive_fractals::cli::args::{CommandsEnum, FractalFiguresArgs};
use recursive_fractals::cli::render::render_figure;
use recursive_fractals::cli::shapes::export_shapes;
use recursive_fractals::core::file_io::{
    build_output_path_with_date_time, extract_base_name, maybe_date_time_string, FilePrefix,
};
use recursive_fractals::fractals::common::FigureParams;

fn read_figure_params(path: &str) -> Result<FigureParams, Box<dyn std::error::Error>> {
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("recursive_fractals=info")),
        )
        .init();

    let args: FractalFiguresArgs = FractalFiguresArgs::parse();

    match &args.command {
        Some(CommandsEnum::Render(params)) => {
            let figure_params = read_figure_params(&params.params_path)?;
            let file_prefix = FilePrefix {
                directory_path: build_output_path_with_date_time(
                    &params.params_path,
                    "render",
                    &maybe_date_time_string(params.date_time_out),
                )?,
                file_base: extract_base_name(&params.params_path)?.to_owned(),
            };
            render_figure(&figure_params, file_prefix)?;
        }

        Some(CommandsEnum::Shapes(export)) => {
            let figure_params = read_figure_params(&export.params_path)?;
            match &export.output {
                Some(path) => {
                    export_shapes(&figure_params, BufWriter::new(std::fs::File::create(path)?))?;
                }
                None => {
                    export_shapes(&figure_params, std::io::stdout().lock())?;
                }
            }
        }

        None => {
            println!("Default command (nothing specified!)");
        }
    }
    Ok(())
}
