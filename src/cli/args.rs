use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct FractalFiguresArgs {
    #[command(subcommand)]
    pub command: Option<CommandsEnum>,
}

#[derive(Debug, Subcommand)]
pub enum CommandsEnum {
    /// Render a figure to PNG (and optionally SVG), with diagnostics.
    Render(ParameterFilePath),
    /// Write the generated shapes as JSON.
    Shapes(ShapeExportArgs),
}

#[derive(Debug, Args)]
pub struct ParameterFilePath {
    pub params_path: String,

    #[clap(long, short)]
    pub date_time_out: bool,
}

#[derive(Debug, Args)]
pub struct ShapeExportArgs {
    pub params_path: String,

    /// Output file; the shapes are printed to stdout when omitted.
    #[clap(long, short)]
    pub output: Option<String>,
}
