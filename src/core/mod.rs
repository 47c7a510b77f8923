pub mod file_io;
pub mod geometry;
pub mod raster;
pub mod render_sink;
pub mod shape;
pub mod stopwatch;
pub mod svg;
