//! Recursive fractal figures (Cantor set, Sierpinski triangle, box tree,
//! Sierpinski carpet and Koch snowflake), generated as plain shape data and
//! rendered through interchangeable sinks.

pub mod cli;
pub mod core;
pub mod error;
pub mod fractals;
