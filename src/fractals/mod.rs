pub mod cantor;
pub mod carpet;
pub mod common;
pub mod depth_limit;
pub mod koch_snowflake;
pub mod pythagoras_tree;
pub mod sierpinski;
