pub mod api;
pub mod config;
pub mod error;
pub mod geometry;
pub mod optimizer;
pub mod raster;
pub mod render;
pub mod scorer;
// cmd and reports belong to the binary (main.rs).
