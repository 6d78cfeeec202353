//! Subcommand implementations

pub mod measure;
pub mod rasterize;
pub mod serve;
