//! # Configuration Module
//!
//! Render and output configuration shared by the library and the CLI.

pub mod config;

pub use config::{OutputConfig, RenderConfig};
