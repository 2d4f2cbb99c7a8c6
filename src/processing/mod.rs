//! # Processing Module
//!
//! Per-target rendering into a result set, and the sinks that consume it.

pub mod processing;

pub use processing::{
    render_posts, render_posts_with, ArchiveSink, DirectorySink, OutputSink, ResultSet, SinkSet,
};
