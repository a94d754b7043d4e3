//! HTTP platform layer: config, logging, effect execution and page rendering.
mod app;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::{run_app, RunOptions};
pub use logging::LogDestination;
