//! Headless wizard driver: command line, settings, logging and effect execution.
mod app;
mod cli;
mod effects;
mod logging;
mod render;
mod settings;

pub use app::run_app;
