mod app;
mod config;
mod confirm;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
