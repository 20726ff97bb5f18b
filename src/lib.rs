// Library surface for the binary, headless drivers and integration tests.
pub mod app_dirs;
pub mod config;
pub mod engine;
pub mod logging;
pub mod runtime;
pub mod segment;
pub mod stats;
pub mod text;
pub mod theme;
pub mod typing_policy;
pub mod ui;
