// ABOUTME: Happy Thoughts terminal client
// ABOUTME: Channel-based async architecture with Ratatui; store completions flow back over mpsc

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod run;
pub mod types;
pub mod ui;
