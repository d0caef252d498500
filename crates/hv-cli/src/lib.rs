//! Harvest CLI library.
//!
//! This crate provides the command-line interface over `hv-core` and the
//! Harvest HTTP client.

mod cli;
pub mod commands;
mod config;
mod picker;

pub use cli::{Cli, Commands, view_mode};
pub use config::{Config, ConfigError};
pub use picker::FuzzyPicker;
