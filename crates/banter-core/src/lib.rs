//! Banter core — configuration and shared utilities.
//!
//! This crate contains:
//! - **config**: typed schema for `~/.banter/config.json`, the loader with
//!   env-var overrides, and save support
//! - **utils**: data-directory paths and time formatting

pub mod config;
pub mod utils;

pub use config::{load_config, save_config, Config};
