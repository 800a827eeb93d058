//! # Common Components
//!
//! - [`config`]: run configuration and TOML defaults
//! - [`logging`]: logger setup for the binary

pub mod config;
pub mod logging;
