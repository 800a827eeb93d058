//! # steg
//!
//! Hides a black-and-white image in the least significant bit of a grayscale
//! image, or recovers it.
//!
//! - [`processing`]: the combine/extract transforms and image codecs
//! - [`common`]: configuration and logging
//! - [`app`]: the entry point driven by a [`StegConfig`]

pub mod app;
pub mod common;
pub mod processing;

pub use common::config::{Mode, Output, StegConfig};
