//! Mosaic - block-averaging image filter
//!
//! Command-line front end for the `block-mosaic` engine.
//! This library exposes modules for integration testing.

pub mod cli;
pub mod error;
pub mod models;
pub mod services;
