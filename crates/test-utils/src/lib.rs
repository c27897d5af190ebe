//! Shared test utilities for the alert graphics workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Sample alerts and polygon rings
//! - Synthetic backdrop and logo rasters
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{sample_tornado_alert, backdrop_png};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
