//! Shared test fixtures for RouteForge crates.
//!
//! This crate provides route catalogs and decision builders for testing.
//!
//! - [`catalog`] - Static route catalogs and generated high-volume batches
//! - [`decision`] - Hand-built branch decisions for aggregation tests
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! routeforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use routeforge_test::catalog::{MIXED_CATALOG, volume_batch};
//! use routeforge_test::decision::decision;
//! ```

pub mod catalog;
pub mod decision;

// Re-export commonly used fixtures at crate root for convenience
pub use catalog::{INCIDENT_CATALOG, MIXED_CATALOG, MALFORMED_ROUTES};
pub use decision::decision;
