//! Shared test fixtures for the surface-primitives workspace.
//!
//! This crate provides common testing infrastructure:
//! - Grid generators with predictable, verifiable value patterns
//! - Small hand-built triangulated meshes with known topology
//! - Fault line and color band fixtures
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod generators;
pub mod meshes;

// Re-export commonly used items at the crate root
pub use generators::*;
pub use meshes::*;
