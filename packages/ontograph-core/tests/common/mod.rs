//! Common test utilities for ontograph-core
//!
//! Shared fixtures, generators and assertions for the integration tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

// Re-export all utilities
pub use assertions::*;
pub use fixtures::*;
