//! Test utilities for attendance services.
//!
//! Provides mock caller headers and deterministic embedding builders.
//! Import from `[dev-dependencies]` only; never in production code.

pub mod caller;
pub mod vectors;
