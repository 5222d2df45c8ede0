//! Domain types shared across the attendance workspace.
//!
//! This crate contains only pure types and algorithms with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never depends on `infra/` or `handlers/`.

pub mod embedding;
pub mod event;
pub mod id;
pub mod matcher;
pub mod pagination;
