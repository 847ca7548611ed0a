//! `infopan-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod money;

pub use error::{DomainError, DomainResult};
pub use money::round2;
