//! CLI command implementations.

pub mod coherence;
pub mod common;
pub mod convert;
pub mod info;
pub mod ir;
pub mod spectrum;
