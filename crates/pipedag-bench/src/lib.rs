//! Pipeline generator and benchmark utilities for `pipedag`.
//!
//! This crate provides deterministic generation of layered pipeline payloads
//! for benchmarking and property-based testing of `pipedag-core`.

pub mod generator;

pub use generator::{GeneratorConfig, SizeTier, generate_pipeline};
