//! # Engine Module
//!
//! Turns one model's parameters into a normalized momentum distribution.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Grid specification and run-level settings with builders
//! - **Grid** ([`grid`]) - Linear or geometric momentum grids
//! - **Distribution** ([`distribution`]) - Density evaluation, normalization and summary
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Per-model error kinds
//!
//! Each calculation is a pure function of its inputs; nothing is shared between models,
//! so callers may run them in any order or in parallel.

pub mod config;
pub mod distribution;
pub mod error;
pub mod grid;
pub mod progress;
