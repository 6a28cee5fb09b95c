//! # Workflows Module
//!
//! High-level entry points that run complete procedures over a batch of models.
//!
//! - **Distribution Workflow** ([`distribution`]) - Computes every model's momentum
//!   distribution with per-model fault isolation, optionally in parallel, and exports the
//!   resulting tables to a [`TableSink`](crate::core::io::traits::TableSink).
//!
//! A failing model is reported and skipped; it never aborts the rest of the batch.

pub mod distribution;
