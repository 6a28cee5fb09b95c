//! # Deuteron Core Library
//!
//! Computes the momentum distribution of a nucleon bound in the deuteron from analytic
//! potential-model parameterizations (Paris, CD-Bonn and similar fits), where the S- and
//! D-state wave functions are given in momentum space as sums of simple-pole terms.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split used throughout the workspace:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ModelParameters`,
//!   `DistributionTable`), the pure wave-function evaluation and quadrature helpers, and
//!   table I/O.
//!
//! - **[`engine`]: The Logic Core.** Grid construction, the per-model distribution
//!   calculation, configuration types, error types and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Runs a batch of models with per-model fault
//!   isolation and hands the resulting tables to a sink.

pub mod core;
pub mod engine;
pub mod workflows;
