//! # Core Module
//!
//! The stateless foundation of the library: model and table data types, the closed-form
//! momentum-space wave functions, numerical quadrature, and reading/writing of
//! distribution tables.
//!
//! ## Architecture
//!
//! - **Data Model** ([`models`]) - Potential-model parameters and distribution tables
//! - **Physics** ([`physics`]) - Wave-function amplitudes, sum rules and quadrature
//! - **File I/O** ([`io`]) - Text table format and output sinks
//!
//! ## Scientific Foundation
//!
//! The deuteron wave function is parameterized in momentum space as
//!
//! ```text
//! u(p) = Σ_j c_j / (p² + m_j²)      w(p) = Σ_j d_j / (p² + m_j²)
//! m_j  = α + (j - 1) m₀
//! ```
//!
//! and the nucleon momentum density is `ρ(p) = p² (u² + w²)`, normalized to unit
//! probability over the momentum grid.

pub mod io;
pub mod models;
pub mod physics;
