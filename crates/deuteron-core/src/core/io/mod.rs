//! Reading and writing distribution tables.
//!
//! Tables are exchanged as whitespace-delimited text with one `momentum density` row per
//! grid point, which plotting tools consume directly. A [`traits::TableSink`] decouples
//! where tables go (a directory of files, memory) from how they are computed.

pub mod sinks;
pub mod text;
pub mod traits;
