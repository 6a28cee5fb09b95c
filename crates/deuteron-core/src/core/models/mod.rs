//! Data types describing a potential model and the distribution computed from it.

pub mod params;
pub mod table;
