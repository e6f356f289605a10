//! Table reshaping transforms.
//!
//! - [`melt`] - wide table to tidy observations
//! - [`pivot`] - tidy observations to skill-keyed capacity pairs
//! - [`pipeline`] - file-to-file orchestration of the above

pub mod melt;
pub mod pipeline;
pub mod pivot;

pub use melt::wide_to_tidy;
pub use pivot::tidy_to_skill;
