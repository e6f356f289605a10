//! # capshape - personnel assessment dataset reshaping
//!
//! Capshape reshapes wide skill-assessment CSV tables (one row per person,
//! date and scorer, one column per skill-field combination) into tidy and
//! skill-keyed representations, and generates synthetic datasets of the same
//! shape for testing and demos.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Wide CSV   │────▶│    Melt     │────▶│  Tidy rows  │────▶│  Skill CSV  │
//! │ (skill×fld) │     │ (1 obs/row) │     │             │     │ (pivot/dedup)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!        ▲
//!        │ synthetic baselines + progression time series
//! ┌─────────────┐
//! │  Generate   │
//! └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use capshape::{melt_csv, ReshapeOptions, Schema};
//! use std::path::Path;
//!
//! fn main() {
//!     let schema = Schema::standard();
//!     let report = melt_csv(
//!         Path::new("input.csv"),
//!         Path::new("tidy.csv"),
//!         &schema,
//!         &ReshapeOptions::default(),
//!     ).unwrap();
//!     println!("Melted {} rows into {}", report.wide_rows, report.tidy_rows);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`schema`] - Skill codes, field types, derived column layout
//! - [`models`] - Table row types (wide, tidy, skill)
//! - [`parser`] - Delimited-table read/write
//! - [`transform`] - Melt, pivot, and file-to-file pipeline
//! - [`generate`] - Synthetic dataset generation

// Core modules
pub mod error;
pub mod models;
pub mod schema;

// Tabular I/O
pub mod parser;

// Transformation
pub mod transform;

// Synthetic generation
pub mod generate;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    GenerateError, ParseError, ReshapeError, ReshapeResult, SchemaError, TransformError,
};

// =============================================================================
// Re-exports - Schema & Models
// =============================================================================

pub use models::{CellValue, SkillRecord, TidyRecord, WideRecord};
pub use schema::{Schema, SkillField, STANDARD_SCORERS, STANDARD_SKILLS};

// =============================================================================
// Re-exports - Tabular I/O
// =============================================================================

pub use parser::{
    read_personnel, read_tidy_table, read_wide_table, write_skill_table, write_tidy_table,
    write_wide_table, DEFAULT_DATE_FORMAT, WRITE_DATE_FORMAT,
};

// =============================================================================
// Re-exports - Transforms
// =============================================================================

pub use transform::pipeline::{
    melt_csv, pivot_csv, reshape_csv, MeltReport, PivotReport, ReshapeOptions, ReshapeReport,
};
pub use transform::{tidy_to_skill, wide_to_tidy};

// =============================================================================
// Re-exports - Generation
// =============================================================================

pub use generate::{
    add_months, generate_baseline, generate_capacity_baseline, generate_capacity_dataset,
    generate_dataset, generate_timeseries, mutate_score, GenerateParams,
};
