//! Error types for the capshape reshaping pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`ParseError`] - CSV and cell-level parsing errors
//! - [`SchemaError`] - Schema registry and field-mapping errors
//! - [`TransformError`] - Melt/pivot transformation errors
//! - [`GenerateError`] - Synthetic dataset generation errors
//! - [`ReshapeError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Parse Errors
// =============================================================================

/// Errors while reading delimited tables.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV structure.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A cell could not be coerced to its expected type.
    #[error("Row {row}, column '{column}' (value '{value}'): {message}")]
    MalformedCell {
        row: usize,
        column: String,
        value: String,
        message: String,
    },

    /// Header does not match the schema-derived column layout.
    #[error("Header mismatch at position {position}: expected '{expected}', found '{found}'")]
    HeaderMismatch {
        position: usize,
        expected: String,
        found: String,
    },

    /// A required column is missing entirely.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Empty file.
    #[error("Input table is empty")]
    EmptyFile,
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Errors from the schema registry and field mapping.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A tidy row's skill field has no mapping to an output column.
    #[error("Row {row}: skill field '{field}' has no output mapping")]
    UnmappedField { row: usize, field: String },

    /// Schema constructed with no skills.
    #[error("Schema requires at least one skill code")]
    EmptySkills,

    /// Duplicate skill code in schema.
    #[error("Duplicate skill code: {0}")]
    DuplicateSkill(String),

    /// Schema constructed with no scorer types.
    #[error("Schema requires at least one scorer type")]
    NoScorers,
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors during melt/pivot transformations.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Schema-consistency error.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Scorer-attributed fields in the skill table have no defined output
    /// shape and must be rejected rather than silently dropped.
    #[error("Scorer-attributed skill fields are not implemented")]
    ScorerFieldsUnsupported,
}

// =============================================================================
// Generation Errors
// =============================================================================

/// Errors during synthetic dataset generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Personnel list was empty.
    #[error("Personnel list is empty")]
    EmptyPersonnel,

    /// A configured min/max pair is inverted or out of range.
    #[error("Invalid bounds for {name}: min {min} > max {max}")]
    InvalidBounds { name: String, min: i64, max: i64 },

    /// Mutation probability outside [0, 1].
    #[error("Mutation chance {0} is outside [0, 1]")]
    InvalidChance(f64),

    /// Not enough eligible skills to satisfy the requested target count.
    #[error("Target pool exhausted: {requested} target skills requested, only {eligible} eligible")]
    TargetPoolExhausted { eligible: usize, requested: usize },

    /// Parameter file could not be read or parsed.
    #[error("Invalid parameter file: {0}")]
    InvalidParams(String),
}

// =============================================================================
// Reshape Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by the file-to-file entry points in
/// [`crate::transform::pipeline`]. It wraps all lower-level errors.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// Parsing error.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Schema error.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Generation error.
    #[error("Generate error: {0}")]
    Generate(#[from] GenerateError),

    /// IO error outside of table parsing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No records to transform.
    #[error("No records to transform")]
    EmptyInput,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Result type for pipeline operations.
pub type ReshapeResult<T> = Result<T, ReshapeError>;
