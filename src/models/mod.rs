//! Domain models for the reshaping pipeline.
//!
//! This module contains the three table shapes the system moves between:
//!
//! - [`WideRecord`] - one row per (date, person, scorer), one cell per
//!   skill-field combination
//! - [`TidyRecord`] - one row per individual skill-field observation
//! - [`SkillRecord`] - one row per (skill, date, person) carrying the paired
//!   capacity values
//!
//! All tables are plain `Vec`s of these records; every transform produces a
//! new table rather than mutating its input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schema::SkillField;

// =============================================================================
// Cell Value
// =============================================================================

/// A single nullable observation cell.
///
/// Empty CSV cells become [`CellValue::Empty`], which is distinct from an
/// integer zero. Notes cells carry free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Text(String),
    Empty,
}

impl CellValue {
    /// The integer payload, if any.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this cell holds no observation.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// CSV rendering: empty string for an absent value.
    pub fn to_cell(&self) -> String {
        match self {
            CellValue::Int(v) => v.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_cell())
    }
}

// =============================================================================
// Wide Record
// =============================================================================

/// One wide-table row: a (date, person, scorer) key plus one value per
/// skill-field column.
///
/// `values` is aligned with the owning schema's column order; its length must
/// equal `schema.value_count()`.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRecord {
    pub date: NaiveDate,
    pub person: String,
    pub scorer: String,
    pub values: Vec<CellValue>,
}

// =============================================================================
// Tidy Record
// =============================================================================

/// One tidy-table row: a single (date, person, scorer, skill, field)
/// observation.
///
/// `scorer` is `None` exactly for the synthetic no-scorer rows emitted for
/// person-level fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyRecord {
    pub date: NaiveDate,
    pub person: String,
    pub scorer: Option<String>,
    pub skill: String,
    pub field: SkillField,
    pub value: CellValue,
}

// =============================================================================
// Skill Record
// =============================================================================

/// One skill-table row: the paired capacity values for a (skill, date,
/// person) key.
///
/// A record exists only once both capacities were observed in the tidy input;
/// an observed-but-empty capacity is carried as [`CellValue::Empty`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRecord {
    pub skill: String,
    pub date: NaiveDate,
    pub person: String,
    pub current_capacity: CellValue,
    pub targeted_capacity: CellValue,
}

impl SkillRecord {
    /// Composite key used for deduplication and ordering.
    pub fn key(&self) -> (&str, NaiveDate, &str) {
        (&self.skill, self.date, &self.person)
    }
}
