//! Schema registry for the assessment dataset.
//!
//! Defines the fixed skill-field enumeration, the skill code list, and the
//! derived wide-table column layout (`{skill}_{field}`). The registry is an
//! explicitly constructed, immutable [`Schema`] value passed into every
//! component, so tests can substitute smaller schemas.

use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};

/// Key columns shared by every wide row, in column order.
pub const KEY_COLUMNS: [&str; 3] = ["Date", "Person", "Scorer"];

/// The production skill code list.
pub const STANDARD_SKILLS: &[&str] = &[
    "A1", "A2", "B1", "B2", "B3", "B4", "B5", "B6", "B7", "C1", "C2", "C3",
    "C4", "C5", "C6", "C7", "D1", "D2", "D3", "E1", "E2", "E3", "F1", "F2",
    "F3", "F4", "F5", "F6", "F7", "G1", "G2", "H1", "H2", "H3", "I1", "I2",
    "J1", "J2", "K1", "K2", "L1", "L2", "L3", "M1", "M2", "M3", "M4", "M5",
    "N1", "N2", "O1", "O2", "P1", "Q1", "Q2", "Q3", "Q4", "Q5", "Q6", "Q7",
    "Q8", "Q9", "R1", "R2", "R3", "R4", "R5", "R6", "S1", "S2", "S3", "T1",
    "T2", "U1", "U2", "U3", "U4", "U5", "U6", "U7", "U8", "U9", "V1", "W1",
    "X1", "X2", "X3",
];

/// The production scorer-type list (rating perspectives).
pub const STANDARD_SCORERS: &[&str] = &["Self", "PI", "DM", "ODK", "SO"];

// =============================================================================
// Skill Field
// =============================================================================

/// Measurement kind repeated per skill.
///
/// Order is significant: wide-table columns for a skill appear in this
/// enumeration order, and tidy output preserves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillField {
    Relevancy,
    Priority,
    Score,
    Notes,
    CurrentCapacity,
    TargetedCapacity,
}

impl SkillField {
    /// All field types in column order.
    pub const ALL: [SkillField; 6] = [
        SkillField::Relevancy,
        SkillField::Priority,
        SkillField::Score,
        SkillField::Notes,
        SkillField::CurrentCapacity,
        SkillField::TargetedCapacity,
    ];

    /// Column-name suffix for this field type.
    pub fn suffix(&self) -> &'static str {
        match self {
            SkillField::Relevancy => "relevancy",
            SkillField::Priority => "priority",
            SkillField::Score => "score",
            SkillField::Notes => "notes",
            SkillField::CurrentCapacity => "current_capacity",
            SkillField::TargetedCapacity => "targeted_capacity",
        }
    }

    /// Parse a field type from its column-name suffix.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.suffix() == suffix)
    }

    /// Whether cells of this field are nullable integers (everything but
    /// notes, which stay textual).
    pub fn is_numeric(&self) -> bool {
        !matches!(self, SkillField::Notes)
    }

    /// Whether this field is a person-level fact independent of the rating
    /// scorer (the "no-scorer" set).
    pub fn is_person_level(&self) -> bool {
        matches!(
            self,
            SkillField::CurrentCapacity | SkillField::TargetedCapacity
        )
    }
}

impl std::fmt::Display for SkillField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

// =============================================================================
// Schema
// =============================================================================

/// Immutable definition of the dataset's skill codes and scorer types.
///
/// All column layout questions are answered here: skills iterate in list
/// order, and within each skill the fields iterate in [`SkillField::ALL`]
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    skills: Vec<String>,
    scorers: Vec<String>,
}

impl Schema {
    /// Build a schema from explicit skill codes and scorer types.
    pub fn new<S, T>(skills: &[S], scorers: &[T]) -> SchemaResult<Self>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        if skills.is_empty() {
            return Err(SchemaError::EmptySkills);
        }
        if scorers.is_empty() {
            return Err(SchemaError::NoScorers);
        }
        let mut seen = std::collections::HashSet::new();
        for skill in skills {
            if !seen.insert(skill.as_ref()) {
                return Err(SchemaError::DuplicateSkill(skill.as_ref().to_string()));
            }
        }
        Ok(Self {
            skills: skills.iter().map(|s| s.as_ref().to_string()).collect(),
            scorers: scorers.iter().map(|s| s.as_ref().to_string()).collect(),
        })
    }

    /// The production schema: 85 skill codes, 5 scorer types.
    pub fn standard() -> Self {
        Self::new(STANDARD_SKILLS, STANDARD_SCORERS)
            .expect("standard skill list is non-empty and duplicate-free")
    }

    /// Ordered skill codes.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Ordered scorer types.
    pub fn scorers(&self) -> &[String] {
        &self.scorers
    }

    /// Number of skill-field value columns per wide row.
    pub fn value_count(&self) -> usize {
        self.skills.len() * SkillField::ALL.len()
    }

    /// Composite column name for a (skill, field) pair.
    pub fn column_name(skill: &str, field: SkillField) -> String {
        format!("{}_{}", skill, field.suffix())
    }

    /// Iterate (skill, field) pairs in wide-column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, SkillField)> + '_ {
        self.skills
            .iter()
            .flat_map(|skill| SkillField::ALL.into_iter().map(move |f| (skill.as_str(), f)))
    }

    /// Full wide-table header: key columns followed by skill-field columns.
    pub fn wide_header(&self) -> Vec<String> {
        KEY_COLUMNS
            .iter()
            .map(|s| s.to_string())
            .chain(self.columns().map(|(s, f)| Schema::column_name(s, f)))
            .collect()
    }
}
