//! Wide-to-tidy melt transform.
//!
//! Converts one row-per-person-date wide records (one cell per skill-field
//! column) into narrow records, one row per individual observation.
//!
//! ```text
//! Wide input (1 row)                     Tidy output (1 row per column)
//! ┌──────────────────────────────┐       ┌────────────────────────────────┐
//! │ Date Person Scorer A1_rel .. │  →    │ Date Person Scorer A1 relevancy│
//! └──────────────────────────────┘       │ Date Person Scorer A1 priority │
//!                                        │ ...                            │
//!                                        └────────────────────────────────┘
//! ```
//!
//! Person-level fields (the capacity pair) describe the person, not the
//! rating scorer: for each wide row, the first column of each such field
//! type is emitted with a null scorer, consuming that field type for the
//! rest of the row.

use crate::models::{TidyRecord, WideRecord};
use crate::schema::{Schema, SkillField};

/// Melt wide records into tidy observations.
///
/// Input rows are visited in (date, person) order (stable sort, so equal
/// keys keep their input order); within a row, columns follow the schema's
/// enumeration order. The input is not mutated, and the output is fully
/// deterministic.
///
/// Output length is exactly `records.len() * schema.value_count()`.
pub fn wide_to_tidy(schema: &Schema, records: &[WideRecord]) -> Vec<TidyRecord> {
    let mut sorted: Vec<&WideRecord> = records.iter().collect();
    sorted.sort_by(|a, b| (a.date, &a.person).cmp(&(b.date, &b.person)));

    let mut tidy = Vec::with_capacity(records.len() * schema.value_count());
    for record in sorted {
        // One synthetic no-scorer row per person-level field type per wide row.
        let mut pending_no_scorer: Vec<SkillField> = SkillField::ALL
            .into_iter()
            .filter(SkillField::is_person_level)
            .collect();

        for (offset, (skill, field)) in schema.columns().enumerate() {
            let scorer = match pending_no_scorer.iter().position(|f| *f == field) {
                Some(pos) => {
                    pending_no_scorer.remove(pos);
                    None
                }
                None => Some(record.scorer.clone()),
            };

            tidy.push(TidyRecord {
                date: record.date,
                person: record.person.clone(),
                scorer,
                skill: skill.to_string(),
                field,
                value: record.values[offset].clone(),
            });
        }
    }

    tidy
}
