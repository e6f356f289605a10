//! Tidy-to-skill pivot transform.
//!
//! Re-pivots tidy observations into a skill-keyed table carrying only the
//! paired capacity values per (skill, date, person):
//!
//! ```text
//! Tidy input                                Skill output
//! ┌───────────────────────────────────┐     ┌──────────────────────────────┐
//! │ A1 2019-09-01 Alice current_cap 3 │  →  │ A1 2019-09-01 Alice  3  4    │
//! │ A1 2019-09-01 Alice targeted_cap 4│     └──────────────────────────────┘
//! │ A1 2019-09-01 Alice score 2       │       (scorer-attributed rows drop)
//! └───────────────────────────────────┘
//! ```
//!
//! Scorer-attributed fields are declared in configuration but have no
//! defined output shape; requesting them fails fast instead of producing
//! misleading partial output.

use crate::error::{TransformError, TransformResult};
use crate::models::{CellValue, SkillRecord, TidyRecord};
use crate::schema::SkillField;

/// In-progress skill record, keyed by the first unseen composite triple.
struct Pending {
    skill: String,
    date: chrono::NaiveDate,
    person: String,
    current: Option<CellValue>,
    targeted: Option<CellValue>,
}

/// Pivot tidy observations into skill records.
///
/// Rows are scanned in (skill, date, person) order. Rows repeating the last
/// emitted record's composite key are dropped entirely, not merged. A record
/// is appended only once both capacity values have been observed for its
/// key; an observed-but-empty value counts as observed and is carried as
/// [`CellValue::Empty`]. The result is re-sorted by (skill, date, person).
pub fn tidy_to_skill(
    records: &[TidyRecord],
    include_scorer_fields: bool,
) -> TransformResult<Vec<SkillRecord>> {
    if include_scorer_fields {
        return Err(TransformError::ScorerFieldsUnsupported);
    }

    let mut sorted: Vec<&TidyRecord> = records.iter().collect();
    sorted.sort_by(|a, b| (&a.skill, a.date, &a.person).cmp(&(&b.skill, b.date, &b.person)));

    let mut out: Vec<SkillRecord> = Vec::new();
    let mut pending: Option<Pending> = None;

    for row in sorted {
        // Later occurrences of an already-emitted key are dropped.
        if let Some(last) = out.last() {
            if last.key() == (row.skill.as_str(), row.date, row.person.as_str()) {
                continue;
            }
        }

        let entry = pending.get_or_insert_with(|| Pending {
            skill: row.skill.clone(),
            date: row.date,
            person: row.person.clone(),
            current: None,
            targeted: None,
        });

        match row.field {
            SkillField::CurrentCapacity => entry.current = Some(row.value.clone()),
            SkillField::TargetedCapacity => entry.targeted = Some(row.value.clone()),
            // Scorer-attributed observations are excluded from the skill table.
            _ => continue,
        }

        if entry.current.is_some() && entry.targeted.is_some() {
            if let Some(Pending {
                skill,
                date,
                person,
                current: Some(current_capacity),
                targeted: Some(targeted_capacity),
            }) = pending.take()
            {
                out.push(SkillRecord {
                    skill,
                    date,
                    person,
                    current_capacity,
                    targeted_capacity,
                });
            }
        }
    }

    out.sort_by(|a, b| a.key().cmp(&b.key()));
    Ok(out)
}
