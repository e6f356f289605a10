//! Synthetic assessment dataset generation.
//!
//! Produces a randomized baseline wide table (one row per person and scorer
//! type) plus a multi-period progression time series with bounded random
//! mutation of score fields. The capacity-aware variant lives in
//! [`capacity`].
//!
//! All randomness flows through a caller-supplied [`Rng`], so the CLI can
//! run seeded for reproducible fixtures and tests stay deterministic.

pub mod capacity;

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, GenerateResult};
use crate::models::{CellValue, WideRecord};
use crate::schema::{Schema, SkillField};

pub use capacity::{generate_capacity_baseline, generate_capacity_dataset};

// =============================================================================
// Parameters
// =============================================================================

/// Numeric ranges and time-series settings for synthetic generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateParams {
    /// Inclusive score range for relevancy/priority/score draws.
    pub score_min: i64,
    pub score_max: i64,

    /// Baseline date; the time series advances from here.
    pub start_date: NaiveDate,

    /// Inclusive increment range applied when a mutation procs.
    pub mutation_min_increment: i64,
    pub mutation_max_increment: i64,

    /// Probability that any given score cell mutates per period.
    pub mutation_chance: f64,

    /// Inclusive range for how many target skills each person gets.
    pub target_skills_min: usize,
    pub target_skills_max: usize,

    /// Inclusive range for the per-quarter targeted-capacity increment.
    pub target_increment_min: i64,
    pub target_increment_max: i64,

    /// Months advanced per time-series iteration.
    pub timeseries_months_step: u32,

    /// Number of time-series iterations appended after the baseline.
    pub timeseries_iters: u32,

    /// Fixed text placed in every notes cell.
    pub note_placeholder: String,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            score_min: 1,
            score_max: 5,
            start_date: NaiveDate::from_ymd_opt(2019, 9, 1)
                .expect("default start date is valid"),
            mutation_min_increment: 0,
            mutation_max_increment: 1,
            mutation_chance: 0.25,
            target_skills_min: 3,
            target_skills_max: 5,
            target_increment_min: 1,
            target_increment_max: 2,
            timeseries_months_step: 3,
            timeseries_iters: 3,
            note_placeholder: "This is a miscellaneous note.".to_string(),
        }
    }
}

impl GenerateParams {
    /// Parse parameters from a JSON document. Missing keys fall back to the
    /// defaults.
    pub fn from_json(json: &str) -> GenerateResult<Self> {
        let params: Self = serde_json::from_str(json)
            .map_err(|e| GenerateError::InvalidParams(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Reject inverted bounds and out-of-range probabilities.
    pub fn validate(&self) -> GenerateResult<()> {
        let pairs = [
            ("score", self.score_min, self.score_max),
            (
                "mutation_increment",
                self.mutation_min_increment,
                self.mutation_max_increment,
            ),
            (
                "target_skills",
                self.target_skills_min as i64,
                self.target_skills_max as i64,
            ),
            (
                "target_increment",
                self.target_increment_min,
                self.target_increment_max,
            ),
        ];
        for (name, min, max) in pairs {
            if min > max {
                return Err(GenerateError::InvalidBounds {
                    name: name.to_string(),
                    min,
                    max,
                });
            }
        }
        if !(0.0..=1.0).contains(&self.mutation_chance) {
            return Err(GenerateError::InvalidChance(self.mutation_chance));
        }
        Ok(())
    }
}

// =============================================================================
// Column dispatch
// =============================================================================

/// How a skill-field column is filled during baseline generation. Resolved
/// once per schema instead of matching column-name suffixes per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldGen {
    /// Uniform draw from [score_min, score_max].
    Score,
    /// Fixed placeholder text.
    Note,
    /// Left empty (filled later by the capacity-aware variant, or not at all).
    Blank,
}

impl FieldGen {
    fn for_field(field: SkillField) -> Self {
        match field {
            SkillField::Relevancy | SkillField::Priority | SkillField::Score => FieldGen::Score,
            SkillField::Notes => FieldGen::Note,
            SkillField::CurrentCapacity | SkillField::TargetedCapacity => FieldGen::Blank,
        }
    }
}

/// Per-column generation plan in wide-column order.
pub(crate) fn column_plan(schema: &Schema) -> Vec<FieldGen> {
    schema
        .columns()
        .map(|(_, field)| FieldGen::for_field(field))
        .collect()
}

// =============================================================================
// Baseline
// =============================================================================

/// Generate the baseline wide table: one row per (person, scorer type), all
/// score-like cells drawn uniformly, notes fixed, capacities blank, date set
/// to the configured start date.
pub fn generate_baseline<R: Rng>(
    schema: &Schema,
    personnel: &[String],
    params: &GenerateParams,
    rng: &mut R,
) -> GenerateResult<Vec<WideRecord>> {
    params.validate()?;
    if personnel.is_empty() {
        return Err(GenerateError::EmptyPersonnel);
    }

    let plan = column_plan(schema);
    let mut records = Vec::with_capacity(personnel.len() * schema.scorers().len());

    for person in personnel {
        for scorer in schema.scorers() {
            let values = plan
                .iter()
                .map(|gen| match gen {
                    FieldGen::Score => {
                        CellValue::Int(rng.gen_range(params.score_min..=params.score_max))
                    }
                    FieldGen::Note => CellValue::Text(params.note_placeholder.clone()),
                    FieldGen::Blank => CellValue::Empty,
                })
                .collect();

            records.push(WideRecord {
                date: params.start_date,
                person: person.clone(),
                scorer: scorer.clone(),
                values,
            });
        }
    }

    Ok(records)
}

// =============================================================================
// Time series
// =============================================================================

/// Advance a date by whole months with calendar-correct rollover; the day of
/// month is clamped to the target month's last valid day.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let month0 = date.month0() + months;
    let year = date.year() + (month0 / 12) as i32;
    let month = month0 % 12 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).expect("clamped day is valid for target month")
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .expect("first of month has a predecessor")
}

/// Mutate a score cell: with the configured probability, and only while the
/// value is below the ceiling, replace it with a uniform choice from
/// {value + k : k in [min, max]} capped at score_max. Never lowers a value,
/// never exceeds the ceiling.
pub fn mutate_score<R: Rng>(value: i64, params: &GenerateParams, rng: &mut R) -> i64 {
    let procced = value < params.score_max && rng.gen_bool(params.mutation_chance);
    if !procced {
        return value;
    }

    let pool: Vec<i64> = (params.mutation_min_increment..=params.mutation_max_increment)
        .map(|k| value + k)
        .filter(|v| *v <= params.score_max)
        .collect();
    if pool.is_empty() {
        return value;
    }
    pool[rng.gen_range(0..pool.len())]
}

/// Generate the multi-period progression series from a baseline: each
/// iteration clones the baseline, advances the date by `step * iteration`
/// months from the start date, and mutates every score cell independently.
pub fn generate_timeseries<R: Rng>(
    schema: &Schema,
    baseline: &[WideRecord],
    params: &GenerateParams,
    rng: &mut R,
) -> Vec<WideRecord> {
    let score_columns: Vec<usize> = schema
        .columns()
        .enumerate()
        .filter(|(_, (_, field))| *field == SkillField::Score)
        .map(|(offset, _)| offset)
        .collect();

    let mut series = Vec::with_capacity(baseline.len() * params.timeseries_iters as usize);
    for iteration in 1..=params.timeseries_iters {
        let period_date = add_months(params.start_date, params.timeseries_months_step * iteration);
        for record in baseline {
            let mut row = record.clone();
            row.date = period_date;
            for &offset in &score_columns {
                if let CellValue::Int(value) = row.values[offset] {
                    row.values[offset] = CellValue::Int(mutate_score(value, params, rng));
                }
            }
            series.push(row);
        }
    }

    series
}

/// Generate the full basic dataset: baseline rows followed by all time-series
/// period rows, in period order.
pub fn generate_dataset<R: Rng>(
    schema: &Schema,
    personnel: &[String],
    params: &GenerateParams,
    rng: &mut R,
) -> GenerateResult<Vec<WideRecord>> {
    let baseline = generate_baseline(schema, personnel, params, rng)?;
    let series = generate_timeseries(schema, &baseline, params, rng);
    Ok(baseline.into_iter().chain(series).collect())
}
