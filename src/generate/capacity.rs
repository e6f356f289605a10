//! Capacity-aware synthetic dataset generation.
//!
//! Extends the basic baseline: each person's current capacity per skill is
//! derived from the mean of their scorer ratings, and a bounded random
//! subset of improvable skills is marked as targets with incremented
//! targeted-capacity values.

use rand::Rng;

use crate::error::{GenerateError, GenerateResult};
use crate::models::{CellValue, WideRecord};
use crate::schema::{Schema, SkillField};

use super::{generate_baseline, generate_timeseries, GenerateParams};

/// Generate a baseline wide table with derived capacities.
///
/// For each person:
///
/// 1. current_capacity per skill = the rounded mean of that person's
///    per-scorer scores, jittered uniformly in [mean-1, mean+1]. The jitter
///    window is deliberately not clamped to the score range, so a value one
///    above score_max can occur; consumers must tolerate it.
/// 2. A target count is drawn from [target_skills_min, target_skills_max]
///    and that many distinct skills are sampled from the pool of skills
///    whose current capacity is below score_max. A pool smaller than the
///    requested count is an error, not an infinite retry.
/// 3. Each chosen skill's targeted_capacity = current capacity plus a
///    uniform increment from [target_increment_min, target_increment_max],
///    clamped to score_max.
///
/// Capacity values are person-level: they are written into every one of the
/// person's scorer rows.
pub fn generate_capacity_baseline<R: Rng>(
    schema: &Schema,
    personnel: &[String],
    params: &GenerateParams,
    rng: &mut R,
) -> GenerateResult<Vec<WideRecord>> {
    let mut records = generate_baseline(schema, personnel, params, rng)?;

    // Column offsets per skill, resolved once.
    let mut score_cols = Vec::with_capacity(schema.skills().len());
    let mut current_cols = Vec::with_capacity(schema.skills().len());
    let mut targeted_cols = Vec::with_capacity(schema.skills().len());
    for (offset, (_, field)) in schema.columns().enumerate() {
        match field {
            SkillField::Score => score_cols.push(offset),
            SkillField::CurrentCapacity => current_cols.push(offset),
            SkillField::TargetedCapacity => targeted_cols.push(offset),
            _ => {}
        }
    }

    let rows_per_person = schema.scorers().len();
    for person_rows in records.chunks_mut(rows_per_person) {
        // (1) derive current capacity per skill from the scorer ratings
        let mut currents = Vec::with_capacity(schema.skills().len());
        for skill_idx in 0..schema.skills().len() {
            let score_col = score_cols[skill_idx];
            let sum: i64 = person_rows
                .iter()
                .filter_map(|row| row.values[score_col].as_int())
                .sum();
            let mean = (sum as f64 / person_rows.len() as f64).round() as i64;
            let current = rng.gen_range(mean - 1..=mean + 1);

            for row in person_rows.iter_mut() {
                row.values[current_cols[skill_idx]] = CellValue::Int(current);
            }
            currents.push(current);
        }

        // (2) pick distinct target skills from the improvable pool
        let eligible: Vec<usize> = (0..schema.skills().len())
            .filter(|idx| currents[*idx] < params.score_max)
            .collect();
        let requested = rng.gen_range(params.target_skills_min..=params.target_skills_max);
        if eligible.len() < requested {
            return Err(GenerateError::TargetPoolExhausted {
                eligible: eligible.len(),
                requested,
            });
        }
        let chosen = rand::seq::index::sample(rng, eligible.len(), requested);

        // (3) set targeted capacities, clamped to the ceiling
        for pick in chosen.iter() {
            let skill_idx = eligible[pick];
            let increment =
                rng.gen_range(params.target_increment_min..=params.target_increment_max);
            let targeted = (currents[skill_idx] + increment).min(params.score_max);

            for row in person_rows.iter_mut() {
                row.values[targeted_cols[skill_idx]] = CellValue::Int(targeted);
            }
        }
    }

    Ok(records)
}

/// Generate the full capacity-aware dataset: derived-capacity baseline plus
/// the standard progression time series.
pub fn generate_capacity_dataset<R: Rng>(
    schema: &Schema,
    personnel: &[String],
    params: &GenerateParams,
    rng: &mut R,
) -> GenerateResult<Vec<WideRecord>> {
    let baseline = generate_capacity_baseline(schema, personnel, params, rng)?;
    let series = generate_timeseries(schema, &baseline, params, rng);
    Ok(baseline.into_iter().chain(series).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn schema() -> Schema {
        Schema::new(
            &["A1", "B1", "C1", "D1", "E1", "F1", "G1", "H1"],
            &["Self", "PI", "DM", "ODK", "SO"],
        )
        .unwrap()
    }

    fn people() -> Vec<String> {
        vec!["Alice".into(), "Bob".into()]
    }

    fn column_offsets(schema: &Schema, field: SkillField) -> Vec<usize> {
        schema
            .columns()
            .enumerate()
            .filter(|(_, (_, f))| *f == field)
            .map(|(offset, _)| offset)
            .collect()
    }

    #[test]
    fn test_current_capacity_tracks_score_mean() {
        let schema = schema();
        let params = GenerateParams::default();
        let mut rng = StdRng::seed_from_u64(17);

        let baseline =
            generate_capacity_baseline(&schema, &people(), &params, &mut rng).unwrap();

        let score_cols = column_offsets(&schema, SkillField::Score);
        let current_cols = column_offsets(&schema, SkillField::CurrentCapacity);
        let rows_per_person = schema.scorers().len();

        for person_rows in baseline.chunks(rows_per_person) {
            for (skill_idx, (&score_col, &current_col)) in
                score_cols.iter().zip(&current_cols).enumerate()
            {
                let sum: i64 = person_rows
                    .iter()
                    .map(|r| r.values[score_col].as_int().unwrap())
                    .sum();
                let mean = (sum as f64 / rows_per_person as f64).round() as i64;

                let current = person_rows[0].values[current_col]
                    .as_int()
                    .unwrap_or_else(|| panic!("skill {skill_idx} missing current capacity"));
                assert!((current - mean).abs() <= 1);

                // person-level: identical across all scorer rows
                for row in person_rows {
                    assert_eq!(row.values[current_col].as_int(), Some(current));
                }
            }
        }
    }

    #[test]
    fn test_current_capacity_jitter_may_exceed_ceiling_by_one() {
        let schema = schema();
        let params = GenerateParams::default();
        let mut rng = StdRng::seed_from_u64(23);
        let baseline =
            generate_capacity_baseline(&schema, &people(), &params, &mut rng).unwrap();

        let current_cols = column_offsets(&schema, SkillField::CurrentCapacity);
        for row in &baseline {
            for &col in &current_cols {
                let current = row.values[col].as_int().unwrap();
                // Unclamped jitter window: at most one past either bound.
                assert!(current >= params.score_min - 1);
                assert!(current <= params.score_max + 1);
            }
        }
    }

    #[test]
    fn test_target_selection_bounds_and_values() {
        let schema = schema();
        let params = GenerateParams::default();
        let mut rng = StdRng::seed_from_u64(29);
        let baseline =
            generate_capacity_baseline(&schema, &people(), &params, &mut rng).unwrap();

        let current_cols = column_offsets(&schema, SkillField::CurrentCapacity);
        let targeted_cols = column_offsets(&schema, SkillField::TargetedCapacity);
        let rows_per_person = schema.scorers().len();

        for person_rows in baseline.chunks(rows_per_person) {
            let representative = &person_rows[0];
            let mut targeted_count = 0;

            for (&current_col, &targeted_col) in current_cols.iter().zip(&targeted_cols) {
                let current = representative.values[current_col].as_int().unwrap();
                match representative.values[targeted_col].as_int() {
                    Some(targeted) => {
                        targeted_count += 1;
                        // only improvable skills get targets
                        assert!(current < params.score_max);
                        assert!(targeted > current);
                        assert!(targeted <= params.score_max);
                        // person-level
                        for row in person_rows {
                            assert_eq!(row.values[targeted_col].as_int(), Some(targeted));
                        }
                    }
                    None => assert!(representative.values[targeted_col].is_empty()),
                }
            }

            assert!(targeted_count >= params.target_skills_min);
            assert!(targeted_count <= params.target_skills_max);
        }
    }

    #[test]
    fn test_target_pool_exhaustion_is_an_error() {
        // Only 2 skills exist but at least 5 targets are requested.
        let schema = Schema::new(&["A1", "B1"], &["Self", "PI"]).unwrap();
        let params = GenerateParams {
            target_skills_min: 5,
            target_skills_max: 5,
            ..GenerateParams::default()
        };
        let mut rng = StdRng::seed_from_u64(1);

        let err =
            generate_capacity_baseline(&schema, &people(), &params, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::TargetPoolExhausted { requested: 5, .. }
        ));
    }

    #[test]
    fn test_capacity_dataset_shape() {
        let schema = schema();
        let params = GenerateParams::default();
        let mut rng = StdRng::seed_from_u64(5);

        let dataset = generate_capacity_dataset(&schema, &people(), &params, &mut rng).unwrap();
        assert_eq!(dataset.len(), 40); // 10 baseline + 3 x 10 periods

        // capacities survive the time series untouched
        let current_cols = column_offsets(&schema, SkillField::CurrentCapacity);
        let rows_per_period = 10;
        for (period_row, base_row) in dataset[rows_per_period..]
            .iter()
            .zip(dataset[..rows_per_period].iter().cycle())
        {
            for &col in &current_cols {
                assert_eq!(period_row.values[col], base_row.values[col]);
            }
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let schema = schema();
        let params = GenerateParams::default();
        let a = generate_capacity_dataset(&schema, &people(), &params, &mut StdRng::seed_from_u64(8))
            .unwrap();
        let b = generate_capacity_dataset(&schema, &people(), &params, &mut StdRng::seed_from_u64(8))
            .unwrap();
        assert_eq!(a, b);
    }
}
