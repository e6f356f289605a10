//! File-to-file orchestration of the reshaping transforms.
//!
//! These are the entry points the CLI drives: each reads a table, applies
//! the pure transform(s), and writes the result, returning row counts for
//! status reporting.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReshapeError, ReshapeResult};
use crate::parser::{
    read_tidy_table, read_wide_table, write_skill_table, write_tidy_table, DEFAULT_DATE_FORMAT,
    WRITE_DATE_FORMAT,
};
use crate::schema::Schema;
use crate::transform::{tidy_to_skill, wide_to_tidy};

/// Options shared by the reshaping entry points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReshapeOptions {
    /// Parse format for the input table's `Date` column.
    pub date_format: String,

    /// Emit a header row in the output table.
    pub include_header: bool,

    /// Include scorer-attributed fields in the skill table. Currently
    /// rejected by the pivot transform.
    pub include_scorer_fields: bool,
}

impl Default for ReshapeOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            include_header: true,
            include_scorer_fields: false,
        }
    }
}

impl ReshapeOptions {
    /// Defaults for inputs produced by this tool (ISO dates).
    pub fn for_tidy_input() -> Self {
        Self {
            date_format: WRITE_DATE_FORMAT.to_string(),
            ..Self::default()
        }
    }
}

/// Row counts from a melt run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MeltReport {
    pub wide_rows: usize,
    pub tidy_rows: usize,
}

/// Row counts from a pivot run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PivotReport {
    pub tidy_rows: usize,
    pub skill_rows: usize,
}

/// Row counts from a full wide-to-skill run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReshapeReport {
    pub wide_rows: usize,
    pub tidy_rows: usize,
    pub skill_rows: usize,
}

/// Melt a wide CSV into a tidy CSV.
pub fn melt_csv(
    input: &Path,
    output: &Path,
    schema: &Schema,
    options: &ReshapeOptions,
) -> ReshapeResult<MeltReport> {
    let wide = read_wide_table(input, schema, &options.date_format)?;
    if wide.is_empty() {
        return Err(ReshapeError::EmptyInput);
    }

    let tidy = wide_to_tidy(schema, &wide);
    write_tidy_table(output, &tidy, options.include_header)?;

    Ok(MeltReport {
        wide_rows: wide.len(),
        tidy_rows: tidy.len(),
    })
}

/// Pivot a tidy CSV into a skill CSV.
pub fn pivot_csv(
    input: &Path,
    output: &Path,
    options: &ReshapeOptions,
) -> ReshapeResult<PivotReport> {
    let tidy = read_tidy_table(input, &options.date_format)?;
    if tidy.is_empty() {
        return Err(ReshapeError::EmptyInput);
    }

    let skill = tidy_to_skill(&tidy, options.include_scorer_fields)?;
    write_skill_table(output, &skill, options.include_header)?;

    Ok(PivotReport {
        tidy_rows: tidy.len(),
        skill_rows: skill.len(),
    })
}

/// Reshape a wide CSV all the way to a skill CSV, melting in memory.
pub fn reshape_csv(
    input: &Path,
    output: &Path,
    schema: &Schema,
    options: &ReshapeOptions,
) -> ReshapeResult<ReshapeReport> {
    let wide = read_wide_table(input, schema, &options.date_format)?;
    if wide.is_empty() {
        return Err(ReshapeError::EmptyInput);
    }

    let tidy = wide_to_tidy(schema, &wide);
    let skill = tidy_to_skill(&tidy, options.include_scorer_fields)?;
    write_skill_table(output, &skill, options.include_header)?;

    Ok(ReshapeReport {
        wide_rows: wide.len(),
        tidy_rows: tidy.len(),
        skill_rows: skill.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use std::fs;
    use tempfile::tempdir;

    fn small_schema() -> Schema {
        Schema::new(&["A1", "B1"], &["Self", "PI"]).unwrap()
    }

    fn wide_fixture(dir: &tempfile::TempDir, schema: &Schema) -> std::path::PathBuf {
        let header = schema.wide_header().join(",");
        // Two rows with both capacity cells populated for each skill.
        let body = "09/01/19,Alice,Self,1,2,3,n,4,5,1,2,3,n,4,5\n\
                    09/01/19,Alice,PI,1,2,3,n,4,5,1,2,3,n,4,5\n";
        let path = dir.path().join("wide.csv");
        fs::write(&path, format!("{header}\n{body}")).unwrap();
        path
    }

    #[test]
    fn test_melt_csv_end_to_end() {
        let dir = tempdir().unwrap();
        let schema = small_schema();
        let input = wide_fixture(&dir, &schema);
        let output = dir.path().join("tidy.csv");

        let report = melt_csv(&input, &output, &schema, &ReshapeOptions::default()).unwrap();
        assert_eq!(report.wide_rows, 2);
        assert_eq!(report.tidy_rows, 2 * schema.value_count());

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("Date,Person,Scorer,Skill,SkillField,Value"));
        // header + one line per observation
        assert_eq!(content.lines().count(), 1 + report.tidy_rows);
    }

    #[test]
    fn test_reshape_csv_end_to_end() {
        let dir = tempdir().unwrap();
        let schema = small_schema();
        let input = wide_fixture(&dir, &schema);
        let output = dir.path().join("skill.csv");

        let report = reshape_csv(&input, &output, &schema, &ReshapeOptions::default()).unwrap();
        // One skill record per (skill, date, person): 2 skills x 1 date x 1 person.
        assert_eq!(report.skill_rows, 2);

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("Skill,Date,Person,Current Capacity,Targeted Capacity"));
        assert!(content.contains("A1,2019-09-01,Alice,4,5"));
        assert!(content.contains("B1,2019-09-01,Alice,4,5"));
    }

    #[test]
    fn test_melt_then_pivot_matches_reshape() {
        let dir = tempdir().unwrap();
        let schema = small_schema();
        let input = wide_fixture(&dir, &schema);

        let tidy_path = dir.path().join("tidy.csv");
        let via_files = dir.path().join("skill_a.csv");
        let direct = dir.path().join("skill_b.csv");

        melt_csv(&input, &tidy_path, &schema, &ReshapeOptions::default()).unwrap();
        pivot_csv(&tidy_path, &via_files, &ReshapeOptions::for_tidy_input()).unwrap();
        reshape_csv(&input, &direct, &schema, &ReshapeOptions::default()).unwrap();

        assert_eq!(
            fs::read_to_string(&via_files).unwrap(),
            fs::read_to_string(&direct).unwrap()
        );
    }

    #[test]
    fn test_empty_input_rejected() {
        let dir = tempdir().unwrap();
        let schema = small_schema();
        let input = dir.path().join("empty.csv");
        fs::write(&input, format!("{}\n", schema.wide_header().join(","))).unwrap();
        let output = dir.path().join("out.csv");

        let err = melt_csv(&input, &output, &schema, &ReshapeOptions::default()).unwrap_err();
        assert!(matches!(err, ReshapeError::EmptyInput));
    }

    #[test]
    fn test_scorer_fields_flag_fails_fast() {
        let dir = tempdir().unwrap();
        let schema = small_schema();
        let input = wide_fixture(&dir, &schema);
        let output = dir.path().join("out.csv");

        let options = ReshapeOptions {
            include_scorer_fields: true,
            ..ReshapeOptions::default()
        };
        let err = reshape_csv(&input, &output, &schema, &options).unwrap_err();
        assert!(matches!(
            err,
            ReshapeError::Transform(TransformError::ScorerFieldsUnsupported)
        ));
    }

    #[test]
    fn test_generated_dataset_survives_reshape() {
        use crate::generate::{generate_capacity_baseline, GenerateParams};
        use crate::parser::write_wide_table;
        use crate::schema::SkillField;
        use rand::{rngs::StdRng, SeedableRng};

        let dir = tempdir().unwrap();
        let schema = Schema::new(
            &["A1", "B1", "C1", "D1", "E1", "F1"],
            &["Self", "PI", "DM"],
        )
        .unwrap();
        let params = GenerateParams::default();
        let mut rng = StdRng::seed_from_u64(31);
        let personnel = vec!["Alice".to_string(), "Bob".to_string()];

        let baseline =
            generate_capacity_baseline(&schema, &personnel, &params, &mut rng).unwrap();
        let input = dir.path().join("generated.csv");
        write_wide_table(&input, &schema, &baseline, true).unwrap();
        let output = dir.path().join("skill.csv");

        let options = ReshapeOptions {
            date_format: WRITE_DATE_FORMAT.to_string(),
            ..ReshapeOptions::default()
        };
        let report = reshape_csv(&input, &output, &schema, &options).unwrap();

        // Both capacity columns are always observed (an empty targeted cell
        // still counts as observed), so exactly one skill record exists per
        // (skill, person) at the single baseline date.
        assert_eq!(report.skill_rows, schema.skills().len() * personnel.len());

        // Targeted skills carry a non-empty targeted capacity in the output.
        let targeted_cols: Vec<usize> = schema
            .columns()
            .enumerate()
            .filter(|(_, (_, f))| *f == SkillField::TargetedCapacity)
            .map(|(offset, _)| offset)
            .collect();
        let targeted_count: usize = baseline
            .chunks(schema.scorers().len())
            .map(|rows| {
                targeted_cols
                    .iter()
                    .filter(|&&col| !rows[0].values[col].is_empty())
                    .count()
            })
            .sum();
        let content = fs::read_to_string(&output).unwrap();
        let populated = content
            .lines()
            .skip(1)
            .filter(|line| !line.ends_with(','))
            .count();
        assert_eq!(populated, targeted_count);
    }

    #[test]
    fn test_no_header_option() {
        let dir = tempdir().unwrap();
        let schema = small_schema();
        let input = wide_fixture(&dir, &schema);
        let output = dir.path().join("tidy.csv");

        let options = ReshapeOptions {
            include_header: false,
            ..ReshapeOptions::default()
        };
        let report = melt_csv(&input, &output, &schema, &options).unwrap();
        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), report.tidy_rows);
    }
}
