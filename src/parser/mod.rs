//! Delimited-table I/O for the three table shapes.
//!
//! Thin wrapper over the `csv` crate: reads coerce cells into typed records
//! with cell-level error context (row, column, offending value), writes
//! render records back out with an optional header row. Dates are written
//! ISO (`%Y-%m-%d`); the input parse format is configurable.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{ParseError, ParseResult, ReshapeResult, SchemaError};
use crate::models::{CellValue, SkillRecord, TidyRecord, WideRecord};
use crate::schema::{Schema, SkillField};

/// Default parse format for the wide table's `Date` column.
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%y";

/// Date rendering format for all written tables.
pub const WRITE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Tidy-table header, in column order.
pub const TIDY_HEADER: [&str; 6] = ["Date", "Person", "Scorer", "Skill", "SkillField", "Value"];

/// Skill-table header, in column order.
pub const SKILL_HEADER: [&str; 5] = [
    "Skill",
    "Date",
    "Person",
    "Current Capacity",
    "Targeted Capacity",
];

// =============================================================================
// Reading
// =============================================================================

/// Read a wide assessment table, verifying the header against the schema's
/// derived column layout.
///
/// `Date` cells are parsed with `date_format`; numeric skill-field cells are
/// parsed as nullable integers (empty cell = absent value, distinct from
/// zero); notes cells stay textual.
pub fn read_wide_table(
    path: &Path,
    schema: &Schema,
    date_format: &str,
) -> ParseResult<Vec<WideRecord>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let expected = schema.wide_header();
    check_header(reader.headers()?, &expected)?;

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        // +2: one for the header line, one for 1-based numbering
        let line = idx + 2;

        let date = parse_date(row.get(0).unwrap_or(""), date_format, line, "Date")?;
        let person = row.get(1).unwrap_or("").to_string();
        let scorer = row.get(2).unwrap_or("").to_string();

        let mut values = Vec::with_capacity(schema.value_count());
        for (offset, (skill, field)) in schema.columns().enumerate() {
            let cell = row.get(3 + offset).unwrap_or("");
            values.push(parse_cell(cell, field, line, skill)?);
        }

        records.push(WideRecord {
            date,
            person,
            scorer,
            values,
        });
    }

    Ok(records)
}

/// Read a tidy table produced by the melt transform (or an external source
/// of the same shape).
///
/// A `SkillField` cell with no known mapping is a schema-consistency error
/// and is reported with its row and field name, never silently skipped.
pub fn read_tidy_table(path: &Path, date_format: &str) -> ReshapeResult<Vec<TidyRecord>> {
    let file = File::open(path).map_err(ParseError::Io)?;
    let mut reader = csv::Reader::from_reader(file);

    let expected: Vec<String> = TIDY_HEADER.iter().map(|s| s.to_string()).collect();
    check_header(reader.headers().map_err(ParseError::Csv)?, &expected)?;

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(ParseError::Csv)?;
        let line = idx + 2;

        let date = parse_date(row.get(0).unwrap_or(""), date_format, line, "Date")?;
        let person = row.get(1).unwrap_or("").to_string();
        let scorer = match row.get(2).unwrap_or("") {
            "" => None,
            s => Some(s.to_string()),
        };
        let skill = row.get(3).unwrap_or("").to_string();

        let field_name = row.get(4).unwrap_or("");
        let field =
            SkillField::from_suffix(field_name).ok_or_else(|| SchemaError::UnmappedField {
                row: line,
                field: field_name.to_string(),
            })?;

        let value = parse_cell(row.get(5).unwrap_or(""), field, line, &skill)?;

        records.push(TidyRecord {
            date,
            person,
            scorer,
            skill,
            field,
            value,
        });
    }

    Ok(records)
}

/// Read a newline-delimited personnel list. Blank lines are dropped.
pub fn read_personnel(path: &Path) -> ParseResult<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

fn check_header(found: &csv::StringRecord, expected: &[String]) -> ParseResult<()> {
    for (position, want) in expected.iter().enumerate() {
        match found.get(position) {
            None => return Err(ParseError::MissingColumn(want.clone())),
            Some(got) if got != want => {
                return Err(ParseError::HeaderMismatch {
                    position,
                    expected: want.clone(),
                    found: got.to_string(),
                })
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn parse_date(cell: &str, format: &str, row: usize, column: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(cell, format).map_err(|e| ParseError::MalformedCell {
        row,
        column: column.to_string(),
        value: cell.to_string(),
        message: format!("malformed date ({})", e),
    })
}

fn parse_cell(cell: &str, field: SkillField, row: usize, skill: &str) -> ParseResult<CellValue> {
    if cell.is_empty() {
        return Ok(CellValue::Empty);
    }
    if field.is_numeric() {
        cell.parse::<i64>()
            .map(CellValue::Int)
            .map_err(|_| ParseError::MalformedCell {
                row,
                column: Schema::column_name(skill, field),
                value: cell.to_string(),
                message: "expected an integer".to_string(),
            })
    } else {
        Ok(CellValue::Text(cell.to_string()))
    }
}

// =============================================================================
// Writing
// =============================================================================

/// Write a wide table. No partial-write recovery: a failed write may leave a
/// truncated file.
pub fn write_wide_table(
    path: &Path,
    schema: &Schema,
    records: &[WideRecord],
    include_header: bool,
) -> ParseResult<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);

    if include_header {
        writer.write_record(schema.wide_header())?;
    }
    for record in records {
        let mut row = Vec::with_capacity(3 + record.values.len());
        row.push(record.date.format(WRITE_DATE_FORMAT).to_string());
        row.push(record.person.clone());
        row.push(record.scorer.clone());
        row.extend(record.values.iter().map(CellValue::to_cell));
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a tidy table.
pub fn write_tidy_table(
    path: &Path,
    records: &[TidyRecord],
    include_header: bool,
) -> ParseResult<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);

    if include_header {
        writer.write_record(TIDY_HEADER)?;
    }
    for record in records {
        writer.write_record([
            record.date.format(WRITE_DATE_FORMAT).to_string(),
            record.person.clone(),
            record.scorer.clone().unwrap_or_default(),
            record.skill.clone(),
            record.field.suffix().to_string(),
            record.value.to_cell(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a skill table.
pub fn write_skill_table(
    path: &Path,
    records: &[SkillRecord],
    include_header: bool,
) -> ParseResult<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);

    if include_header {
        writer.write_record(SKILL_HEADER)?;
    }
    for record in records {
        writer.write_record([
            record.skill.clone(),
            record.date.format(WRITE_DATE_FORMAT).to_string(),
            record.person.clone(),
            record.current_capacity.to_cell(),
            record.targeted_capacity.to_cell(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
