//! Data-section parsing: raw text lines to a validated `DataTable`.
//!
//! Two layouts are accepted and normalized to the same intermediate form
//! (one `Series` per role) before the table is assembled:
//!
//! ```text
//! row-major            column-major
//! x  1   2   3         x  y   dx  dy
//! y  2.1 3.9 6.2       1  2.1 0.1 0.2
//! dx 0.1 0.1 0.1       2  3.9 0.1 0.2
//! dy 0.2 0.2 0.2       3  6.2 0.1 0.2
//! ```
//!
//! Which one applies is decided once, up front, from the first record.

use std::collections::BTreeSet;

use log::debug;

use crate::domain::{DataTable, FieldRole, Orientation, Series, check_uncertainties};
use crate::error::FitError;

/// Parse and validate the data lines of an input file.
///
/// Lines are expected to be lower-cased already; tags are matched exactly.
pub fn build_table<S: AsRef<str>>(lines: &[S]) -> Result<DataTable, FitError> {
    let records: Vec<Vec<&str>> = lines
        .iter()
        .map(|line| line.as_ref().split_whitespace().collect())
        .collect();

    let lengths: BTreeSet<usize> = records.iter().map(Vec::len).collect();
    if lengths.len() != 1 || lengths.contains(&0) {
        return Err(FitError::ShapeMismatch);
    }

    let orientation = detect_orientation(&records[0]);
    debug!(
        "data section: {} records of {} tokens, {:?}",
        records.len(),
        records[0].len(),
        orientation
    );

    let series = match orientation {
        Orientation::RowMajor => parse_row_major(&records)?,
        Orientation::ColumnMajor => parse_column_major(&records)?,
    };

    DataTable::from_series(series)
}

/// Column-major iff the first record holds exactly the four tags.
pub fn detect_orientation(first: &[&str]) -> Orientation {
    let tokens: BTreeSet<&str> = first.iter().copied().collect();
    let tags: BTreeSet<&str> = FieldRole::ALL.iter().map(|r| r.tag()).collect();
    if tokens == tags {
        Orientation::ColumnMajor
    } else {
        Orientation::RowMajor
    }
}

fn parse_row_major(records: &[Vec<&str>]) -> Result<Vec<Series>, FitError> {
    records
        .iter()
        .map(|record| {
            let (tag, tokens) = record
                .split_first()
                .ok_or(FitError::ShapeMismatch)?;
            let role = parse_tag(tag)?;
            let values = parse_values(role, tokens.iter().copied())?;
            Ok(Series { role, values })
        })
        .collect()
}

fn parse_column_major(records: &[Vec<&str>]) -> Result<Vec<Series>, FitError> {
    let (header, rows) = records.split_first().ok_or(FitError::ShapeMismatch)?;

    header
        .iter()
        .enumerate()
        .map(|(col, tag)| {
            let role = parse_tag(tag)?;
            let values = parse_values(role, rows.iter().map(|row| row[col]))?;
            Ok(Series { role, values })
        })
        .collect()
}

fn parse_tag(tag: &str) -> Result<FieldRole, FitError> {
    FieldRole::from_tag(tag).ok_or_else(|| {
        FitError::Tag(format!("unknown series tag '{tag}' (expected x, y, dx or dy)"))
    })
}

fn parse_values<'a>(
    role: FieldRole,
    tokens: impl Iterator<Item = &'a str>,
) -> Result<Vec<f64>, FitError> {
    let values = tokens
        .map(parse_number)
        .collect::<Result<Vec<f64>, FitError>>()?;
    check_uncertainties(role, &values)?;
    Ok(values)
}

fn parse_number(token: &str) -> Result<f64, FitError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FitError::NumericParse {
            token: token.to_string(),
        })
}
