//! Input file ingest.
//!
//! An input file has two sections:
//!
//! ```text
//! x  1   2   3   4          <- data section (row- or column-major)
//! y  1   2.1 2.9 4.2
//! dx 0.1 0.1 0.1 0.1
//! dy 0.1 0.1 0.1 0.1
//!                           <- first empty line ends the data section
//! x axis: time[s]           <- last two lines are the axis labels
//! y axis: distance[m]
//! ```
//!
//! The data section ends at the first empty line; a line holding only
//! spaces or tabs is a (zero-length) data record, not a separator.
//!
//! The data section is lower-cased before tokenizing so tags are
//! case-insensitive; labels keep their original case.

use std::path::Path;

use log::{debug, warn};

use crate::domain::{AxisLabels, DataTable};
use crate::error::FitError;
use crate::io::table::build_table;

/// A parsed and validated input file.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub table: DataTable,
    pub labels: AxisLabels,
}

/// Read and parse an input file.
pub fn load_input(path: &Path) -> Result<IngestedData, FitError> {
    let text = std::fs::read_to_string(path).map_err(|e| FitError::io(path, e))?;
    debug!("read {} bytes from '{}'", text.len(), path.display());
    parse_input(&text)
}

/// Parse the full text of an input file.
pub fn parse_input(text: &str) -> Result<IngestedData, FitError> {
    let lines: Vec<&str> = text.trim().lines().collect();

    let separator = lines
        .iter()
        .position(|line| line.is_empty())
        .ok_or_else(|| FitError::Layout("missing empty line between data and axis labels.".to_string()))?;

    let label_lines: Vec<&str> = lines[separator + 1..]
        .iter()
        .copied()
        .filter(|line| !line.trim().is_empty())
        .collect();
    let [.., first, second] = label_lines.as_slice() else {
        return Err(FitError::Layout(format!(
            "expected two axis label lines after the data, found {}.",
            label_lines.len()
        )));
    };
    let labels = parse_axis_labels(first, second)?;

    let data: Vec<String> = lines[..separator].iter().map(|line| line.to_lowercase()).collect();
    let table = build_table(&data)?;

    Ok(IngestedData { table, labels })
}

/// Assign two `<axis-id>:<name>[<unit>]` lines to the x and y axes.
///
/// When one axis id starts with `x` and the other with `y` the assignment is
/// explicit. Otherwise the lines are sorted and the first one is taken as the
/// x label, which gives the same answer for the usual `x axis:`/`y axis:`
/// naming.
pub fn parse_axis_labels(first: &str, second: &str) -> Result<AxisLabels, FitError> {
    let a = split_label(first)?;
    let b = split_label(second)?;

    let (x, y) = match (axis_letter(a.0), axis_letter(b.0)) {
        (Some('x'), Some('y')) => (a.1, b.1),
        (Some('y'), Some('x')) => (b.1, a.1),
        _ => {
            warn!("axis ids '{}' and '{}' are not x/y; assigning labels by sort order", a.0, b.0);
            if first.trim() <= second.trim() { (a.1, b.1) } else { (b.1, a.1) }
        }
    };

    Ok(AxisLabels {
        x: x.to_string(),
        y: y.to_string(),
    })
}

/// Split a label line into `(axis id, label text)` at the first colon.
fn split_label(line: &str) -> Result<(&str, &str), FitError> {
    let line = line.trim();
    let (id, text) = line
        .split_once(':')
        .ok_or_else(|| FitError::Layout(format!("axis label line '{line}' has no ':' separator.")))?;
    Ok((id.trim(), text.trim()))
}

fn axis_letter(id: &str) -> Option<char> {
    id.chars()
        .next()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| matches!(c, 'x' | 'y'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = "\
X 1 2 3 4
Y 1 2.1 2.9 4.2
DX 0.1 0.1 0.1 0.1
DY 0.1 0.1 0.1 0.1

x axis: Time[s]
y axis: Distance[m]
";

    #[test]
    fn parses_data_and_labels() {
        let ingest = parse_input(FILE).unwrap();
        assert_eq!(ingest.table.len(), 4);
        assert_eq!(ingest.labels.x, "Time[s]");
        assert_eq!(ingest.labels.y, "Distance[m]");
    }

    #[test]
    fn swapped_label_lines_keep_axis_assignment() {
        let swapped = FILE.replace(
            "x axis: Time[s]\ny axis: Distance[m]",
            "y axis: Distance[m]\nx axis: Time[s]",
        );
        let ingest = parse_input(&swapped).unwrap();
        assert_eq!(ingest.labels.x, "Time[s]");
        assert_eq!(ingest.labels.y, "Distance[m]");
    }

    #[test]
    fn non_xy_axis_ids_fall_back_to_sort_order() {
        let labels = parse_axis_labels("b axis: second", "a axis: first").unwrap();
        assert_eq!(labels.x, "first");
        assert_eq!(labels.y, "second");
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let ingest = parse_input(&FILE.replace('\n', "\r\n")).unwrap();
        assert_eq!(ingest.table.len(), 4);
        assert_eq!(ingest.labels.y, "Distance[m]");
    }

    #[test]
    fn missing_empty_line_is_a_layout_error() {
        let text = "x 1 2 3\ny 1 2 3\ndx 1 1 1\ndy 1 1 1\nx axis: a\ny axis: b";
        assert!(matches!(parse_input(text), Err(FitError::Layout(_))));
    }

    #[test]
    fn whitespace_only_line_is_a_data_record() {
        let text = "x 1 2 3\ny 1 2 3\n   \ndx 1 1 1\ndy 1 1 1\n\nx axis: a\ny axis: b";
        assert!(matches!(parse_input(text), Err(FitError::ShapeMismatch)));
    }

    #[test]
    fn single_label_line_is_a_layout_error() {
        let text = "x 1 2 3\ny 1 2 3\ndx 1 1 1\ndy 1 1 1\n\nx axis: a";
        assert!(matches!(parse_input(text), Err(FitError::Layout(_))));
    }

    #[test]
    fn label_without_colon_is_a_layout_error() {
        assert!(matches!(
            parse_axis_labels("x axis Time", "y axis: Distance"),
            Err(FitError::Layout(_))
        ));
    }

    #[test]
    fn table_errors_surface_through_ingest() {
        let text = "x 1 2 3\ny 1 2\ndx 1 1 1\ndy 1 1 1\n\nx axis: a\ny axis: b";
        assert!(matches!(parse_input(text), Err(FitError::ShapeMismatch)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_input(Path::new("/nonexistent/linfit-input.txt")).unwrap_err();
        assert!(matches!(err, FitError::Io { .. }));
    }
}
