//! Shared "fit pipeline" logic.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! read file -> table + labels -> fit -> residuals -> plot -> exports
//!
//! The binary then only decides what to print.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::debug;
use rayon::prelude::*;

use crate::domain::{AxisLabels, DataTable, FitConfig, FitResult, PointResidual};
use crate::error::FitError;
use crate::fit::fit_linear;
use crate::io::ingest::load_input;
use crate::io::{write_fit_json, write_residuals_csv};
use crate::plot::{DEFAULT_PLOT_FILE, PlotRequest, PlotSink, SvgPlotSink};
use crate::report::{compute_residuals, format_fit};

/// All computed outputs of a single input file.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    pub input: PathBuf,
    pub table: DataTable,
    pub labels: AxisLabels,
    pub fit: FitResult,
    pub residuals: Vec<PointResidual>,
    /// The formatted fit summary.
    pub report: String,
}

/// Fit one input file and hand the chart to `sink` when `plot_path` is set.
///
/// Nothing is drawn unless the fit succeeded.
pub fn fit_file(input: &Path, sink: &mut dyn PlotSink, plot_path: Option<&Path>) -> Result<FitOutcome, FitError> {
    let ingest = load_input(input)?;
    let fit = fit_linear(&ingest.table)?;
    debug!("'{}': {fit:?}", input.display());

    if let Some(path) = plot_path {
        sink.render(&PlotRequest::new(&ingest.table, &fit, &ingest.labels, path))?;
    }

    let residuals = compute_residuals(&ingest.table, &fit);
    let report = format_fit(&fit);

    Ok(FitOutcome {
        input: input.to_path_buf(),
        table: ingest.table,
        labels: ingest.labels,
        fit,
        residuals,
        report,
    })
}

/// Fit `input`, write the chart to `linear_fit.svg`, and return the report.
pub fn fit_report(input: &Path) -> Result<String, FitError> {
    let mut sink = SvgPlotSink::default();
    fit_file(input, &mut sink, Some(Path::new(DEFAULT_PLOT_FILE))).map(|outcome| outcome.report)
}

/// Fit every configured input, in parallel, returning results in input order.
pub fn run_batch(config: &FitConfig) -> Vec<Result<FitOutcome, FitError>> {
    let prefixes = output_prefixes(&config.inputs);
    config
        .inputs
        .par_iter()
        .zip(prefixes.par_iter())
        .map(|(input, prefix)| run_one(config, input, prefix.as_deref()))
        .collect()
}

fn run_one(config: &FitConfig, input: &Path, prefix: Option<&str>) -> Result<FitOutcome, FitError> {
    let mut sink = SvgPlotSink::new(config.plot_width, config.plot_height);
    let plot_path = config.plot_path.as_deref().map(|p| output_path_for(p, prefix));

    let outcome = fit_file(input, &mut sink, plot_path.as_deref())?;

    if let Some(path) = &config.export_json {
        write_fit_json(&output_path_for(path, prefix), input, &outcome.fit, &outcome.labels)?;
    }
    if let Some(path) = &config.export_residuals {
        write_residuals_csv(&output_path_for(path, prefix), &outcome.residuals)?;
    }

    Ok(outcome)
}

/// Output file-name prefix for each input, so outputs never collide.
///
/// A single input gets no prefix. Otherwise each input is prefixed with its
/// file stem, and inputs whose stems repeat (`a/run1.txt`, `b/run1.txt`) also
/// get their 1-based position: `run1-1`, `run1-2`.
pub fn output_prefixes(inputs: &[PathBuf]) -> Vec<Option<String>> {
    if inputs.len() < 2 {
        return vec![None; inputs.len()];
    }

    let stems: Vec<String> = inputs
        .iter()
        .map(|input| input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default())
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for stem in &stems {
        *counts.entry(stem.as_str()).or_default() += 1;
    }

    stems
        .iter()
        .enumerate()
        .map(|(idx, stem)| {
            if counts[stem.as_str()] > 1 {
                Some(format!("{stem}-{}", idx + 1))
            } else {
                Some(stem.clone())
            }
        })
        .collect()
}

/// Prefix an output file name with `prefix`, if any.
pub fn output_path_for(base: &Path, prefix: Option<&str>) -> PathBuf {
    let Some(prefix) = prefix else {
        return base.to_path_buf();
    };
    let name = base.file_name().map(|s| s.to_string_lossy()).unwrap_or_default();
    base.with_file_name(format!("{prefix}_{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(list: &[&str]) -> Vec<PathBuf> {
        list.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn single_input_keeps_output_path() {
        let prefixes = output_prefixes(&paths(&["data/run1.txt"]));
        assert_eq!(prefixes, vec![None]);
        let p = output_path_for(Path::new("out/linear_fit.svg"), prefixes[0].as_deref());
        assert_eq!(p, PathBuf::from("out/linear_fit.svg"));
    }

    #[test]
    fn several_inputs_prefix_output_with_stem() {
        let prefixes = output_prefixes(&paths(&["data/run1.txt", "b.dat"]));
        let p = output_path_for(Path::new("out/linear_fit.svg"), prefixes[0].as_deref());
        assert_eq!(p, PathBuf::from("out/run1_linear_fit.svg"));
        let p = output_path_for(Path::new("fit.json"), prefixes[1].as_deref());
        assert_eq!(p, PathBuf::from("b_fit.json"));
    }

    #[test]
    fn repeated_stems_get_distinct_outputs() {
        let prefixes = output_prefixes(&paths(&["a/run1.txt", "b/run1.txt", "c/run2.txt"]));
        assert_eq!(
            prefixes,
            vec![Some("run1-1".to_string()), Some("run1-2".to_string()), Some("run2".to_string())]
        );

        let outputs: Vec<PathBuf> = prefixes
            .iter()
            .map(|prefix| output_path_for(Path::new("linear_fit.svg"), prefix.as_deref()))
            .collect();
        assert_ne!(outputs[0], outputs[1]);
        assert_eq!(outputs[2], PathBuf::from("run2_linear_fit.svg"));
    }

    #[test]
    fn same_file_twice_gets_distinct_outputs() {
        let prefixes = output_prefixes(&paths(&["run1.txt", "run1.txt"]));
        assert_ne!(prefixes[0], prefixes[1]);
    }
}
