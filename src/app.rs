//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the fit pipeline for every input
//! - prints reports (and optional residual tables)

use clap::Parser;

use crate::cli::Cli;
use crate::domain::FitConfig;
use crate::error::AppError;
use crate::report::format_residuals;

pub mod pipeline;

/// Entry point for the `linfit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = fit_config_from_args(&cli);

    let results = pipeline::run_batch(&config);
    let multi = results.len() > 1;

    let mut failures: Vec<AppError> = Vec::new();
    for (input, result) in config.inputs.iter().zip(results) {
        if multi {
            println!("=== {} ===", input.display());
        }
        match result {
            Ok(outcome) => {
                println!("{}", outcome.report);
                if config.show_residuals {
                    println!("\n{}", format_residuals(&outcome.residuals, &outcome.labels));
                }
            }
            Err(err) if !multi => return Err(err.into()),
            Err(err) => {
                println!("{err}");
                failures.push(err.into());
            }
        }
        if multi {
            println!();
        }
    }

    match failures.first() {
        None => Ok(()),
        Some(first) => Err(AppError::new(
            first.exit_code(),
            format!("{} of {} inputs failed.", failures.len(), config.inputs.len()),
        )),
    }
}

pub fn fit_config_from_args(cli: &Cli) -> FitConfig {
    FitConfig {
        inputs: cli.inputs.clone(),
        plot_path: (!cli.no_plot).then(|| cli.plot.clone()),
        plot_width: cli.width,
        plot_height: cli.height,
        export_json: cli.export_json.clone(),
        export_residuals: cli.export_residuals.clone(),
        show_residuals: cli.residuals,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn no_plot_clears_plot_path() {
        let cli = Cli::try_parse_from(["linfit", "in.txt", "--no-plot"]).unwrap();
        let config = fit_config_from_args(&cli);
        assert!(config.plot_path.is_none());
        assert_eq!(config.inputs, vec![PathBuf::from("in.txt")]);
    }

    #[test]
    fn plot_path_is_forwarded() {
        let cli = Cli::try_parse_from(["linfit", "in.txt", "--plot", "chart.svg", "--width", "800"]).unwrap();
        let config = fit_config_from_args(&cli);
        assert_eq!(config.plot_path, Some(PathBuf::from("chart.svg")));
        assert_eq!(config.plot_width, 800);
    }
}
