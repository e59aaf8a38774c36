//! Plotters-powered SVG chart of the data and the fitted line.
//!
//! Plot elements:
//! - observed points: small blue dots
//! - x and y uncertainties: blue error bars
//! - fitted line: red, spanning the data's x range

use std::error::Error;
use std::ops::Range;

use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::FitError;
use crate::plot::{PlotRequest, PlotSink};

/// Relative padding added around the data on each axis.
const PAD: f64 = 0.05;

/// Writes each request as an SVG file at its `output_path`.
#[derive(Debug, Clone, Copy)]
pub struct SvgPlotSink {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgPlotSink {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

impl SvgPlotSink {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl PlotSink for SvgPlotSink {
    fn render(&mut self, request: &PlotRequest<'_>) -> Result<(), FitError> {
        let (x_range, y_range) = chart_bounds(request)
            .ok_or_else(|| FitError::Plot("no finite points to draw.".to_string()))?;

        let root = SVGBackend::new(request.output_path, (self.width, self.height)).into_drawing_area();
        draw_chart(&root, request, x_range, y_range).map_err(|e| FitError::Plot(e.to_string()))?;
        root.present().map_err(|e| {
            FitError::Plot(format!("failed to write '{}': {e}", request.output_path.display()))
        })?;

        info!("wrote plot to '{}'", request.output_path.display());
        Ok(())
    }
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    request: &PlotRequest<'_>,
    x_range: Range<f64>,
    y_range: Range<f64>,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (x0, x1) = (x_range.start, x_range.end);
    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(request.x_label)
        .y_desc(request.y_label)
        .draw()?;

    let points = || {
        request
            .x
            .iter()
            .zip(request.y)
            .zip(request.xerr.iter().zip(request.yerr))
            .map(|((&x, &y), (&dx, &dy))| (x, y, dx, dy))
    };

    chart.draw_series(
        points().map(|(x, y, _, dy)| ErrorBar::new_vertical(x, y - dy, y, y + dy, BLUE, 6)),
    )?;
    chart.draw_series(
        points().map(|(x, y, dx, _)| ErrorBar::new_horizontal(y, x - dx, x, x + dx, BLUE, 6)),
    )?;
    chart.draw_series(points().map(|(x, y, _, _)| Circle::new((x, y), 2, BLUE.filled())))?;

    let (slope, intercept) = request.line;
    let (lo, hi) = data_x_span(request).unwrap_or((x0, x1));
    chart.draw_series(LineSeries::new(
        [(lo, slope * lo + intercept), (hi, slope * hi + intercept)],
        &RED,
    ))?;

    Ok(())
}

fn data_x_span(request: &PlotRequest<'_>) -> Option<(f64, f64)> {
    span(request.x.iter().copied())
}

/// Axis ranges covering the error bars and the fitted line, padded.
fn chart_bounds(request: &PlotRequest<'_>) -> Option<(Range<f64>, Range<f64>)> {
    let (slope, intercept) = request.line;

    let xs = request
        .x
        .iter()
        .zip(request.xerr)
        .flat_map(|(&x, &dx)| [x - dx, x + dx]);
    let (x_lo, x_hi) = span(xs)?;

    let line_ends = data_x_span(request)
        .map(|(lo, hi)| [slope * lo + intercept, slope * hi + intercept])
        .into_iter()
        .flatten();
    let ys = request
        .y
        .iter()
        .zip(request.yerr)
        .flat_map(|(&y, &dy)| [y - dy, y + dy])
        .chain(line_ends);
    let (y_lo, y_hi) = span(ys)?;

    Some((padded(x_lo, x_hi), padded(y_lo, y_hi)))
}

fn span(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn padded(lo: f64, hi: f64) -> Range<f64> {
    let width = hi - lo;
    if width.abs() < 1e-12 {
        return (lo - 0.5)..(hi + 0.5);
    }
    (lo - PAD * width)..(hi + PAD * width)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn request<'a>(x: &'a [f64], y: &'a [f64], xerr: &'a [f64], yerr: &'a [f64]) -> PlotRequest<'a> {
        PlotRequest {
            x,
            y,
            xerr,
            yerr,
            line: (1.0, 0.0),
            x_label: "time[s]",
            y_label: "distance[m]",
            output_path: Path::new("unused.svg"),
        }
    }

    #[test]
    fn bounds_cover_error_bars_with_padding() {
        let req = request(&[0.0, 10.0], &[0.0, 10.0], &[1.0, 1.0], &[2.0, 2.0]);
        let (xr, yr) = chart_bounds(&req).unwrap();
        // x: [-1, 11] padded by 5% of 12
        assert!((xr.start - (-1.6)).abs() < 1e-12);
        assert!((xr.end - 11.6).abs() < 1e-12);
        // y: [-2, 12] padded by 5% of 14
        assert!((yr.start - (-2.7)).abs() < 1e-12);
        assert!((yr.end - 12.7).abs() < 1e-12);
    }

    #[test]
    fn empty_request_has_no_bounds() {
        let req = request(&[], &[], &[], &[]);
        assert!(chart_bounds(&req).is_none());
    }

    #[test]
    fn flat_range_is_widened() {
        let r = padded(3.0, 3.0);
        assert_eq!(r, 2.5..3.5);
    }

    #[test]
    fn writes_svg_file() {
        let path = std::env::temp_dir().join(format!("linfit_svg_sink_{}.svg", std::process::id()));
        let x = [1.0, 2.0, 3.0];
        let y = [1.1, 1.9, 3.2];
        let err = [0.1, 0.1, 0.1];
        let req = PlotRequest {
            output_path: &path,
            ..request(&x, &y, &err, &err)
        };

        SvgPlotSink::default().render(&req).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("time[s]"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_directory_is_a_plot_error() {
        let x = [1.0, 2.0, 3.0];
        let err = [0.1, 0.1, 0.1];
        let req = PlotRequest {
            output_path: Path::new("/nonexistent-linfit-dir/plot.svg"),
            ..request(&x, &x, &err, &err)
        };
        assert!(matches!(SvgPlotSink::default().render(&req), Err(FitError::Plot(_))));
    }
}
