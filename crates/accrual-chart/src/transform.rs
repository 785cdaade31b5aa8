// File: crates/accrual-chart/src/transform.rs
// Summary: Unit conversion (seconds -> weeks, raw magnitude -> 1e8 units) and chart construction.

use chart_core::{Axis, Chart, Marker, Series, StrokeStyle};

use crate::document::{Document, Run, Scalar};
use crate::error::{ChartError, Result};

pub const SECONDS_PER_WEEK: f64 = 604_800.0;
/// Raw sample magnitudes are plotted in units of 1e8.
pub const VALUE_UNIT: f64 = 1e8;
/// Paint layer of the baseline run; every other run stays at 0.
pub const BASELINE_Z_ORDER: i32 = 5;
/// Axis padding as a fraction of the data span.
pub const AXIS_MARGIN: f64 = 0.05;

pub const X_LABEL: &str = "Time (in weeks)";
pub const Y_LABEL: &str = "Value";

pub fn to_weeks(seconds: f64) -> f64 {
    seconds / SECONDS_PER_WEEK
}

pub fn to_units(v: f64) -> f64 {
    v / VALUE_UNIT
}

pub fn chart_title(initial_rate: &Scalar) -> String {
    format!("Comparing accrual freqs. Initial RateAtTarget: {initial_rate}")
}

/// A run converted to plot coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSeries {
    pub name: String,
    pub baseline: bool,
    /// `(weeks, value / 1e8)` in sample order.
    pub points: Vec<(f64, f64)>,
}

impl RunSeries {
    pub fn into_series(self) -> Series {
        let series = Series::with_data(self.points).with_label(self.name);
        if self.baseline {
            series
                .with_stroke(StrokeStyle::Solid)
                .with_marker(Marker::default())
                .with_z_order(BASELINE_Z_ORDER)
        } else {
            series.with_stroke(StrokeStyle::Dashed)
        }
    }
}

/// Convert every sample of `run`; the first non-numeric field aborts.
pub fn run_points(run: &Run) -> Result<Vec<(f64, f64)>> {
    run.samples
        .iter()
        .enumerate()
        .map(|(index, sample)| -> Result<(f64, f64)> {
            let conversion = |field: &'static str, raw: &Scalar| ChartError::Conversion {
                run: run.name.clone(),
                index,
                field,
                raw: raw.to_string(),
            };
            let time = sample.time.as_number().ok_or_else(|| conversion("time", &sample.time))?;
            let v = sample.v.to_f64().ok_or_else(|| conversion("v", &sample.v))?;
            Ok((to_weeks(time), to_units(v)))
        })
        .collect()
}

/// Convert all runs in document order, flagging the one named by `baseRunName`.
pub fn prepare(doc: &Document) -> Result<Vec<RunSeries>> {
    doc.runs
        .iter()
        .map(|run| -> Result<RunSeries> {
            Ok(RunSeries {
                name: run.name.clone(),
                baseline: run.name == doc.base_run_name,
                points: run_points(run)?,
            })
        })
        .collect()
}

/// Build the comparison chart: one line per run, labelled axes, title, grid and legend.
pub fn build_chart(doc: &Document) -> Result<Chart> {
    let mut chart = Chart::new();
    for run in prepare(doc)? {
        chart.add_series(run.into_series());
    }
    chart.x_axis = Axis::new(X_LABEL, 0.0, 1.0);
    chart.y_axis = Axis::new(Y_LABEL, 0.0, 1.0);
    chart.autoscale_axes(AXIS_MARGIN);
    chart.title = Some(chart_title(&doc.initial_rate));
    chart.show_grid = true;
    chart.show_legend = true;
    Ok(chart)
}
