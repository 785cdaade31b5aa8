// File: crates/chart-core/tests/autoscale.rs
// Purpose: Validate autoscale extents, margins and degenerate inputs.

use chart_core::{Chart, Series, ViewState};

#[test]
fn autoscale_spans_all_series() {
    let mut chart = Chart::new();
    chart.add_series(Series::with_data(vec![(0.0, 1.0), (5.0, 3.0)]));
    chart.add_series(Series::with_data(vec![(2.0, 6.0), (3.0, 1.5)]));

    chart.autoscale_axes(0.0);

    assert!((chart.x_axis.min - 0.0).abs() < 1e-9);
    assert!((chart.x_axis.max - 5.0).abs() < 1e-9);
    assert!((chart.y_axis.min - 1.0).abs() < 1e-9);
    assert!((chart.y_axis.max - 6.0).abs() < 1e-9);
}

#[test]
fn autoscale_margin_pads_both_axes() {
    let mut chart = Chart::new();
    chart.add_series(Series::with_data(vec![(0.0, 0.0), (10.0, 2.0)]));

    let v = ViewState::from_chart(&chart, 0.05);
    assert!((v.x_min + 0.5).abs() < 1e-9);
    assert!((v.x_max - 10.5).abs() < 1e-9);
    assert!((v.y_min + 0.1).abs() < 1e-9);
    assert!((v.y_max - 2.1).abs() < 1e-9);
}

#[test]
fn autoscale_empty_chart_is_unit_square() {
    let chart = Chart::new();
    let v = ViewState::from_chart(&chart, 0.05);
    assert_eq!((v.x_min, v.x_max, v.y_min, v.y_max), (0.0, 1.0, 0.0, 1.0));
}

#[test]
fn autoscale_single_point_gets_unit_span() {
    let mut chart = Chart::new();
    chart.add_series(Series::with_data(vec![(2.0, 3.0)]));
    chart.autoscale_axes(0.0);

    assert!((chart.x_axis.max - chart.x_axis.min - 1.0).abs() < 1e-9);
    assert!((chart.y_axis.max - chart.y_axis.min - 1.0).abs() < 1e-9);
    assert!(chart.x_axis.min < 2.0 && chart.x_axis.max > 2.0);
}

#[test]
fn zoom_keeps_cursor_point_fixed() {
    let opts = chart_core::RenderOptions::default();
    let mut v = ViewState { x_min: 0.0, x_max: 10.0, y_min: 0.0, y_max: 10.0 };
    let plot = chart_core::geometry::RectI32::plot_area(opts.width, opts.height, &opts.insets);
    let (cx, cy) = (plot.left as f64, plot.bottom as f64);

    v.zoom_at_pixel(0.5, cx, cy, opts.width, opts.height, &opts.insets);

    assert!((v.x_min - 0.0).abs() < 1e-9);
    assert!((v.y_min - 0.0).abs() < 1e-9);
    assert!((v.x_max - 5.0).abs() < 1e-9);
    assert!((v.y_max - 5.0).abs() < 1e-9);
}
