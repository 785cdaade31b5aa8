// File: crates/chart-core/src/series.rs
// Summary: Series model for labelled XY line data and its stroke/marker styling.

use skia_safe as skia;

/// How the connecting line of a series is stroked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
}

impl StrokeStyle {
    /// On/off dash intervals in pixels, `None` for a continuous stroke.
    pub fn dash_intervals(&self) -> Option<[f32; 2]> {
        match self {
            StrokeStyle::Solid => None,
            StrokeStyle::Dashed => Some([7.5, 3.25]),
        }
    }
}

/// Filled circle drawn at every data point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub radius: f32,
}

impl Default for Marker {
    fn default() -> Self { Self { radius: 4.0 } }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SeriesStyle {
    pub stroke: StrokeStyle,
    pub marker: Option<Marker>,
    /// Series with a higher z-order are painted later, i.e. on top.
    pub z_order: i32,
    /// Explicit color; `None` takes the theme palette color for the series index.
    pub color: Option<skia::Color>,
    pub stroke_width: Option<f32>,
}

impl SeriesStyle {
    pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width.unwrap_or(Self::DEFAULT_STROKE_WIDTH)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Legend text; unlabelled series are left out of the legend.
    pub label: Option<String>,
    pub data_xy: Vec<(f64, f64)>,
    pub style: SeriesStyle,
}

impl Series {
    pub fn new() -> Self {
        Self { label: None, data_xy: Vec::new(), style: SeriesStyle::default() }
    }

    pub fn with_data(data: Vec<(f64, f64)>) -> Self {
        Self { label: None, data_xy: data, style: SeriesStyle::default() }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.style.stroke = stroke;
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.style.marker = Some(marker);
        self
    }

    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.style.z_order = z_order;
        self
    }

    pub fn with_color(mut self, color: skia::Color) -> Self {
        self.style.color = Some(color);
        self
    }

    pub fn is_dashed(&self) -> bool { self.style.stroke == StrokeStyle::Dashed }

    pub fn has_markers(&self) -> bool { self.style.marker.is_some() }
}

impl Default for Series {
    fn default() -> Self { Self::new() }
}
