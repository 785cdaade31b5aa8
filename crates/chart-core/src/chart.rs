// File: crates/chart-core/src/chart.rs
// Summary: Chart struct and headless rendering pipeline (PNG file/bytes, RGBA8) using Skia CPU raster surfaces.

use anyhow::Result;
use skia_safe as skia;

use crate::geometry::RectI32;
use crate::grid::{format_tick, ticks};
use crate::series::{Series, SeriesStyle};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{Insets, WIDTH, HEIGHT};
use crate::view::ViewState;
use crate::Axis;

const TITLE_SIZE: f32 = 15.0;
const LABEL_SIZE: f32 = 13.0;
const TICK_SIZE: f32 = 11.0;
const LEGEND_SIZE: f32 = 12.0;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Text (title, axis and tick labels, legend entries). Off gives font-independent pixels.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            draw_labels: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Chart {
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub title: Option<String>,
    pub show_grid: bool,
    pub show_legend: bool,
}

impl Chart {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            title: None,
            show_grid: false,
            show_legend: false,
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Fit both axes to the data, padded by `margin` (fraction of each span).
    pub fn autoscale_axes(&mut self, margin: f64) {
        ViewState::from_chart(self, margin).apply_to_chart(self);
    }

    /// Series indices in paint order: ascending z-order, insertion order among equals.
    pub fn draw_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.series.len()).collect();
        order.sort_by_key(|&i| self.series[i].style.z_order);
        order
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    /// Render the chart and return the encoded PNG.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.render_surface(opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the chart into an unpremultiplied RGBA8 buffer.
    /// Returns `(pixels, width, height, stride_in_bytes)`.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.render_surface(opts)?;
        let (w, h) = (opts.width.max(1), opts.height.max(1));
        let info = skia::ImageInfo::new(
            (w, h),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("failed to read back raster pixels");
        }
        Ok((pixels, w as u32, h as u32, stride))
    }

    fn render_surface(&self, opts: &RenderOptions) -> Result<skia::Surface> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width.max(1), opts.height.max(1)))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.draw(surface.canvas(), opts);
        Ok(surface)
    }

    fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let plot = RectI32::plot_area(opts.width, opts.height, &opts.insets);
        let plot_rect = to_rect(&plot);
        let mut bg = skia::Paint::default();
        bg.set_color(theme.plot_background);
        canvas.draw_rect(plot_rect, &bg);

        let x_ticks = ticks(self.x_axis.min, self.x_axis.max, (plot.width() / 120).clamp(2, 10) as usize);
        let y_ticks = ticks(self.y_axis.min, self.y_axis.max, (plot.height() / 60).clamp(2, 10) as usize);

        if self.show_grid {
            draw_grid(canvas, &plot, &self.x_axis, &self.y_axis, &x_ticks, &y_ticks, theme);
        }

        // Series, clipped to the plot area
        canvas.save();
        canvas.clip_rect(plot_rect, None, Some(true));
        for i in self.draw_order() {
            let s = &self.series[i];
            let color = s.style.color.unwrap_or_else(|| theme.series_color(i));
            draw_line_series(canvas, &plot, &self.x_axis, &self.y_axis, s, color);
        }
        canvas.restore();

        draw_frame(canvas, &plot, &self.x_axis, &self.y_axis, &x_ticks, &y_ticks, theme);

        let shaper = opts.draw_labels.then(TextShaper::new);
        if let Some(shaper) = &shaper {
            draw_labels(canvas, shaper, &plot, self, &x_ticks, &y_ticks, theme);
        }
        if self.show_legend {
            draw_legend(canvas, shaper.as_ref(), &plot, self, theme);
        }
    }
}

impl Default for Chart {
    fn default() -> Self { Self::new() }
}

// ---- helpers ----------------------------------------------------------------

fn to_rect(r: &RectI32) -> skia::Rect {
    skia::Rect::from_ltrb(r.left as f32, r.top as f32, r.right as f32, r.bottom as f32)
}

fn tick_step(ticks: &[f64], axis: &Axis) -> f64 {
    match ticks {
        [a, b, ..] => b - a,
        _ => axis.span(),
    }
}

fn stroke_paint(style: &SeriesStyle, color: skia::Color) -> skia::Paint {
    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(style.stroke_width());
    stroke.set_color(color);
    if let Some(intervals) = style.stroke.dash_intervals() {
        stroke.set_path_effect(skia::PathEffect::dash(&intervals, 0.0));
    }
    stroke
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(color);
    fill
}

fn draw_grid(
    canvas: &skia::Canvas,
    plot: &RectI32,
    x_axis: &Axis,
    y_axis: &Axis,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    // verticals
    for &x in x_ticks {
        let px = plot.sx(x_axis, x);
        canvas.draw_line((px, plot.top as f32), (px, plot.bottom as f32), &paint);
    }
    // horizontals
    for &y in y_ticks {
        let py = plot.sy(y_axis, y);
        canvas.draw_line((plot.left as f32, py), (plot.right as f32, py), &paint);
    }
}

fn draw_frame(
    canvas: &skia::Canvas,
    plot: &RectI32,
    x_axis: &Axis,
    y_axis: &Axis,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_style(skia::paint::Style::Stroke);
    axis_paint.set_stroke_width(1.0);
    canvas.draw_rect(to_rect(plot), &axis_paint);

    // outward tick marks
    let (b, l) = (plot.bottom as f32, plot.left as f32);
    for &x in x_ticks {
        let px = plot.sx(x_axis, x);
        canvas.draw_line((px, b), (px, b + 4.0), &axis_paint);
    }
    for &y in y_ticks {
        let py = plot.sy(y_axis, y);
        canvas.draw_line((l - 4.0, py), (l, py), &axis_paint);
    }
}

fn draw_labels(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    plot: &RectI32,
    chart: &Chart,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let (l, r, t, b) = (plot.left as f32, plot.right as f32, plot.top as f32, plot.bottom as f32);

    let x_step = tick_step(x_ticks, &chart.x_axis);
    for &x in x_ticks {
        let text = format_tick(x, x_step);
        shaper.draw_centered(canvas, &text, plot.sx(&chart.x_axis, x), b + 20.0, TICK_SIZE, theme.tick);
    }
    let y_step = tick_step(y_ticks, &chart.y_axis);
    for &y in y_ticks {
        let text = format_tick(y, y_step);
        shaper.draw_right(canvas, &text, l - 7.0, plot.sy(&chart.y_axis, y) + 4.0, TICK_SIZE, theme.tick);
    }

    let cx = (l + r) * 0.5;
    shaper.draw_centered(canvas, &chart.x_axis.label, cx, b + 44.0, LABEL_SIZE, theme.axis_label);

    // y label reads bottom-to-top
    canvas.save();
    canvas.translate((l - 58.0, (t + b) * 0.5));
    canvas.rotate(-90.0, None);
    shaper.draw_centered(canvas, &chart.y_axis.label, 0.0, 0.0, LABEL_SIZE, theme.axis_label);
    canvas.restore();

    if let Some(title) = &chart.title {
        shaper.draw_centered(canvas, title, cx, t - 16.0, TITLE_SIZE, theme.axis_label);
    }
}

fn draw_legend(
    canvas: &skia::Canvas,
    shaper: Option<&TextShaper>,
    plot: &RectI32,
    chart: &Chart,
    theme: &Theme,
) {
    let entries: Vec<(usize, &Series, &str)> = chart
        .series
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.label.as_deref().map(|label| (i, s, label)))
        .collect();
    if entries.is_empty() {
        return;
    }

    const PAD: f32 = 8.0;
    const ROW: f32 = 20.0;
    const SWATCH: f32 = 28.0;
    let text_w = shaper
        .map(|sh| entries.iter().map(|(_, _, label)| sh.measure_width(label, LEGEND_SIZE)).fold(0.0, f32::max))
        .unwrap_or(0.0);
    let text_block = if text_w > 0.0 { PAD + text_w } else { 0.0 };
    let box_w = PAD + SWATCH + text_block + PAD;
    let box_h = PAD * 2.0 + ROW * entries.len() as f32 - (ROW - LEGEND_SIZE);

    // upper-left corner of the plot area
    let x0 = plot.left as f32 + 10.0;
    let y0 = plot.top as f32 + 10.0;
    let frame = skia::Rect::from_xywh(x0, y0, box_w, box_h);
    canvas.draw_round_rect(frame, 4.0, 4.0, &fill_paint(theme.legend_background));
    let mut border = skia::Paint::default();
    border.set_anti_alias(true);
    border.set_style(skia::paint::Style::Stroke);
    border.set_stroke_width(1.0);
    border.set_color(theme.legend_border);
    canvas.draw_round_rect(frame, 4.0, 4.0, &border);

    for (row, (i, s, label)) in entries.into_iter().enumerate() {
        let color = s.style.color.unwrap_or_else(|| theme.series_color(i));
        let cy = y0 + PAD + LEGEND_SIZE * 0.5 + ROW * row as f32;
        let sx = x0 + PAD;
        canvas.draw_line((sx, cy), (sx + SWATCH, cy), &stroke_paint(&s.style, color));
        if let Some(marker) = s.style.marker {
            canvas.draw_circle((sx + SWATCH * 0.5, cy), marker.radius, &fill_paint(color));
        }
        if let Some(sh) = shaper {
            sh.draw_left(canvas, label, sx + SWATCH + PAD, cy + LEGEND_SIZE * 0.35, LEGEND_SIZE, theme.axis_label);
        }
    }
}

fn draw_line_series(
    canvas: &skia::Canvas,
    plot: &RectI32,
    x_axis: &Axis,
    y_axis: &Axis,
    series: &Series,
    color: skia::Color,
) {
    let data = &series.data_xy;
    if data.is_empty() {
        return;
    }

    let points: Vec<(f32, f32)> = data
        .iter()
        .map(|&(x, y)| (plot.sx(x_axis, x), plot.sy(y_axis, y)))
        .collect();

    if points.len() >= 2 {
        let mut path = skia::Path::new();
        path.move_to(points[0]);
        for &p in points.iter().skip(1) {
            path.line_to(p);
        }
        canvas.draw_path(&path, &stroke_paint(&series.style, color));
    }

    // single-point series still show up through their markers
    if let Some(marker) = series.style.marker {
        let fill = fill_paint(color);
        for &p in &points {
            canvas.draw_circle(p, marker.radius, &fill);
        }
    }
}
