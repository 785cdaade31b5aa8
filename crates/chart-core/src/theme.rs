// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors and the series color cycle.

use skia_safe as skia;

/// Number of colors in a theme's series palette.
pub const PALETTE_LEN: usize = 10;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub plot_background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub legend_background: skia::Color,
    pub legend_border: skia::Color,
    pub palette: [skia::Color; PALETTE_LEN],
}

// Category10 cycle.
fn category10() -> [skia::Color; PALETTE_LEN] {
    [
        skia::Color::from_argb(255, 0x1f, 0x77, 0xb4), // blue
        skia::Color::from_argb(255, 0xff, 0x7f, 0x0e), // orange
        skia::Color::from_argb(255, 0x2c, 0xa0, 0x2c), // green
        skia::Color::from_argb(255, 0xd6, 0x27, 0x28), // red
        skia::Color::from_argb(255, 0x94, 0x67, 0xbd), // purple
        skia::Color::from_argb(255, 0x8c, 0x56, 0x4b), // brown
        skia::Color::from_argb(255, 0xe3, 0x77, 0xc2), // pink
        skia::Color::from_argb(255, 0x7f, 0x7f, 0x7f), // gray
        skia::Color::from_argb(255, 0xbc, 0xbd, 0x22), // olive
        skia::Color::from_argb(255, 0x17, 0xbe, 0xcf), // cyan
    ]
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            plot_background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 0xb0, 0xb0, 0xb0),
            axis_line: skia::Color::from_argb(255, 0, 0, 0),
            axis_label: skia::Color::from_argb(255, 0, 0, 0),
            tick: skia::Color::from_argb(255, 0, 0, 0),
            legend_background: skia::Color::from_argb(204, 255, 255, 255),
            legend_border: skia::Color::from_argb(255, 0xcc, 0xcc, 0xcc),
            palette: category10(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            plot_background: skia::Color::from_argb(255, 24, 24, 28),
            grid: skia::Color::from_argb(255, 48, 48, 54),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            legend_background: skia::Color::from_argb(220, 30, 30, 36),
            legend_border: skia::Color::from_argb(255, 70, 70, 80),
            palette: [
                skia::Color::from_argb(255, 64, 160, 255),
                skia::Color::from_argb(255, 255, 160, 64),
                skia::Color::from_argb(255, 40, 200, 120),
                skia::Color::from_argb(255, 220, 80, 80),
                skia::Color::from_argb(255, 180, 140, 255),
                skia::Color::from_argb(255, 200, 150, 120),
                skia::Color::from_argb(255, 255, 140, 210),
                skia::Color::from_argb(255, 170, 170, 170),
                skia::Color::from_argb(255, 220, 220, 80),
                skia::Color::from_argb(255, 80, 220, 230),
            ],
        }
    }

    /// Color for the `index`-th series, cycling through the palette.
    pub fn series_color(&self, index: usize) -> skia::Color {
        self.palette[index % PALETTE_LEN]
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name` (case-insensitive).
pub fn find(name: &str) -> Option<Theme> {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name))
}
