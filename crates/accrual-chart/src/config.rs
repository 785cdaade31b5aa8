//! TOML configuration file support.
//!
//! Every field is optional; command-line flags win over the file, the file wins
//! over built-in defaults:
//!
//! ```toml
//! # accrual-chart.toml
//! [chart]
//! width = 1200
//! height = 600
//! theme = "dark"
//! draw_labels = true
//!
//! [plot]
//! input = "compounds.json"
//! png = "target/out/compounds.png"
//! csv = "target/out/compounds.csv"
//! window = false
//!
//! [simulate]
//! weeks = 10
//! initial_rate = 2.0
//! output = "compounds.json"
//! ```

use anyhow::{bail, Context, Result};
use chart_core::{theme, RenderOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::simulate::SimulationParams;
use crate::DEFAULT_INPUT;

/// Root configuration structure for accrual-chart.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub plot: PlotConfig,
    #[serde(default)]
    pub simulate: SimulateConfig,
}

/// Rendering settings shared by every output.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    /// Surface width in pixels.
    pub width: Option<u32>,
    /// Surface height in pixels.
    pub height: Option<u32>,
    /// Theme preset name ("light", "dark").
    pub theme: Option<String>,
    /// Render text (title, labels, legend entries).
    pub draw_labels: Option<bool>,
}

/// Settings for the plot command.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotConfig {
    /// Runs document to load.
    pub input: Option<PathBuf>,
    /// Also write the chart as PNG.
    pub png: Option<PathBuf>,
    /// Also write the plotted points as CSV.
    pub csv: Option<PathBuf>,
    /// Open the interactive window.
    pub window: Option<bool>,
}

/// Settings for the simulate command.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulateConfig {
    pub weeks: Option<u64>,
    pub initial_rate: Option<f64>,
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

/// Look up a theme preset, listing the known names on failure.
pub fn resolve_theme(name: &str) -> Result<theme::Theme> {
    match theme::find(name) {
        Some(t) => Ok(t),
        None => {
            let known = theme::presets().iter().map(|t| t.name).collect::<Vec<_>>().join(", ");
            bail!("unknown theme `{name}` (expected one of: {known})")
        }
    }
}

impl ChartConfig {
    /// Overlay the configured values on `opts`.
    pub fn apply(&self, opts: &mut RenderOptions) -> Result<()> {
        if let Some(w) = self.width {
            opts.width = i32::try_from(w).context("chart width out of range")?;
        }
        if let Some(h) = self.height {
            opts.height = i32::try_from(h).context("chart height out of range")?;
        }
        if let Some(name) = &self.theme {
            opts.theme = resolve_theme(name)?;
        }
        if let Some(labels) = self.draw_labels {
            opts.draw_labels = labels;
        }
        Ok(())
    }
}

impl ChartConfig {
    /// Render options with the file applied over the defaults and `theme`/`width`/`height` over the file.
    pub fn render_options(
        &self,
        theme: Option<&str>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<RenderOptions> {
        let mut opts = RenderOptions::default();
        self.apply(&mut opts)?;
        if let Some(name) = theme {
            opts.theme = resolve_theme(name)?;
        }
        if let Some(w) = width {
            opts.width = i32::try_from(w).context("chart width out of range")?;
        }
        if let Some(h) = height {
            opts.height = i32::try_from(h).context("chart height out of range")?;
        }
        Ok(opts)
    }
}

/// Input and outputs of one plot invocation.
#[derive(Debug, PartialEq)]
pub struct PlotTargets {
    pub input: PathBuf,
    pub png: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub window: bool,
}

impl PlotConfig {
    /// Merge command-line choices over the file.
    ///
    /// The window opens by default only when no file output is selected, unless the
    /// file sets `window`; `no_window` always closes it.
    pub fn targets(
        &self,
        input: Option<PathBuf>,
        png: Option<PathBuf>,
        csv: Option<PathBuf>,
        no_window: bool,
    ) -> PlotTargets {
        let input = input
            .or_else(|| self.input.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
        let png = png.or_else(|| self.png.clone());
        let csv = csv.or_else(|| self.csv.clone());
        let window = !no_window && self.window.unwrap_or(png.is_none() && csv.is_none());
        PlotTargets { input, png, csv, window }
    }
}

impl SimulateConfig {
    /// Simulation parameters and output path, command line over file over defaults.
    pub fn resolve(
        &self,
        output: Option<PathBuf>,
        weeks: Option<u64>,
        initial_rate: Option<f64>,
    ) -> (SimulationParams, PathBuf) {
        let mut params = SimulationParams::default();
        if let Some(w) = weeks.or(self.weeks) {
            params.duration_weeks = w;
        }
        if let Some(r) = initial_rate.or(self.initial_rate) {
            params.initial_rate = r;
        }
        let output = output
            .or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
        (params, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [chart]
            width = 800
            height = 400
            theme = "dark"
            draw_labels = false

            [plot]
            input = "runs.json"
            png = "out/runs.png"
            window = false

            [simulate]
            weeks = 4
            initial_rate = 0.5
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.chart.width, Some(800));
        assert_eq!(config.chart.height, Some(400));
        assert_eq!(config.chart.theme.as_deref(), Some("dark"));
        assert_eq!(config.chart.draw_labels, Some(false));
        assert_eq!(config.plot.input, Some(PathBuf::from("runs.json")));
        assert_eq!(config.plot.png, Some(PathBuf::from("out/runs.png")));
        assert_eq!(config.plot.csv, None);
        assert_eq!(config.plot.window, Some(false));
        assert_eq!(config.simulate.weeks, Some(4));
        assert_eq!(config.simulate.initial_rate, Some(0.5));
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert!(config.chart.width.is_none());
        assert!(config.plot.input.is_none());
        assert!(config.simulate.output.is_none());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_str("[chart]\ncolour = \"red\"\n").is_err());
    }

    #[test]
    fn test_apply_overrides_options() {
        let config = Config::from_str("[chart]\nwidth = 640\ntheme = \"DARK\"\n").unwrap();
        let mut opts = RenderOptions::default();
        config.chart.apply(&mut opts).unwrap();
        assert_eq!(opts.width, 640);
        assert_eq!(opts.height, RenderOptions::default().height);
        assert_eq!(opts.theme.name, "dark");
    }

    #[test]
    fn test_unknown_theme_lists_presets() {
        let err = resolve_theme("sepia").unwrap_err().to_string();
        assert!(err.contains("sepia"));
        assert!(err.contains("light") && err.contains("dark"));
    }

    fn path(p: &str) -> Option<PathBuf> {
        Some(PathBuf::from(p))
    }

    #[test]
    fn test_window_is_default_output() {
        let targets = PlotConfig::default().targets(None, None, None, false);
        assert_eq!(
            targets,
            PlotTargets { input: PathBuf::from(DEFAULT_INPUT), png: None, csv: None, window: true }
        );
    }

    #[test]
    fn test_file_outputs_suppress_window() {
        let plot = PlotConfig::default();
        assert!(!plot.targets(None, path("a.png"), None, false).window);
        assert!(!plot.targets(None, None, path("a.csv"), false).window);

        // file outputs named only in the config count too
        let plot = Config::from_str("[plot]\ncsv = \"runs.csv\"\n").unwrap().plot;
        let targets = plot.targets(None, None, None, false);
        assert_eq!(targets.csv, path("runs.csv"));
        assert!(!targets.window);
    }

    #[test]
    fn test_config_window_keeps_window_with_files() {
        let plot = Config::from_str("[plot]\nwindow = true\n").unwrap().plot;
        let targets = plot.targets(None, path("a.png"), path("a.csv"), false);
        assert!(targets.window);
        assert_eq!(targets.png, path("a.png"));
        assert_eq!(targets.csv, path("a.csv"));

        let plot = Config::from_str("[plot]\nwindow = false\n").unwrap().plot;
        assert!(!plot.targets(None, None, None, false).window);
    }

    #[test]
    fn test_no_window_always_wins() {
        let plot = Config::from_str("[plot]\nwindow = true\n").unwrap().plot;
        assert!(!plot.targets(None, None, None, true).window);
        assert!(!PlotConfig::default().targets(None, None, None, true).window);
    }

    #[test]
    fn test_plot_flags_override_file() {
        let plot = Config::from_str(
            "[plot]\ninput = \"file.json\"\npng = \"file.png\"\ncsv = \"file.csv\"\n",
        )
        .unwrap()
        .plot;
        let targets = plot.targets(path("cli.json"), path("cli.png"), None, false);
        assert_eq!(targets.input, PathBuf::from("cli.json"));
        assert_eq!(targets.png, path("cli.png"));
        assert_eq!(targets.csv, path("file.csv"));

        let targets = plot.targets(None, None, None, false);
        assert_eq!(targets.input, PathBuf::from("file.json"));
        assert_eq!(targets.png, path("file.png"));
    }

    #[test]
    fn test_render_options_precedence() {
        let chart = Config::from_str("[chart]\nwidth = 640\nheight = 320\ntheme = \"dark\"\n").unwrap().chart;

        let opts = chart.render_options(None, None, None).unwrap();
        assert_eq!((opts.width, opts.height), (640, 320));
        assert_eq!(opts.theme.name, "dark");

        let opts = chart.render_options(Some("light"), Some(1000), None).unwrap();
        assert_eq!((opts.width, opts.height), (1000, 320));
        assert_eq!(opts.theme.name, "light");

        let defaults = ChartConfig::default().render_options(None, None, None).unwrap();
        assert_eq!(defaults.width, RenderOptions::default().width);
        assert_eq!(defaults.theme.name, RenderOptions::default().theme.name);

        assert!(chart.render_options(Some("sepia"), None, None).is_err());
        assert!(chart.render_options(None, Some(u32::MAX), None).is_err());
    }

    #[test]
    fn test_simulate_precedence() {
        let (params, output) = SimulateConfig::default().resolve(None, None, None);
        assert_eq!(params, SimulationParams::default());
        assert_eq!(output, PathBuf::from(DEFAULT_INPUT));

        let file = Config::from_str("[simulate]\nweeks = 4\ninitial_rate = 0.5\noutput = \"sim.json\"\n")
            .unwrap()
            .simulate;
        let (params, output) = file.resolve(None, None, None);
        assert_eq!((params.duration_weeks, params.initial_rate), (4, 0.5));
        assert_eq!(output, PathBuf::from("sim.json"));

        let (params, output) = file.resolve(path("cli.json"), Some(2), None);
        assert_eq!((params.duration_weeks, params.initial_rate), (2, 0.5));
        assert_eq!(output, PathBuf::from("cli.json"));
    }
}
