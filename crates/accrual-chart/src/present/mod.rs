// File: crates/accrual-chart/src/present/mod.rs
// Summary: Presentation step of the pipeline: window, PNG and CSV outputs behind one trait.

use std::path::{Path, PathBuf};

use chart_core::{Chart, RenderOptions};
use log::info;

use crate::error::{ChartError, Result};

#[cfg(feature = "window")]
mod window;
#[cfg(feature = "window")]
pub use window::Window;

/// Final stage of `render`: show or persist a finished chart.
pub trait Present {
    fn present(&mut self, chart: &Chart, opts: &RenderOptions) -> Result<()>;
}

impl<P: Present + ?Sized> Present for Box<P> {
    fn present(&mut self, chart: &Chart, opts: &RenderOptions) -> Result<()> {
        (**self).present(chart, opts)
    }
}

/// Presents to each target in order, stopping at the first failure.
impl Present for Vec<Box<dyn Present>> {
    fn present(&mut self, chart: &Chart, opts: &RenderOptions) -> Result<()> {
        for target in self.iter_mut() {
            target.present(chart, opts)?;
        }
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| ChartError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Writes the chart as a PNG image.
#[derive(Clone, Debug)]
pub struct PngFile {
    path: PathBuf,
}

impl PngFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl Present for PngFile {
    fn present(&mut self, chart: &Chart, opts: &RenderOptions) -> Result<()> {
        ensure_parent(&self.path)?;
        chart.render_to_png(opts, &self.path)?;
        info!("Wrote {}", self.path.display());
        Ok(())
    }
}

/// Writes the plotted coordinates as `run,week,value` rows, one per point.
#[derive(Clone, Debug)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl Present for CsvFile {
    fn present(&mut self, chart: &Chart, _opts: &RenderOptions) -> Result<()> {
        ensure_parent(&self.path)?;
        let mut wtr = csv::Writer::from_path(&self.path)?;
        wtr.write_record(["run", "week", "value"])?;
        let mut rows = 0usize;
        for s in &chart.series {
            let run = s.label.as_deref().unwrap_or_default();
            for &(week, value) in &s.data_xy {
                let (week, value) = (week.to_string(), value.to_string());
                wtr.write_record([run, week.as_str(), value.as_str()])?;
                rows += 1;
            }
        }
        wtr.flush().map_err(|source| ChartError::Io { path: self.path.clone(), source })?;
        info!("Wrote {} rows to {}", rows, self.path.display());
        Ok(())
    }
}
