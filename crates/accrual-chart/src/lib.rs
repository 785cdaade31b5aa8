// File: crates/accrual-chart/src/lib.rs
// Summary: Library entry point; load a runs document, convert units, build the comparison chart, present it.

pub mod config;
pub mod document;
pub mod error;
pub mod present;
pub mod simulate;
pub mod transform;

use std::path::Path;

use chart_core::RenderOptions;
use log::{debug, info};

pub use document::{Document, Run, Runs, Sample, Scalar};
pub use error::{ChartError, Result};
pub use present::{CsvFile, PngFile, Present};
#[cfg(feature = "window")]
pub use present::Window;
pub use transform::{build_chart, prepare, RunSeries};

/// Default input document, relative to the working directory.
pub const DEFAULT_INPUT: &str = "compounds.json";

/// Load `document_path`, build the comparison chart and hand it to `presenter`.
pub fn render(
    document_path: impl AsRef<Path>,
    opts: &RenderOptions,
    presenter: &mut dyn Present,
) -> Result<()> {
    let path = document_path.as_ref();
    let doc = Document::from_path(path)?;
    info!(
        "Loaded {} run(s) from {} (baseline `{}`)",
        doc.runs.len(),
        path.display(),
        doc.base_run_name
    );
    debug!("runs: {:?}", doc.runs);
    if doc.base_run().is_none() {
        debug!("baseline `{}` names no run; nothing is highlighted", doc.base_run_name);
    }

    let chart = build_chart(&doc)?;
    presenter.present(&chart, opts)
}
