// File: crates/accrual-chart/src/error.rs
// Summary: Error taxonomy for loading, converting, simulating and presenting accrual runs.

use std::path::PathBuf;

/// Errors raised while turning a runs document into a presented chart.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// Input file missing or unreadable
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not valid JSON, or a required field is missing or mistyped
    #[error("invalid runs document: {0}")]
    Format(#[from] serde_json::Error),

    /// A sample field that is present but not numeric
    #[error("run `{run}` sample {index}: `{field}` is not numeric: {raw:?}")]
    Conversion {
        run: String,
        index: usize,
        field: &'static str,
        raw: String,
    },

    /// Simulated duration is zero or does not fit in seconds
    #[error("cannot simulate {weeks} week(s): duration must be at least one week and at most {max} weeks")]
    Duration { weeks: u64, max: u64 },

    /// CSV export failed
    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),

    /// Rendering or display failed
    #[error(transparent)]
    Render(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
