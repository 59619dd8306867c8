//! Round export.
//!
//! A sealed round is handed to one of these exporters; the artifact
//! filename embeds the round number and collection time
//! (`round_<N>_<YYYYMMDD_HHMM>.<ext>`), so re-exports within the same
//! minute collide and later rounds never do.

pub mod json;
pub mod plot;

pub use json::JsonExporter;
pub use plot::PlotExporter;

use anyhow::Result;
use std::path::PathBuf;

use crate::models::Round;

/// Export capability for completed rounds.
pub trait RoundExporter {
    /// Persist the round, returning the artifact path.
    fn export(&self, round: &Round) -> Result<PathBuf>;
}

fn round_filename(round: &Round, extension: &str) -> String {
    format!(
        "round_{}_{}.{}",
        round.number,
        round.collected_at.format("%Y%m%d_%H%M"),
        extension
    )
}
