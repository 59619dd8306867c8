//! JSON round export.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use super::{round_filename, RoundExporter};
use crate::models::Round;

/// Writes the serialized round as pretty-printed JSON.
pub struct JsonExporter {
    out_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

impl RoundExporter for JsonExporter {
    fn export(&self, round: &Round) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir).with_context(|| {
            format!("Failed to create export dir {}", self.out_dir.display())
        })?;

        let path = self.out_dir.join(round_filename(round, "json"));
        let serialized = serde_json::to_string_pretty(round)?;
        fs::write(&path, serialized)
            .with_context(|| format!("Failed to write round to {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::models::Reading;

    #[test]
    fn writes_round_under_timestamped_name() {
        let dir = tempfile::tempdir().unwrap();
        let collected_at = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();
        let round = Round::new(
            3,
            collected_at,
            vec![Reading {
                index: 1,
                timestamp: collected_at,
                distance_cm: 5.0,
                valid: true,
            }],
        );

        let exporter = JsonExporter::new(dir.path().to_path_buf());
        let path = exporter.export(&round).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "round_3_20260314_1509.json"
        );

        let restored: Round =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored.number, 3);
        assert_eq!(restored.readings[0].distance_cm, 5.0);
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let exporter = JsonExporter::new(PathBuf::from("/dev/null/not-a-dir"));
        let round = Round::new(1, Utc::now(), Vec::new());
        assert!(exporter.export(&round).is_err());
    }
}
