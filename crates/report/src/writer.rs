//! Report files.
//!
//! Each run writes `<prefix>_<YYYYMMDDTHHMMSSZ>.json` and `.csv` side by side.
//! The output directory is created by [`prepare_output_location`], which the
//! caller invokes explicitly before writing.

use crate::{csv_report::render_csv, json_report::render_json};
use chrono::{DateTime, Utc};
use discovery_core::{config::OutputConfig, DiscoveryEntry, Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Create the output directory (and parents) if needed.
pub fn prepare_output_location<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .map_err(|e| Error::report(format!("cannot create {}: {}", dir.display(), e)))?;
    Ok(dir.to_path_buf())
}

/// Format a run timestamp for file names.
pub fn run_stamp(generated_at: DateTime<Utc>) -> String {
    generated_at.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Paths of the files written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
}

/// Writes the JSON and CSV reports for a run.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
    prefix: String,
}

impl ReportWriter {
    /// Create a writer for the given directory and file prefix.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Create a writer from configuration.
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.dir, &config.file_prefix)
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the output directory.
    pub fn prepare(&self) -> Result<PathBuf> {
        prepare_output_location(&self.dir)
    }

    /// File paths for a run started at `generated_at`.
    pub fn paths_for(&self, generated_at: DateTime<Utc>) -> ReportPaths {
        let stem = format!("{}_{}", self.prefix, run_stamp(generated_at));
        ReportPaths {
            json: self.dir.join(format!("{stem}.json")),
            csv: self.dir.join(format!("{stem}.csv")),
        }
    }

    /// Render and write both reports. The directory must already exist.
    pub fn write(
        &self,
        entries: &[DiscoveryEntry],
        generated_at: DateTime<Utc>,
    ) -> Result<ReportPaths> {
        let paths = self.paths_for(generated_at);

        fs::write(&paths.json, render_json(entries)?)?;
        fs::write(&paths.csv, render_csv(entries)?)?;

        info!(
            entries = entries.len(),
            json = %paths.json.display(),
            csv = %paths.csv.display(),
            "wrote discovery reports"
        );
        Ok(paths)
    }
}
