//! Report output for the trader discovery system.
//!
//! This crate provides:
//! - JSON rendering of the full result list
//! - Flat CSV rendering, one row per address
//! - Run summary counts
//! - Output directory preparation and timestamped report files

pub mod json_report;
pub mod csv_report;
pub mod summary;
pub mod writer;

pub use csv_report::{render_csv, CsvRow, CSV_HEADER};
pub use json_report::render_json;
pub use summary::ReportSummary;
pub use writer::{prepare_output_location, ReportPaths, ReportWriter};
