//! Export functionality for simulation data.
//!
//! Provides the tab-separated row sinks the recorder writes to and the JSON
//! run summary.

mod json_export;
mod sinks;
mod tsv_export;

pub use json_export::{export_summary_json, export_summary_json_to, SummaryExport};
pub use sinks::{SinkKind, SinkSet};
pub use tsv_export::{MemorySink, RowSink, TsvSink};
