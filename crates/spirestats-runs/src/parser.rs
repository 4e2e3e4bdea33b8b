use std::path::Path;

use serde_json::{Map, Value};

use crate::types::RunRecord;

/// Parse a run document into its top-level fields. Anything but a JSON object is an error.
pub fn parse_fields(raw_text: &str) -> serde_json::Result<Map<String, Value>> {
    serde_json::from_str(raw_text)
}

/// Build a record from raw text. Parse failures are kept on the record, not raised.
pub fn parse_run(id: impl Into<String>, raw_text: String) -> RunRecord {
    let id = id.into();
    let fields = parse_fields(&raw_text).map_err(|e| e.to_string());
    if let Err(ref e) = fields {
        tracing::debug!(run = %id, "Run document did not parse: {}", e);
    }
    RunRecord::new(id, raw_text, fields)
}

pub(crate) fn run_id(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}
