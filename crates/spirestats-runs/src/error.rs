use thiserror::Error;

/// Failures raised while classifying or aggregating runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("Malformed run record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error("Malformed timestamp {0:?}: expected 14 digits (YYYYMMDDHHmmss)")]
    MalformedTimestamp(String),

    #[error("No runs in population")]
    EmptyPopulation,
}

impl RunError {
    pub(crate) fn malformed(id: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RunError>;
