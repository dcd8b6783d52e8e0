use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fragment file as read from storage, before payload extraction.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub source: String,
    pub text: String,
}

/// Per-fragment numbers reported after extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadStats {
    pub source: String,
    pub entries: usize,
    pub bytes: usize,
}

/// Outcome of the merge phase: the rendered declaration plus the stats
/// that back the progress summary.
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub declaration: String,
    pub payloads: Vec<PayloadStats>,
    pub total_entries: usize,
}

/// Machine-readable record of a completed run, written as JSON when a
/// report path is configured.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub target: String,
    pub fragments_merged: usize,
    pub total_entries: usize,
    pub output_bytes: usize,
    pub check_only: bool,
    pub finished_at: DateTime<Utc>,
    pub payloads: Vec<PayloadStats>,
}
