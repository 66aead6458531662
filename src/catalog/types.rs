//! Shared structs.

use serde::Serialize;
use std::sync::Arc;

use super::query::QuerySpec;
use super::record::DrinkRecord;

/// Per-query state machine: `Idle → Loading → Ready | Failed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum QueryStatus {
    Idle,
    Loading { generation: u64, spec: QuerySpec },
    Ready { generation: u64, count: usize, dropped: usize },
    Failed { generation: u64, message: String },
}

/// What a single `run_query` call ended with.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Completed {
        generation: u64,
        records: Arc<Vec<DrinkRecord>>,
        /// Detail lookups lost during expansion.
        dropped: usize,
    },
    Failed {
        generation: u64,
        message: String,
    },
    /// A newer query started before this one finished; its result was discarded.
    Superseded { generation: u64 },
}

impl QueryOutcome {
    pub fn generation(&self) -> u64 {
        match self {
            QueryOutcome::Completed { generation, .. }
            | QueryOutcome::Failed { generation, .. }
            | QueryOutcome::Superseded { generation } => *generation,
        }
    }

    pub fn records(&self) -> Option<&[DrinkRecord]> {
        match self {
            QueryOutcome::Completed { records, .. } => Some(records.as_slice()),
            _ => None,
        }
    }
}
