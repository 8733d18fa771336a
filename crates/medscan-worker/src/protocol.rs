//! Engine control protocol
//!
//! Requests and events are JSON objects tagged by a `type` field, e.g.
//! `{"type":"ANALYZE","seq":3,"text":"..."}`. On a byte stream each message
//! occupies one line.

use crate::error::WorkerError;
use medscan_domain::Entity;
use serde::{Deserialize, Serialize};

/// Message sent to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineRequest {
    /// Build the terminology index (once) and reply `READY`
    Init,
    /// Analyze `text`; `seq` must grow with every new request
    Analyze {
        /// Request sequence number
        seq: u64,
        /// Text to analyze
        text: String,
    },
    /// Finish in-flight runs and stop
    Shutdown,
    /// Any other `type`; ignored by the engine
    #[serde(other)]
    Unknown,
}

/// Message emitted by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineEvent {
    /// The index is built
    Ready {
        /// Entries in the index
        entries: usize,
    },
    /// Scan progress for a run
    Progress {
        /// Request sequence number
        seq: u64,
        /// Integer percentage, non-decreasing within a run
        percent: u8,
    },
    /// Terminal success event for a run
    Result {
        /// Request sequence number
        seq: u64,
        /// Entities sorted by start offset
        entities: Vec<Entity>,
    },
    /// Terminal failure event; `seq` is absent for failures not tied to a run
    Error {
        /// Request sequence number, if any
        seq: Option<u64>,
        /// Human-readable reason
        message: String,
    },
}

impl EngineRequest {
    /// Decode one protocol line
    pub fn from_line(line: &str) -> Result<Self, WorkerError> {
        Ok(serde_json::from_str(line.trim())?)
    }

    /// Encode as one protocol line (no trailing newline)
    pub fn to_line(&self) -> Result<String, WorkerError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl EngineEvent {
    /// Sequence number of the run this event belongs to
    pub fn seq(&self) -> Option<u64> {
        match self {
            EngineEvent::Ready { .. } => None,
            EngineEvent::Progress { seq, .. } | EngineEvent::Result { seq, .. } => Some(*seq),
            EngineEvent::Error { seq, .. } => *seq,
        }
    }

    /// Whether this event ends a run
    pub fn is_terminal(&self) -> bool {
        matches!(self, EngineEvent::Result { .. } | EngineEvent::Error { .. })
    }

    /// Build an error event
    pub fn error(seq: Option<u64>, message: impl Into<String>) -> Self {
        EngineEvent::Error {
            seq,
            message: message.into(),
        }
    }

    /// Decode one protocol line
    pub fn from_line(line: &str) -> Result<Self, WorkerError> {
        Ok(serde_json::from_str(line.trim())?)
    }

    /// Encode as one protocol line (no trailing newline)
    pub fn to_line(&self) -> Result<String, WorkerError> {
        Ok(serde_json::to_string(self)?)
    }
}
