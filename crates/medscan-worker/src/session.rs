//! Extraction session: the caller's view of one engine worker
//!
//! The session numbers every analysis request. Starting a new analysis
//! supersedes the previous one: events still arriving for an older sequence
//! number are dropped here and never reach the caller.

use crate::error::WorkerError;
use crate::protocol::{EngineEvent, EngineRequest};
use crate::worker::EngineHandle;
use medscan_domain::Entity;
use tracing::debug;

/// Sequence-numbered session over an [`EngineHandle`]
pub struct ExtractionSession {
    handle: EngineHandle,
    next_seq: u64,
    current: Option<u64>,
}

impl ExtractionSession {
    /// Wrap a spawned worker
    pub fn new(handle: EngineHandle) -> Self {
        Self {
            handle,
            next_seq: 1,
            current: None,
        }
    }

    /// Sequence number of the most recent analysis request
    pub fn current_seq(&self) -> Option<u64> {
        self.current
    }

    /// Build the index if needed and wait for `READY`.
    ///
    /// Returns the number of indexed entries.
    pub async fn init(&mut self) -> Result<usize, WorkerError> {
        self.handle.send(EngineRequest::Init).await?;
        loop {
            match self.next_event().await {
                Some(EngineEvent::Ready { entries }) => return Ok(entries),
                Some(EngineEvent::Error { seq: None, message }) => {
                    return Err(WorkerError::Initialization(message))
                }
                Some(_) => continue,
                None => return Err(WorkerError::ChannelClosed),
            }
        }
    }

    /// Start analyzing `text`, superseding any analysis in flight.
    ///
    /// Returns the sequence number assigned to the request.
    pub async fn analyze(&mut self, text: impl Into<String>) -> Result<u64, WorkerError> {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.current = Some(seq);

        self.handle
            .send(EngineRequest::Analyze {
                seq,
                text: text.into(),
            })
            .await?;
        Ok(seq)
    }

    /// Next event that is not stale.
    ///
    /// Events tagged with a sequence number below the latest issued one are
    /// discarded. Returns `None` once the worker has stopped.
    pub async fn next_event(&mut self) -> Option<EngineEvent> {
        loop {
            let event = self.handle.recv().await?;
            match (event.seq(), self.current) {
                (Some(seq), Some(current)) if seq < current => {
                    debug!("Discarding stale event for request {} (current {})", seq, current);
                }
                _ => return Some(event),
            }
        }
    }

    /// Analyze `text` and wait for its terminal event.
    ///
    /// `on_progress` sees every progress report of this run.
    pub async fn analyze_to_end<P>(
        &mut self,
        text: impl Into<String>,
        mut on_progress: P,
    ) -> Result<Vec<Entity>, WorkerError>
    where
        P: FnMut(u8),
    {
        let seq = self.analyze(text).await?;
        loop {
            match self.next_event().await {
                Some(EngineEvent::Progress { seq: s, percent }) if s == seq => on_progress(percent),
                Some(EngineEvent::Result { seq: s, entities }) if s == seq => return Ok(entities),
                Some(EngineEvent::Error { seq: s, message }) if s.map_or(true, |s| s == seq) => {
                    return Err(WorkerError::Engine(message))
                }
                Some(_) => continue,
                None => return Err(WorkerError::ChannelClosed),
            }
        }
    }

    /// Stop the worker, letting in-flight runs finish
    pub async fn shutdown(self) -> Result<(), WorkerError> {
        self.handle.shutdown().await
    }
}
