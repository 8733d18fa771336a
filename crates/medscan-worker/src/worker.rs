//! Engine worker: runs extractions on its own tokio task
//!
//! The worker is reached only through channels. Requests arrive on a bounded
//! mpsc channel; events leave on an unbounded one so progress reports from a
//! running scan never wait on the caller.

use crate::config::WorkerConfig;
use crate::error::WorkerError;
use crate::protocol::{EngineEvent, EngineRequest};
use medscan_extractor::{Extractor, ExtractorError, ExtractionRequest};
use medscan_terminology::TerminologyIndex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, OnceCell};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info, warn};

type Engine = Extractor<TerminologyIndex>;

/// Caller side of a spawned worker
///
/// # Examples
///
/// ```no_run
/// use medscan_worker::{EngineEvent, EngineRequest, EngineWorker, WorkerConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut handle = EngineWorker::spawn(WorkerConfig::default());
///     handle.send(EngineRequest::Init).await?;
///
///     if let Some(EngineEvent::Ready { entries }) = handle.recv().await {
///         println!("{} terminology entries loaded", entries);
///     }
///
///     handle.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct EngineHandle {
    requests: mpsc::Sender<EngineRequest>,
    events: mpsc::UnboundedReceiver<EngineEvent>,
    task: JoinHandle<()>,
}

impl EngineHandle {
    /// Send a request to the worker
    pub async fn send(&self, request: EngineRequest) -> Result<(), WorkerError> {
        self.requests
            .send(request)
            .await
            .map_err(|_| WorkerError::ChannelClosed)
    }

    /// Next event from the worker; `None` once the worker has stopped
    pub async fn recv(&mut self) -> Option<EngineEvent> {
        self.events.recv().await
    }

    /// Ask the worker to stop and wait for it.
    ///
    /// In-flight runs finish and their events stay readable until then.
    pub async fn shutdown(self) -> Result<(), WorkerError> {
        // A closed channel means the worker already stopped
        let _ = self.requests.send(EngineRequest::Shutdown).await;
        self.task.await.map_err(|e| WorkerError::Join(e.to_string()))
    }

    /// Split into the request sender, event receiver and task handle
    pub fn into_parts(
        self,
    ) -> (
        mpsc::Sender<EngineRequest>,
        mpsc::UnboundedReceiver<EngineEvent>,
        JoinHandle<()>,
    ) {
        (self.requests, self.events, self.task)
    }
}

/// The engine worker task
pub struct EngineWorker {
    config: WorkerConfig,
    engine: OnceCell<Arc<Engine>>,
    latest_seq: Arc<AtomicU64>,
    events: mpsc::UnboundedSender<EngineEvent>,
}

impl EngineWorker {
    /// Spawn a worker that builds its index on the first `INIT` or `ANALYZE`
    pub fn spawn(config: WorkerConfig) -> EngineHandle {
        Self::spawn_inner(config, OnceCell::new())
    }

    /// Spawn a worker over an index that is already built
    pub fn spawn_with_index(config: WorkerConfig, index: Arc<TerminologyIndex>) -> EngineHandle {
        let engine = Arc::new(Extractor::new(index, config.extractor.clone()));
        Self::spawn_inner(config, OnceCell::new_with(Some(engine)))
    }

    fn spawn_inner(config: WorkerConfig, engine: OnceCell<Arc<Engine>>) -> EngineHandle {
        let (request_tx, request_rx) = mpsc::channel(config.request_buffer.max(1));
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let worker = Self {
            config,
            engine,
            latest_seq: Arc::new(AtomicU64::new(0)),
            events: event_tx,
        };
        let task = tokio::spawn(worker.run(request_rx));

        EngineHandle {
            requests: request_tx,
            events: event_rx,
            task,
        }
    }

    async fn run(self, mut requests: mpsc::Receiver<EngineRequest>) {
        info!("Engine worker started");
        let mut runs = JoinSet::new();

        while let Some(request) = requests.recv().await {
            // Reap finished runs so the set does not grow without bound
            while runs.try_join_next().is_some() {}

            match request {
                EngineRequest::Init => match self.engine().await {
                    Ok(engine) => self.emit(EngineEvent::Ready {
                        entries: engine.index().len(),
                    }),
                    Err(e) => {
                        error!("Engine initialization failed: {}", e);
                        self.emit(EngineEvent::error(None, e.to_string()));
                    }
                },
                EngineRequest::Analyze { seq, text } => {
                    let previous = self.latest_seq.fetch_max(seq, Ordering::AcqRel);
                    if seq < previous {
                        debug!("Request {} arrived after {}, skipping", seq, previous);
                        continue;
                    }

                    let engine = match self.engine().await {
                        Ok(engine) => engine,
                        Err(e) => {
                            error!("Engine initialization failed: {}", e);
                            self.emit(EngineEvent::error(Some(seq), e.to_string()));
                            continue;
                        }
                    };

                    runs.spawn(analyze(
                        engine,
                        seq,
                        text,
                        self.events.clone(),
                        Arc::clone(&self.latest_seq),
                    ));
                }
                EngineRequest::Shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                EngineRequest::Unknown => {
                    warn!("Ignoring unknown engine request");
                }
            }
        }

        while let Some(joined) = runs.join_next().await {
            if let Err(e) = joined {
                error!("Analysis task failed: {}", e);
            }
        }
        info!("Engine worker stopped");
    }

    /// The engine, building the index on first use
    async fn engine(&self) -> Result<Arc<Engine>, WorkerError> {
        let engine = self
            .engine
            .get_or_try_init(|| async {
                let path = self.config.terminology_path.clone();
                let index_config = self.config.index.clone();

                let index = tokio::task::spawn_blocking(move || {
                    TerminologyIndex::load_or_fallback(path.as_deref(), index_config)
                })
                .await
                .map_err(|e| WorkerError::Initialization(e.to_string()))?;

                if index.is_empty() {
                    return Err(WorkerError::Initialization(
                        "terminology index has no entries".to_string(),
                    ));
                }

                info!("Engine ready ({} entries from {})", index.len(), index.source());
                Ok(Arc::new(Extractor::new(
                    Arc::new(index),
                    self.config.extractor.clone(),
                )))
            })
            .await?;
        Ok(Arc::clone(engine))
    }

    fn emit(&self, event: EngineEvent) {
        if self.events.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}

/// One extraction run; stops early once a newer request has arrived
async fn analyze(
    engine: Arc<Engine>,
    seq: u64,
    text: String,
    events: mpsc::UnboundedSender<EngineEvent>,
    latest_seq: Arc<AtomicU64>,
) {
    debug!("Run {} started ({} bytes)", seq, text.len());

    let result = engine
        .extract_with_progress(
            ExtractionRequest::new(text),
            |percent| {
                let _ = events.send(EngineEvent::Progress { seq, percent });
            },
            || latest_seq.load(Ordering::Acquire) > seq,
        )
        .await;

    let event = match result {
        Ok(result) => EngineEvent::Result {
            seq,
            entities: result.entities,
        },
        Err(ExtractorError::Cancelled { processed, total }) => {
            debug!("Run {} superseded after {}/{} positions", seq, processed, total);
            return;
        }
        Err(e) => {
            warn!("Run {} failed: {}", seq, e);
            EngineEvent::error(Some(seq), e.to_string())
        }
    };

    deliver(&events, &latest_seq, seq, event);
}

/// Send the terminal event of run `seq` unless a newer request has arrived.
///
/// Returns whether the event was sent.
fn deliver(
    events: &mpsc::UnboundedSender<EngineEvent>,
    latest_seq: &AtomicU64,
    seq: u64,
    event: EngineEvent,
) -> bool {
    if latest_seq.load(Ordering::Acquire) > seq {
        debug!("Run {} superseded before delivery", seq);
        return false;
    }
    events.send(event).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(seq: u64) -> EngineEvent {
        EngineEvent::Result {
            seq,
            entities: Vec::new(),
        }
    }

    #[test]
    fn test_deliver_current_run() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let latest_seq = AtomicU64::new(3);

        assert!(deliver(&tx, &latest_seq, 3, result(3)));
        assert_eq!(rx.try_recv().unwrap(), result(3));
    }

    #[test]
    fn test_deliver_drops_superseded_run() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let latest_seq = AtomicU64::new(4);

        assert!(!deliver(&tx, &latest_seq, 3, result(3)));
        assert!(rx.try_recv().is_err());
    }
}
