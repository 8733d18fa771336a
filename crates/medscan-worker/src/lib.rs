//! MedScan Worker
//!
//! Runs the extraction engine on an isolated tokio task and speaks a small
//! tagged message protocol with its caller.
//!
//! # Overview
//!
//! - **Protocol**: `INIT`, `ANALYZE`, `SHUTDOWN` requests; `READY`,
//!   `PROGRESS`, `RESULT`, `ERROR` events
//! - **Worker**: builds the terminology index once, then runs each analysis
//!   as its own task sharing that index
//! - **Session**: numbers requests and hides events from superseded runs
//!
//! # Supersession
//!
//! Starting a new analysis does not abort the previous one outright. The
//! worker publishes the latest sequence number and older runs stop at their
//! next batch boundary; whatever they emit before stopping is discarded by
//! the session.
//!
//! # Example Usage
//!
//! ```no_run
//! use medscan_worker::{EngineWorker, ExtractionSession, WorkerConfig};
//!
//! # async fn example() -> Result<(), medscan_worker::WorkerError> {
//! let mut session = ExtractionSession::new(EngineWorker::spawn(WorkerConfig::default()));
//! session.init().await?;
//!
//! let entities = session
//!     .analyze_to_end("Patient has diabetes and hypertension.", |p| eprintln!("{}%", p))
//!     .await?;
//! for entity in entities {
//!     println!("{} -> {}", entity.term, entity.code);
//! }
//!
//! session.shutdown().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub mod protocol;
mod session;
mod worker;

pub use config::WorkerConfig;
pub use error::WorkerError;
pub use protocol::{EngineEvent, EngineRequest};
pub use session::ExtractionSession;
pub use worker::{EngineHandle, EngineWorker};
