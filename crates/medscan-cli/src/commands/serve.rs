//! Serve command: the engine protocol as JSON lines over stdio.
//!
//! Each input line is one request, each output line one event. Lines that are
//! not valid requests are logged and skipped; requests of unknown type are
//! ignored by the engine.

use crate::config::Config;
use crate::error::Result;
use medscan_worker::{EngineEvent, EngineRequest, EngineWorker, WorkerConfig};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Execute the serve command on stdin/stdout.
pub async fn execute_serve(config: &Config) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    serve_stream(stdin, tokio::io::stdout(), config.engine.clone()).await?;
    Ok(())
}

/// Serve the protocol over any line reader and writer.
///
/// Runs until the reader is exhausted or a `SHUTDOWN` request arrives, then
/// waits for in-flight runs and returns the writer.
pub async fn serve_stream<R, W>(reader: R, writer: W, config: WorkerConfig) -> Result<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    info!("Serving engine protocol");

    let (requests, mut events, worker) = EngineWorker::spawn(config).into_parts();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<EngineEvent>();

    let forward_tx = out_tx.clone();
    let forwarder = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if forward_tx.send(event).is_err() {
                break;
            }
        }
    });

    let writer_task = tokio::spawn(async move {
        let mut writer = writer;
        while let Some(event) = out_rx.recv().await {
            let mut line = event.to_line()?;
            line.push('\n');
            writer.write_all(line.as_bytes()).await?;
            writer.flush().await?;
        }
        Ok::<W, crate::error::CliError>(writer)
    });

    let mut lines = reader.lines();
    let mut shutdown_sent = false;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!("Received request: {}", line);

        let request = match EngineRequest::from_line(&line) {
            Ok(request) => request,
            Err(e) => {
                warn!("Ignoring malformed request: {}", e);
                continue;
            }
        };

        let is_shutdown = request == EngineRequest::Shutdown;
        if requests.send(request).await.is_err() {
            break;
        }
        if is_shutdown {
            shutdown_sent = true;
            break;
        }
    }

    if !shutdown_sent {
        let _ = requests.send(EngineRequest::Shutdown).await;
    }

    worker
        .await
        .map_err(|e| medscan_worker::WorkerError::Join(e.to_string()))?;
    let _ = forwarder.await;
    drop(out_tx);

    let writer = writer_task
        .await
        .map_err(|e| medscan_worker::WorkerError::Join(e.to_string()))??;
    info!("Engine protocol session closed");
    Ok(writer)
}
