//! Core Extractor implementation

use crate::assembler::assemble;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::matcher::{MatchOutcome, PhraseMatcher, ScanResult};
use crate::tokenizer::Tokenizer;
use crate::types::{ExtractionMetadata, ExtractionRequest, ExtractionResult};
use medscan_domain::FuzzyIndex;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// The Extractor turns free text into coded, non-overlapping entities
pub struct Extractor<I>
where
    I: FuzzyIndex + ?Sized,
{
    index: Arc<I>,
    tokenizer: Tokenizer,
    matcher: PhraseMatcher,
    config: ExtractorConfig,
}

impl<I> Extractor<I>
where
    I: FuzzyIndex + ?Sized,
{
    /// Create a new Extractor over a shared index
    pub fn new(index: Arc<I>, config: ExtractorConfig) -> Self {
        Self {
            index,
            tokenizer: Tokenizer::new(config.min_token_len),
            matcher: PhraseMatcher::new(config.clone()),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The shared index
    pub fn index(&self) -> &Arc<I> {
        &self.index
    }

    /// Extract entities without yielding
    pub fn extract(&self, request: ExtractionRequest) -> Result<ExtractionResult, ExtractorError> {
        self.check_length(&request.text)?;
        let started = Instant::now();

        let tokens = self.tokenizer.tokenize(&request.text);
        debug!("Tokenized {} bytes into {} tokens", request.text.len(), tokens.len());

        let scan = self.matcher.run_blocking(&request.text, &tokens, &*self.index);
        Ok(self.finish(scan, tokens.len(), started))
    }

    /// Extract entities cooperatively, reporting progress after each batch.
    ///
    /// `cancel` is polled at batch boundaries; a positive answer ends the run
    /// with [`ExtractorError::Cancelled`].
    pub async fn extract_with_progress<P, C>(
        &self,
        request: ExtractionRequest,
        progress: P,
        cancel: C,
    ) -> Result<ExtractionResult, ExtractorError>
    where
        P: FnMut(u8),
        C: Fn() -> bool,
    {
        self.check_length(&request.text)?;
        let started = Instant::now();

        let tokens = self.tokenizer.tokenize(&request.text);
        debug!("Tokenized {} bytes into {} tokens", request.text.len(), tokens.len());

        let outcome = self
            .matcher
            .run(&request.text, &tokens, &*self.index, progress, cancel)
            .await;

        match outcome {
            MatchOutcome::Completed(scan) => Ok(self.finish(scan, tokens.len(), started)),
            MatchOutcome::Cancelled { processed, total } => {
                info!("Extraction cancelled after {}/{} start positions", processed, total);
                Err(ExtractorError::Cancelled { processed, total })
            }
        }
    }

    fn check_length(&self, text: &str) -> Result<(), ExtractorError> {
        if text.len() > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(text.len(), self.config.max_text_length));
        }
        Ok(())
    }

    fn finish(&self, scan: ScanResult, token_count: usize, started: Instant) -> ExtractionResult {
        let entities = assemble(scan.entities);
        let metadata = ExtractionMetadata {
            token_count,
            phrases_queried: scan.phrases_queried,
            processing_time_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            "Extracted {} entities from {} tokens ({} queries, {}ms)",
            entities.len(),
            metadata.token_count,
            metadata.phrases_queried,
            metadata.processing_time_ms
        );

        ExtractionResult { entities, metadata }
    }
}
