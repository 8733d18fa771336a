//! Greedy phrase matcher
//!
//! Single left-to-right pass over the tokens. At each uncovered position the
//! matcher tries phrase windows from the longest length down to one token and
//! accepts the first window whose best index candidate beats the threshold
//! for its length. Accepted tokens are marked covered, so entities never
//! overlap.
//!
//! Long inputs are scanned in batches of start positions; the async runner
//! yields to the scheduler and reports progress after every batch.

use crate::config::{ExtractorConfig, PhrasePolicy};
use medscan_domain::{Entity, FuzzyIndex, MatchCandidate, Token};
use tracing::{debug, warn};

/// Entities found by a completed scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    /// Accepted entities in scan order
    pub entities: Vec<Entity>,
    /// Number of index queries issued
    pub phrases_queried: usize,
}

/// How an async scan ended
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Every start position was scanned
    Completed(ScanResult),
    /// The cancel check fired at a batch boundary
    Cancelled {
        /// Start positions scanned before stopping
        processed: usize,
        /// Start positions in the run
        total: usize,
    },
}

/// Per-run bookkeeping
struct ScanState {
    covered: Vec<bool>,
    result: ScanResult,
}

impl ScanState {
    fn new(token_count: usize) -> Self {
        Self {
            covered: vec![false; token_count],
            result: ScanResult::default(),
        }
    }
}

/// Integer percentage of `processed` over `total`, rounded down
pub fn progress_percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (processed.min(total) * 100 / total) as u8
}

/// The greedy longest-phrase-first matcher
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    config: ExtractorConfig,
}

impl PhraseMatcher {
    /// Create a matcher with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Scan every position without yielding
    pub fn run_blocking<I>(&self, text: &str, tokens: &[Token], index: &I) -> ScanResult
    where
        I: FuzzyIndex + ?Sized,
    {
        let mut state = ScanState::new(tokens.len());
        for i in 0..tokens.len() {
            self.scan_position(text, tokens, index, i, &mut state);
        }
        state.result
    }

    /// Scan cooperatively, `batch_size` start positions at a time.
    ///
    /// After each batch the runner reports progress (only when the percentage
    /// changes) and yields to the tokio scheduler. `cancel` is checked before
    /// each batch. An empty token list reports 100 once.
    pub async fn run<I, P, C>(
        &self,
        text: &str,
        tokens: &[Token],
        index: &I,
        mut progress: P,
        cancel: C,
    ) -> MatchOutcome
    where
        I: FuzzyIndex + ?Sized,
        P: FnMut(u8),
        C: Fn() -> bool,
    {
        let total = tokens.len();
        if total == 0 {
            progress(100);
            return MatchOutcome::Completed(ScanResult::default());
        }

        let mut state = ScanState::new(total);
        let mut last_reported: Option<u8> = None;
        let batch_size = self.config.batch_size.max(1);

        for batch_start in (0..total).step_by(batch_size) {
            if cancel() {
                debug!("Scan cancelled at {}/{} start positions", batch_start, total);
                return MatchOutcome::Cancelled {
                    processed: batch_start,
                    total,
                };
            }

            let batch_end = (batch_start + batch_size).min(total);
            for i in batch_start..batch_end {
                self.scan_position(text, tokens, index, i, &mut state);
            }

            let percent = progress_percent(batch_end, total);
            if last_reported != Some(percent) {
                progress(percent);
                last_reported = Some(percent);
            }

            tokio::task::yield_now().await;
        }

        MatchOutcome::Completed(state.result)
    }

    /// Try every phrase length at start position `i`
    fn scan_position<I>(&self, text: &str, tokens: &[Token], index: &I, i: usize, state: &mut ScanState)
    where
        I: FuzzyIndex + ?Sized,
    {
        if state.covered[i] {
            return;
        }

        let mut accepted: Option<(usize, MatchCandidate)> = None;

        for len in (1..=self.config.max_phrase_len).rev() {
            if i + len > tokens.len() {
                continue;
            }
            if state.covered[i..i + len].iter().any(|&c| c) {
                continue;
            }

            let window = &tokens[i..i + len];
            if len == 1 && window[0].char_len() < self.config.min_single_token_len {
                continue;
            }

            let query = window
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");

            state.result.phrases_queried += 1;
            let Some(best) = index.best_match(&query) else {
                continue;
            };
            if best.distance >= self.config.threshold_for(len) {
                continue;
            }

            match self.config.phrase_policy {
                PhrasePolicy::LongestFirst => {
                    accepted = Some((len, best));
                    break;
                }
                PhrasePolicy::BestScore => {
                    let better = accepted
                        .as_ref()
                        .map_or(true, |(_, current)| best.distance < current.distance);
                    if better {
                        accepted = Some((len, best));
                    }
                }
            }
        }

        let Some((len, candidate)) = accepted else {
            return;
        };

        let (first, last) = (&tokens[i], &tokens[i + len - 1]);
        match Entity::from_candidate(text, first, last, &candidate) {
            Some(entity) => {
                debug!(
                    "Accepted '{}' -> {} (distance {:.3}, {} tokens)",
                    entity.term, entity.code, candidate.distance, len
                );
                state.result.entities.push(entity);
                state.covered[i..i + len].iter_mut().for_each(|c| *c = true);
            }
            None => {
                warn!(
                    "Token offsets {}..{} do not slice the input, skipping match",
                    first.start, last.end
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Tokenizer;
    use medscan_domain::{MatchField, ReferenceEntry};
    use std::collections::HashMap;

    /// Index stub answering from a fixed query -> (code, distance) table
    struct TableIndex {
        answers: HashMap<String, (String, f64)>,
    }

    impl TableIndex {
        fn new(rows: &[(&str, &str, f64)]) -> Self {
            Self {
                answers: rows
                    .iter()
                    .map(|(q, code, d)| (q.to_lowercase(), (code.to_string(), *d)))
                    .collect(),
            }
        }
    }

    impl FuzzyIndex for TableIndex {
        fn query(&self, text: &str) -> Vec<MatchCandidate> {
            self.answers
                .get(&text.to_lowercase())
                .map(|(code, distance)| {
                    vec![MatchCandidate {
                        entry: ReferenceEntry::new(code.clone(), format!("{} description", code), "General"),
                        distance: *distance,
                        field: MatchField::Description,
                        ordinal: 0,
                    }]
                })
                .unwrap_or_default()
        }

        fn len(&self) -> usize {
            self.answers.len()
        }
    }

    fn scan(text: &str, index: &TableIndex, config: ExtractorConfig) -> ScanResult {
        let tokens = Tokenizer::default().tokenize(text);
        PhraseMatcher::new(config).run_blocking(text, &tokens, index)
    }

    #[test]
    fn test_longest_phrase_wins() {
        let index = TableIndex::new(&[("asthma attack", "J45.901", 0.2), ("asthma", "J45.909", 0.0)]);
        let result = scan("asthma attack today", &index, ExtractorConfig::default());
        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities[0].code, "J45.901");
        assert_eq!(result.entities[0].term, "asthma attack");
    }

    #[test]
    fn test_best_score_policy_prefers_lower_distance() {
        let index = TableIndex::new(&[("asthma attack", "J45.901", 0.2), ("asthma", "J45.909", 0.0)]);
        let config = ExtractorConfig {
            phrase_policy: PhrasePolicy::BestScore,
            ..Default::default()
        };
        let result = scan("asthma attack today", &index, config);
        assert_eq!(result.entities[0].code, "J45.909");
        assert_eq!(result.entities[0].term, "asthma");
    }

    #[test]
    fn test_thresholds_are_strict() {
        let index = TableIndex::new(&[("fever", "R50.9", 0.15), ("low back", "M54.5", 0.25)]);
        let result = scan("fever low back", &index, ExtractorConfig::default());
        assert!(result.entities.is_empty());
    }

    #[test]
    fn test_short_single_tokens_not_searched() {
        let index = TableIndex::new(&[("flu", "J11", 0.0)]);
        let result = scan("flu", &index, ExtractorConfig::default());
        assert!(result.entities.is_empty());
        assert_eq!(result.phrases_queried, 0);
    }

    #[test]
    fn test_short_token_inside_phrase_is_searched() {
        let index = TableIndex::new(&[("flu shot", "Z23", 0.0)]);
        let result = scan("flu shot", &index, ExtractorConfig::default());
        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities[0].term, "flu shot");
    }

    #[test]
    fn test_covered_tokens_are_skipped() {
        let index = TableIndex::new(&[
            ("chest pain", "R07.9", 0.0),
            ("pain", "R52", 0.0),
        ]);
        let result = scan("chest pain", &index, ExtractorConfig::default());
        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities[0].code, "R07.9");
    }

    #[test]
    fn test_phrase_spans_skipped_words() {
        // "and" is dropped by the tokenizer, so the phrase spans it
        let index = TableIndex::new(&[("nausea vomiting", "R11.2", 0.0)]);
        let result = scan("nausea and vomiting", &index, ExtractorConfig::default());
        assert_eq!(result.entities[0].term, "nausea and vomiting");
        assert_eq!(result.entities[0].start, 0);
        assert_eq!(result.entities[0].end, 19);
    }

    #[test]
    fn test_max_phrase_len_respected() {
        let index = TableIndex::new(&[("alpha beta gamma", "X1", 0.0)]);
        let config = ExtractorConfig {
            max_phrase_len: 2,
            ..Default::default()
        };
        let result = scan("alpha beta gamma", &index, config);
        assert!(result.entities.is_empty());
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0, 0), 100);
        assert_eq!(progress_percent(50, 120), 41);
        assert_eq!(progress_percent(120, 120), 100);
    }

    #[tokio::test]
    async fn test_async_matches_blocking() {
        let index = TableIndex::new(&[("cough", "R05", 0.0), ("fever", "R50.9", 0.1)]);
        let text = "cough fever ".repeat(40);
        let tokens = Tokenizer::default().tokenize(&text);
        let config = ExtractorConfig {
            batch_size: 7,
            ..Default::default()
        };
        let matcher = PhraseMatcher::new(config);

        let blocking = matcher.run_blocking(&text, &tokens, &index);
        let outcome = matcher.run(&text, &tokens, &index, |_| {}, || false).await;
        assert_eq!(outcome, MatchOutcome::Completed(blocking));
    }

    #[tokio::test]
    async fn test_progress_monotonic_and_complete() {
        let index = TableIndex::new(&[("cough", "R05", 0.0)]);
        let text = "cough ".repeat(123);
        let tokens = Tokenizer::default().tokenize(&text);
        let matcher = PhraseMatcher::new(ExtractorConfig {
            batch_size: 10,
            ..Default::default()
        });

        let mut seen = Vec::new();
        matcher.run(&text, &tokens, &index, |p| seen.push(p), || false).await;

        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(seen.last(), Some(&100));
        assert_eq!(seen.len(), 13);
    }

    #[tokio::test]
    async fn test_empty_tokens_report_once() {
        let index = TableIndex::new(&[]);
        let matcher = PhraseMatcher::new(ExtractorConfig::default());
        let mut seen = Vec::new();
        let outcome = matcher.run("", &[], &index, |p| seen.push(p), || false).await;
        assert_eq!(seen, vec![100]);
        assert_eq!(outcome, MatchOutcome::Completed(ScanResult::default()));
    }

    #[tokio::test]
    async fn test_cancel_stops_at_batch_boundary() {
        use std::cell::Cell;

        let index = TableIndex::new(&[("cough", "R05", 0.0)]);
        let text = "cough ".repeat(100);
        let tokens = Tokenizer::default().tokenize(&text);
        let matcher = PhraseMatcher::new(ExtractorConfig {
            batch_size: 25,
            ..Default::default()
        });

        let batches = Cell::new(0);
        let outcome = matcher
            .run(&text, &tokens, &index, |_| batches.set(batches.get() + 1), || batches.get() >= 2)
            .await;
        assert_eq!(outcome, MatchOutcome::Cancelled { processed: 50, total: 100 });
    }
}
