//! Batch processor
//!
//! Walks an analyze batch in order and turns every populated slot into a
//! result record. Item-level failures become failure records; nothing here
//! aborts the batch.

use crate::models::{InputItem, ResultRecord, SentimentRecord, Source};
use crate::services::classifier::{classify, SentimentScorer};
use crate::services::fetcher::ContentFetcher;
use crate::utils::logging::{truncate_content, MAX_LOGGED_TEXT};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Classifies raw text and fetched content for a batch of inputs
#[derive(Clone)]
pub struct BatchProcessor {
    scorer: Arc<dyn SentimentScorer>,
    fetcher: Arc<dyn ContentFetcher>,
}

impl fmt::Debug for BatchProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchProcessor")
            .field("model", &self.scorer.model_name())
            .finish_non_exhaustive()
    }
}

impl BatchProcessor {
    pub fn new(scorer: Arc<dyn SentimentScorer>, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { scorer, fetcher }
    }

    /// Model identifier stamped on every success record
    pub fn model_name(&self) -> &str {
        self.scorer.model_name()
    }

    /// Process every item sequentially, preserving input order
    pub async fn process(&self, items: &[InputItem]) -> Vec<ResultRecord> {
        let mut results = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            self.process_item(index, item, &mut results).await;
        }

        let failures = results.iter().filter(|r| !r.is_success()).count();
        info!(
            "Processed batch of {} items into {} results ({} failures)",
            items.len(),
            results.len(),
            failures
        );
        results
    }

    async fn process_item(&self, index: usize, item: &InputItem, results: &mut Vec<ResultRecord>) {
        if item.is_empty() {
            warn!("Item {} has neither text nor url", index);
            results.push(ResultRecord::missing_input());
            return;
        }

        if let Some(text) = item.text() {
            results.push(self.record(Source::Raw, None, text.to_string()));
        }

        if let Some(url) = item.url() {
            match self.fetcher.fetch_text(url).await {
                Ok(fetched) => {
                    results.push(self.record(Source::Reddit, Some(url.to_string()), fetched));
                }
                Err(e) => {
                    warn!("Item {}: failed to fetch {}: {}", index, url, e);
                    results.push(ResultRecord::fetch_failed(e));
                }
            }
        }
    }

    fn record(&self, source: Source, url: Option<String>, text: String) -> ResultRecord {
        let classification = classify(self.scorer.as_ref(), &text);
        debug!(
            "Classified {:?} text '{}' as {} ({})",
            source,
            truncate_content(&text, MAX_LOGGED_TEXT),
            classification.label,
            classification.confidence
        );

        ResultRecord::Success(SentimentRecord {
            source,
            url,
            text,
            label: classification.label,
            confidence: classification.confidence,
            model: self.scorer.model_name().to_string(),
        })
    }
}
