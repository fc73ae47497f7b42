//! Service layer module
//!
//! Contains the sentiment classifier, content fetchers, and the batch processor

pub mod classifier;
pub mod fetcher;
pub mod processor;
pub mod reddit;

pub use classifier::{classify, Classification, SentimentScorer, VaderScorer};
pub use fetcher::ContentFetcher;
pub use processor::BatchProcessor;
pub use reddit::RedditClient;
