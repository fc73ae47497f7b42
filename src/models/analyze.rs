//! Sentiment analysis API data models
//!
//! Request and response types for `POST /analyze`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error reported for an item that carries neither text nor url
pub const MISSING_INPUT_ERROR: &str = "Provide either text or url";

/// Prefix for errors raised while retrieving Reddit content
pub const FETCH_ERROR_PREFIX: &str = "Failed to fetch Reddit content";

/// One element of the request batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputItem {
    /// Raw text to classify
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Reddit submission URL to fetch and classify
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InputItem {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            url: None,
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            text: None,
            url: Some(url.into()),
        }
    }

    /// Text slot, if populated
    ///
    /// An empty string counts as not populated.
    pub fn text(&self) -> Option<&str> {
        populated(self.text.as_deref())
    }

    /// URL slot, if populated
    pub fn url(&self) -> Option<&str> {
        populated(self.url.as_deref())
    }

    /// Whether neither slot is populated
    pub fn is_empty(&self) -> bool {
        self.text().is_none() && self.url().is_none()
    }
}

fn populated(slot: Option<&str>) -> Option<&str> {
    slot.filter(|value| !value.is_empty())
}

/// Where the classified text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Raw,
    Reddit,
}

/// Three-way sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
            Label::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful classification of one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub source: Source,
    /// Present only for Reddit-sourced records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub text: String,
    pub label: Label,
    /// Absolute compound score, rounded to three decimals
    pub confidence: f64,
    pub model: String,
}

/// Item-level failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub error: String,
}

/// One element of the response batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultRecord {
    Success(SentimentRecord),
    Failure(FailureRecord),
}

impl ResultRecord {
    pub fn failure(error: impl Into<String>) -> Self {
        ResultRecord::Failure(FailureRecord {
            error: error.into(),
        })
    }

    pub fn missing_input() -> Self {
        Self::failure(MISSING_INPUT_ERROR)
    }

    pub fn fetch_failed(details: impl fmt::Display) -> Self {
        Self::failure(format!("{}: {}", FETCH_ERROR_PREFIX, details))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResultRecord::Success(_))
    }

    pub fn as_success(&self) -> Option<&SentimentRecord> {
        match self {
            ResultRecord::Success(record) => Some(record),
            ResultRecord::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResultRecord::Success(_) => None,
            ResultRecord::Failure(failure) => Some(&failure.error),
        }
    }
}

/// Response body of `POST /analyze`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub results: Vec<ResultRecord>,
}
