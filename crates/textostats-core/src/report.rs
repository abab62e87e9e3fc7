//! Response payloads.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for use in
//! both CLI JSON output and MCP tool responses. Field names are camelCase so
//! the JSON matches what HTTP clients of the statistics endpoint expect.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// A ranked word and how often it occurs, serialized as `[count, "word"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordFrequency(pub usize, pub String);

/// Descriptive statistics for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    /// Always `true`; failures use [`ErrorResponse`] instead.
    pub success: bool,
    /// Number of words across all sentences.
    pub word_count: usize,
    /// Number of detected sentences.
    pub sentence_count: usize,
    /// Words per sentence, rounded to the nearest integer.
    pub avg_words_per_sentence: usize,
    /// Population standard deviation of sentence lengths (4 significant digits).
    pub sentence_len_std_dev: f64,
    /// Distinct longest words, longest first.
    pub longest_words: Vec<String>,
    /// Length of the first entry in `longest_words`, in characters.
    pub longest_word_len: usize,
    /// Most frequent non-stopword words, most frequent first.
    pub max_word_freq: Vec<WordFrequency>,
    /// Mean length of non-stopword words (4 significant digits).
    pub avg_word_length: f64,
    /// Mean absolute length difference between consecutive sentences
    /// (4 significant digits).
    pub avg_conseq_sent_len_dif: f64,
}

/// Failure payload: `{"success": false, "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable reason.
    pub message: String,
}

impl ErrorResponse {
    /// Payload for request parameters that failed validation.
    pub fn bad_parameters(err: &ParamError) -> Self {
        Self {
            success: false,
            message: format!("Bad parameters: {err}"),
        }
    }

    /// Payload for text longer than the configured input limit.
    pub fn input_too_large(size: usize, limit: usize) -> Self {
        Self {
            success: false,
            message: format!("Input too large: text is {size} bytes (limit: {limit} bytes)"),
        }
    }
}

impl From<ParamError> for ErrorResponse {
    fn from(err: ParamError) -> Self {
        Self::bad_parameters(&err)
    }
}
