//! Core library for textostats.
//!
//! This crate computes descriptive statistics for natural-language text:
//! word and sentence counts, sentence-length spread, the longest and most
//! frequent words, and average word length. It is used by the `textostats`
//! CLI and MCP server.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`params`] - Request parameters and validation
//! - [`text`] - Sentence segmentation and word tokenization
//! - [`frequency`] - Word counts and most-frequent ranking
//! - [`stats`] - The analysis pipeline
//! - [`report`] - Response payloads
//!
//! # Quick Start
//!
//! ```
//! use textostats_core::{RequestParams, analyze};
//!
//! let request = RequestParams::with_text("Cats run. Dogs run fast.")
//!     .validate()
//!     .expect("text is not blank");
//! let report = analyze(&request);
//!
//! assert_eq!(report.word_count, 5);
//! assert_eq!(report.sentence_count, 2);
//! ```
#![deny(unsafe_code)]

pub mod config;

pub mod error;

pub mod frequency;

pub mod params;

pub mod report;

pub mod stats;

pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};

pub use error::{ConfigError, ConfigResult, ParamError, ParamResult};

pub use params::{AnalysisRequest, RequestParams};

pub use report::{ErrorResponse, StatisticsReport, WordFrequency};

pub use stats::analyze;

/// Default cap on input size read by the CLI (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
