//! Request parameters and their validation.
//!
//! [`RequestParams`] is the loosely-typed shape callers send; every field is
//! optional. [`RequestParams::validate`] checks it once and produces an
//! [`AnalysisRequest`], the only input [`crate::stats::analyze`] accepts.
//! Nothing downstream re-checks these fields.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ParamError, ParamResult};

/// Stopwords used when the caller does not supply `omitWords`.
pub const DEFAULT_OMIT_WORDS: &[&str] = &["a", "an", "the"];

/// Entries shown in the most-frequent and longest word lists by default.
pub const DEFAULT_MAX_DISP_WORDS: usize = 3;

/// Upper bound for `maxDispWords` and `skipFirst`.
pub const MAX_PARAM_VALUE: usize = 50;

/// Unvalidated request parameters.
///
/// A numeric field that is absent, `null`, or `0` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    /// The text to analyze. Required and not blank.
    pub text: Option<String>,
    /// Words excluded from frequency ranking and average word length.
    /// Defaults to `["a", "an", "the"]`.
    pub omit_words: Option<Vec<String>>,
    /// How many entries to show in the word lists (1-50, default 3).
    pub max_disp_words: Option<i64>,
    /// Leading lines to discard before analysis, e.g. a title (1-50).
    pub skip_first: Option<i64>,
}

impl RequestParams {
    /// Parameters carrying only `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Fill every unset field from `defaults`. A numeric `0` counts as unset.
    #[must_use]
    pub fn or_defaults(self, defaults: &Self) -> Self {
        Self {
            text: self.text.or_else(|| defaults.text.clone()),
            omit_words: self.omit_words.or_else(|| defaults.omit_words.clone()),
            max_disp_words: nonzero(self.max_disp_words).or(defaults.max_disp_words),
            skip_first: nonzero(self.skip_first).or(defaults.skip_first),
        }
    }

    /// Parse and validate a raw request body.
    pub fn parse_body(body: &str) -> ParamResult<AnalysisRequest> {
        Self::from_body(body)?.validate()
    }

    /// Extract parameters from a raw request body without validating ranges.
    ///
    /// A body that is not JSON, or not a JSON object, has no `text` and fails
    /// with [`ParamError::MissingText`].
    pub fn from_body(body: &str) -> ParamResult<Self> {
        let value = serde_json::from_str(body).unwrap_or(Value::Null);
        Self::from_value(&value)
    }

    /// Extract parameters from an arbitrary JSON value.
    ///
    /// Type mismatches map to the same errors as out-of-range values, in
    /// field order: `text`, `omitWords`, `maxDispWords`, `skipFirst`.
    pub fn from_value(value: &Value) -> ParamResult<Self> {
        let text = value
            .get("text")
            .and_then(Value::as_str)
            .ok_or(ParamError::MissingText)?;

        let omit_words = match value.get("omitWords") {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .map(|item| item.as_str().map(str::to_owned))
                    .collect::<Option<Vec<_>>>()
                    .ok_or(ParamError::OmitWords)?,
            ),
            Some(_) => return Err(ParamError::OmitWords),
        };

        Ok(Self {
            text: Some(text.to_owned()),
            omit_words,
            max_disp_words: integer_field(value.get("maxDispWords"), ParamError::MaxDispWords)?,
            skip_first: integer_field(value.get("skipFirst"), ParamError::SkipFirst)?,
        })
    }

    /// Check every field and apply defaults.
    #[tracing::instrument(skip_all)]
    pub fn validate(self) -> ParamResult<AnalysisRequest> {
        let text = self
            .text
            .filter(|text| !text.trim().is_empty())
            .ok_or(ParamError::MissingText)?;

        let omit_words: HashSet<String> = self.omit_words.map_or_else(
            || DEFAULT_OMIT_WORDS.iter().map(|w| (*w).to_owned()).collect(),
            |words| words.into_iter().collect(),
        );

        let max_disp_words =
            bounded(self.max_disp_words, ParamError::MaxDispWords)?.unwrap_or(DEFAULT_MAX_DISP_WORDS);
        let skip_first = bounded(self.skip_first, ParamError::SkipFirst)?.unwrap_or(0);

        tracing::debug!(
            text_len = text.len(),
            omit_words = omit_words.len(),
            max_disp_words,
            skip_first,
            "request parameters validated"
        );

        Ok(AnalysisRequest {
            text,
            omit_words,
            max_disp_words,
            skip_first,
        })
    }
}

fn nonzero(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v != 0)
}

/// Read an optional integer from JSON, accepting numeric strings.
///
/// Falsy values (`null`, `false`, `""`) mean unset.
fn integer_field(value: Option<&Value>, err: ParamError) -> ParamResult<Option<i64>> {
    let parsed = match value {
        None | Some(Value::Null | Value::Bool(false)) => return Ok(None),
        Some(Value::String(s)) if s.is_empty() => return Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(whole_number)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
        }
        Some(_) => None,
    };
    parsed.map(Some).ok_or(err)
}

#[allow(clippy::cast_possible_truncation)]
fn whole_number(v: f64) -> Option<i64> {
    (v.is_finite() && v.fract() == 0.0 && v.abs() <= i64::MAX as f64).then(|| v as i64)
}

/// `0` and `None` mean unset; anything else must fall in `1..=MAX_PARAM_VALUE`.
fn bounded(value: Option<i64>, err: ParamError) -> ParamResult<Option<usize>> {
    match value {
        None | Some(0) => Ok(None),
        Some(v) => usize::try_from(v)
            .ok()
            .filter(|v| (1..=MAX_PARAM_VALUE).contains(v))
            .map(Some)
            .ok_or(err),
    }
}

/// A validated analysis request.
///
/// Only [`RequestParams::validate`] builds one, so holding an
/// `AnalysisRequest` means the text is non-blank and both counts are in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    text: String,
    omit_words: HashSet<String>,
    max_disp_words: usize,
    skip_first: usize,
}

impl AnalysisRequest {
    /// The text to analyze.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Stopwords, matched exactly against lowercase words.
    pub const fn omit_words(&self) -> &HashSet<String> {
        &self.omit_words
    }

    /// Entries to show in the most-frequent and longest word lists.
    pub const fn max_disp_words(&self) -> usize {
        self.max_disp_words
    }

    /// Leading lines to discard before analysis.
    pub const fn skip_first(&self) -> usize {
        self.skip_first
    }
}
