//! Statistics aggregation.
//!
//! [`analyze`] runs the whole pipeline for one request: segment the text,
//! tokenize each sentence into a shared [`FrequencyMap`], then derive the
//! counts, averages, and word lists of a [`StatisticsReport`].
//!
//! Every ratio has a defined value for degenerate input (no sentences, no
//! words, only stopwords), so the report never contains NaN.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::frequency::FrequencyMap;
use crate::params::AnalysisRequest;
use crate::report::StatisticsReport;
use crate::text;

/// Significant digits kept in the fractional report fields.
pub const SIGNIFICANT_DIGITS: i32 = 4;

/// Word counts per sentence, in text order and sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceLengthProfile {
    unsorted: Vec<usize>,
    sorted: Vec<usize>,
    std_dev: f64,
}

impl SentenceLengthProfile {
    /// Build the profile from per-sentence word counts in text order.
    pub fn new(lengths: Vec<usize>) -> Self {
        let mut sorted = lengths.clone();
        sorted.sort_unstable();
        let std_dev = population_std_dev(&sorted);
        Self {
            unsorted: lengths,
            sorted,
            std_dev,
        }
    }

    /// Counts in original sentence order.
    pub fn unsorted(&self) -> &[usize] {
        &self.unsorted
    }

    /// Counts in ascending order.
    pub fn sorted(&self) -> &[usize] {
        &self.sorted
    }

    /// Population standard deviation of the counts; 0 when empty.
    pub const fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Mean absolute difference between neighbouring sentences, in text
    /// order; 0 with fewer than two sentences.
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_consecutive_difference(&self) -> f64 {
        let pairs = self.unsorted.len().saturating_sub(1);
        if pairs == 0 {
            return 0.0;
        }
        let total: usize = self
            .unsorted
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]))
            .sum();
        total as f64 / pairs as f64
    }
}

#[allow(clippy::cast_precision_loss)]
fn population_std_dev(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<usize>() as f64 / n;
    let variance = values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt()
}

/// Round `value` to `digits` significant decimal digits, halves away from
/// zero. Zero and non-finite input round to 0.
#[allow(clippy::cast_possible_truncation)]
pub fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return 0.0;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let exponent = digits - 1 - magnitude;
    if exponent >= 0 {
        let factor = 10f64.powi(exponent);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-exponent);
        (value / factor).round() * factor
    }
}

/// Length of a word in characters.
fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// Compute every statistic for one validated request.
#[tracing::instrument(
    skip_all,
    fields(
        text_len = request.text().len(),
        skip_first = request.skip_first(),
        max_disp_words = request.max_disp_words(),
    )
)]
pub fn analyze(request: &AnalysisRequest) -> StatisticsReport {
    let sentences = text::segment(request.text(), request.skip_first());

    let mut frequencies = FrequencyMap::new();
    let mut all_words = Vec::new();
    let mut lengths = Vec::with_capacity(sentences.len());
    for sentence in &sentences {
        let words = text::tokenize(sentence, Some(&mut frequencies));
        lengths.push(words.len());
        all_words.extend(words);
    }
    let profile = SentenceLengthProfile::new(lengths);

    let sentence_count = sentences.len();
    let word_count = all_words.len();
    let limit = request.max_disp_words();

    let max_word_freq = frequencies.top_frequent(request.omit_words(), limit);
    let longest_words = longest_words(&all_words, limit);
    let longest_word_len = longest_words.first().map_or(0, |word| char_len(word));

    let avg_words_per_sentence = if sentence_count == 0 {
        0
    } else {
        // round half up
        (2 * word_count + sentence_count) / (2 * sentence_count)
    };

    tracing::debug!(
        word_count,
        sentence_count,
        distinct_words = frequencies.len(),
        "text analyzed"
    );

    StatisticsReport {
        success: true,
        word_count,
        sentence_count,
        avg_words_per_sentence,
        sentence_len_std_dev: round_significant(profile.std_dev(), SIGNIFICANT_DIGITS),
        longest_words,
        longest_word_len,
        max_word_freq,
        avg_word_length: round_significant(
            avg_word_length(&all_words, request.omit_words()),
            SIGNIFICANT_DIGITS,
        ),
        avg_conseq_sent_len_dif: round_significant(
            profile.avg_consecutive_difference(),
            SIGNIFICANT_DIGITS,
        ),
    }
}

/// The distinct words among the `limit` longest occurrences, longest first.
///
/// Both sorts are stable, so among equally long words the later occurrence
/// in the text makes the cut and keeps its relative position.
fn longest_words(words: &[String], limit: usize) -> Vec<String> {
    let mut by_length: Vec<&str> = words.iter().map(String::as_str).collect();
    by_length.sort_by_cached_key(|word| char_len(word));

    let tail = &by_length[by_length.len().saturating_sub(limit)..];
    let mut seen = HashSet::new();
    let mut longest: Vec<String> = tail
        .iter()
        .filter(|word| seen.insert(**word))
        .map(|word| (*word).to_owned())
        .collect();

    longest.sort_by_cached_key(|word| Reverse(char_len(word)));
    longest
}

/// Mean length of the words not in `stopwords`; 0 when there are none.
#[allow(clippy::cast_precision_loss)]
fn avg_word_length(words: &[String], stopwords: &HashSet<String>) -> f64 {
    let (letters, count) = words
        .iter()
        .filter(|word| !stopwords.contains(word.as_str()))
        .fold((0usize, 0usize), |(letters, count), word| {
            (letters + char_len(word), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        letters as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RequestParams;
    use crate::report::WordFrequency;

    const SAMPLE: &str = include_str!("../tests/fixtures/sample.txt");

    const ARTICLE_OMIT_WORDS: &[&str] = &["a", "an", "the", "of", "in", "on", "and", "to", "at", "or"];

    fn request(text: &str, omit: Option<&[&str]>, max: Option<i64>, skip: Option<i64>) -> AnalysisRequest {
        RequestParams {
            text: Some(text.to_string()),
            omit_words: omit.map(|words| words.iter().map(|w| (*w).to_string()).collect()),
            max_disp_words: max,
            skip_first: skip,
        }
        .validate()
        .unwrap()
    }

    fn freq(pairs: &[(usize, &str)]) -> Vec<WordFrequency> {
        pairs
            .iter()
            .map(|&(count, word)| WordFrequency(count, word.to_string()))
            .collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn two_short_sentences() {
        let report = analyze(&request("Cats run. Dogs run fast!", Some(&[]), Some(3), None));

        assert!(report.success);
        assert_eq!(report.word_count, 5);
        assert_eq!(report.sentence_count, 2);
        assert_eq!(report.avg_words_per_sentence, 3);
        assert_close(report.sentence_len_std_dev, 0.5);
        assert_close(report.avg_conseq_sent_len_dif, 1.0);
        assert_eq!(
            report.max_word_freq,
            freq(&[(2, "run"), (1, "cats"), (1, "dogs")])
        );
        assert_eq!(report.longest_words, vec!["cats", "dogs", "fast"]);
        assert_eq!(report.longest_word_len, 4);
        assert_close(report.avg_word_length, 3.6);
    }

    #[test]
    fn header_skip_leaves_one_sentence() {
        let text = "Title Line\nAuthor Line\nThe cat sat.\n";
        let report = analyze(&request(text, None, None, Some(2)));

        assert_eq!(report.sentence_count, 1);
        assert_eq!(report.word_count, 3);
        assert_close(report.sentence_len_std_dev, 0.0);
        assert_close(report.avg_conseq_sent_len_dif, 0.0);
        assert_eq!(report.max_word_freq, freq(&[(1, "cat"), (1, "sat")]));
        // "the" is a stopword: (3 + 3) / 2
        assert_close(report.avg_word_length, 3.0);
    }

    #[test]
    fn only_stopwords_gives_zero_average_length() {
        let report = analyze(&request("The a an. A the!", None, None, None));
        assert_eq!(report.word_count, 5);
        assert!(report.max_word_freq.is_empty());
        assert_close(report.avg_word_length, 0.0);
        assert!(!report.avg_word_length.is_nan());
    }

    #[test]
    fn no_sentences_after_header_skip() {
        let report = analyze(&request("Title\n   \n", None, None, Some(1)));
        assert_eq!(report.sentence_count, 0);
        assert_eq!(report.word_count, 0);
        assert_eq!(report.avg_words_per_sentence, 0);
        assert!(report.longest_words.is_empty());
        assert_eq!(report.longest_word_len, 0);
        assert_close(report.sentence_len_std_dev, 0.0);
        assert_close(report.avg_word_length, 0.0);
    }

    #[test]
    fn punctuation_only_sentence_has_no_words() {
        let report = analyze(&request("-- & --", None, None, None));
        assert_eq!(report.sentence_count, 1);
        assert_eq!(report.word_count, 0);
        assert_eq!(report.avg_words_per_sentence, 0);
        assert!(report.longest_words.is_empty());
    }

    #[test]
    fn longest_words_are_distinct_and_descending() {
        let report = analyze(&request(
            "Extraordinary words. Extraordinary again. Tiny.",
            None,
            Some(3),
            None,
        ));
        assert_eq!(report.longest_words, vec!["extraordinary", "again"]);
        assert_eq!(report.longest_word_len, 13);
    }

    #[test]
    fn longest_word_length_counts_characters() {
        let report = analyze(&request("Chigüire über.", None, Some(1), None));
        assert_eq!(report.longest_words, vec!["chigüire"]);
        assert_eq!(report.longest_word_len, 8);
    }

    #[test]
    fn ranked_i_capitalized_in_report() {
        let report = analyze(&request("I think. I know. I am.", None, Some(1), None));
        assert_eq!(report.max_word_freq, freq(&[(3, "I")]));
    }

    #[test]
    fn consecutive_difference_uses_text_order() {
        let profile = SentenceLengthProfile::new(vec![1, 5, 1]);
        assert_eq!(profile.sorted(), &[1, 1, 5]);
        assert_eq!(profile.unsorted(), &[1, 5, 1]);
        assert_close(profile.avg_consecutive_difference(), 4.0);
    }

    #[test]
    fn profile_of_nothing_is_zero() {
        let profile = SentenceLengthProfile::new(Vec::new());
        assert_close(profile.std_dev(), 0.0);
        assert_close(profile.avg_consecutive_difference(), 0.0);
        let single = SentenceLengthProfile::new(vec![12]);
        assert_close(single.std_dev(), 0.0);
        assert_close(single.avg_consecutive_difference(), 0.0);
    }

    #[test]
    fn population_standard_deviation() {
        // mean 5, squared deviations sum to 32 over 8 values
        let profile = SentenceLengthProfile::new(vec![2, 4, 4, 4, 5, 5, 7, 9]);
        assert_close(profile.std_dev(), 2.0);
    }

    #[test]
    fn rounding_to_significant_digits() {
        assert_close(round_significant(12.871_234, 4), 12.87);
        assert_close(round_significant(5.161_29, 4), 5.161);
        assert_close(round_significant(12.125, 4), 12.13);
        assert_close(round_significant(123_456.0, 4), 123_500.0);
        assert_close(round_significant(0.000_123_456, 4), 0.000_123_5);
        assert_close(round_significant(0.0, 4), 0.0);
        assert_close(round_significant(f64::NAN, 4), 0.0);
    }

    #[test]
    fn average_words_per_sentence_rounds_half_up() {
        // 5 words over 2 sentences
        let report = analyze(&request("One two. Three four five.", None, None, None));
        assert_eq!(report.avg_words_per_sentence, 3);
        // 4 words over 3 sentences
        let report = analyze(&request("One. Two. Three four.", None, None, None));
        assert_eq!(report.avg_words_per_sentence, 1);
    }

    #[test]
    fn reference_article_with_defaults() {
        let report = analyze(&request(SAMPLE, None, None, None));

        assert_eq!(report.word_count, 642);
        assert_eq!(report.sentence_count, 31);
        assert_eq!(report.avg_words_per_sentence, 21);
        assert_close(report.sentence_len_std_dev, 12.87);
        assert_eq!(
            report.longest_words,
            vec![
                "drink-eating-worlds-largest-rodent",
                "hipster-friendly",
                "establishments"
            ]
        );
        assert_eq!(report.longest_word_len, 34);
        assert_eq!(
            report.max_word_freq,
            freq(&[(18, "of"), (16, "in"), (14, "and")])
        );
        assert_close(report.avg_word_length, 5.161);
        assert_close(report.avg_conseq_sent_len_dif, 16.0);
    }

    #[test]
    fn reference_article_with_options() {
        let report = analyze(&request(SAMPLE, Some(ARTICLE_OMIT_WORDS), Some(3), Some(7)));

        assert_eq!(report.word_count, 636);
        assert_eq!(report.sentence_count, 31);
        assert_eq!(report.avg_words_per_sentence, 21);
        assert_close(report.sentence_len_std_dev, 12.78);
        assert_eq!(
            report.longest_words,
            vec!["hipster-friendly", "colombian-made", "establishments"]
        );
        assert_eq!(report.longest_word_len, 16);
        assert_eq!(
            report.max_word_freq,
            freq(&[(12, "beer"), (9, "I"), (9, "that")])
        );
        assert_close(report.avg_word_length, 5.571);
        assert_close(report.avg_conseq_sent_len_dif, 15.8);
    }

    #[test]
    fn reference_article_with_eight_display_words() {
        let report = analyze(&request(SAMPLE, None, Some(8), Some(7)));

        assert_eq!(
            report.longest_words,
            vec![
                "hipster-friendly",
                "neighborhood\u{2019}s",
                "colombian-made",
                "establishments",
                "german-styled",
                "easy-drinking",
                "funky-scented",
                "illustrations"
            ]
        );
        assert_eq!(
            report.max_word_freq,
            freq(&[
                (18, "of"),
                (16, "in"),
                (14, "and"),
                (12, "to"),
                (12, "beer"),
                (9, "I"),
                (9, "that"),
                (8, "as")
            ])
        );
        assert_close(report.avg_word_length, 5.115);
    }

    #[test]
    fn sentence_and_word_counts_agree_with_components() {
        let req = request(SAMPLE, None, None, Some(3));
        let report = analyze(&req);
        let sentences = text::segment(req.text(), req.skip_first());
        let words: usize = sentences.iter().map(|s| text::tokenize(s, None).len()).sum();
        assert_eq!(report.sentence_count, sentences.len());
        assert_eq!(report.word_count, words);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let req = request(SAMPLE, None, Some(10), None);
        let first = serde_json::to_string(&analyze(&req)).unwrap();
        let second = serde_json::to_string(&analyze(&req)).unwrap();
        assert_eq!(first, second);
    }
}
