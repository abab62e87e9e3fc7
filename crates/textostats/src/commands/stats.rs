//! Stats command: descriptive statistics for one text.

use anyhow::bail;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use tracing::{debug, instrument};

use textostats_core::config::Config;
use textostats_core::{
    ErrorResponse, ParamResult, RequestParams, StatisticsReport, WordFrequency, analyze,
};

use super::read_input_file;

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {
    /// File to analyze (`-` reads stdin).
    pub file: Utf8PathBuf,

    /// Treat the input as a JSON request body (`text`, `omitWords`, `maxDispWords`, `skipFirst`).
    #[arg(long)]
    pub request: bool,

    /// Stopwords excluded from ranking and average word length (comma-separated).
    #[arg(long, value_delimiter = ',', value_name = "WORDS")]
    pub omit_words: Option<Vec<String>>,

    /// Use no stopwords at all.
    #[arg(long, conflicts_with = "omit_words")]
    pub no_stopwords: bool,

    /// Entries shown in the longest and most frequent word lists (1-50).
    #[arg(long, value_name = "N")]
    pub max_disp_words: Option<i64>,

    /// Leading lines to skip before analysis, e.g. a title (1-50).
    #[arg(long, value_name = "N")]
    pub skip_first: Option<i64>,
}

impl StatsArgs {
    /// Merge input, flags, and config defaults. Flags win over a request
    /// body, which wins over config.
    fn request_params(&self, content: String, defaults: &RequestParams) -> ParamResult<RequestParams> {
        let flags = RequestParams {
            text: None,
            omit_words: if self.no_stopwords {
                Some(Vec::new())
            } else {
                self.omit_words.clone()
            },
            max_disp_words: self.max_disp_words,
            skip_first: self.skip_first,
        };
        let base = if self.request {
            RequestParams::from_body(&content)?
        } else {
            RequestParams::with_text(content)
        };
        Ok(flags.or_defaults(&base).or_defaults(defaults))
    }
}

/// Compute statistics for a file or stdin.
#[instrument(name = "cmd_stats", skip_all, fields(file = %args.file))]
pub fn cmd_stats(
    args: StatsArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        file = %args.file,
        request = args.request,
        max_disp_words = ?args.max_disp_words,
        skip_first = ?args.skip_first,
        "executing stats command"
    );

    let content = read_input_file(&args.file, max_input_bytes)?;

    let request = match args
        .request_params(content, &config.request_defaults())
        .and_then(RequestParams::validate)
    {
        Ok(request) => request,
        Err(err) => {
            let response = ErrorResponse::bad_parameters(&err);
            if global_json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
            bail!("{}", response.message);
        }
    };

    let report = analyze(&request);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&args.file, &report);
    }

    Ok(())
}

fn print_report(file: &Utf8Path, report: &StatisticsReport) {
    println!("{}", file.as_str().if_supports_color(Stream::Stdout, |t| t.bold()));
    print_field("Words", report.word_count);
    print_field("Sentences", report.sentence_count);
    print_field("Avg words per sentence", report.avg_words_per_sentence);
    print_field("Sentence length std dev", report.sentence_len_std_dev);
    print_field("Avg consecutive length diff", report.avg_conseq_sent_len_dif);
    print_field("Avg word length", report.avg_word_length);

    println!();
    if report.longest_words.is_empty() {
        println!(
            "{}: {}",
            "Longest words".if_supports_color(Stream::Stdout, |t| t.dimmed()),
            "(none)".if_supports_color(Stream::Stdout, |t| t.dimmed()),
        );
    } else {
        println!(
            "{} ({} chars): {}",
            "Longest words".if_supports_color(Stream::Stdout, |t| t.dimmed()),
            report.longest_word_len,
            report.longest_words.join(", ").if_supports_color(Stream::Stdout, |t| t.cyan())
        );
    }
    if report.max_word_freq.is_empty() {
        println!(
            "{}: {}",
            "Most frequent".if_supports_color(Stream::Stdout, |t| t.dimmed()),
            "(none)".if_supports_color(Stream::Stdout, |t| t.dimmed()),
        );
    } else {
        println!(
            "{}: {}",
            "Most frequent".if_supports_color(Stream::Stdout, |t| t.dimmed()),
            format_frequencies(&report.max_word_freq)
        );
    }
}

fn print_field<T: std::fmt::Display>(label: &str, value: T) {
    println!(
        "{}: {}",
        label.if_supports_color(Stream::Stdout, |t| t.dimmed()),
        value.if_supports_color(Stream::Stdout, |t| t.green()),
    );
}

fn format_frequencies(entries: &[WordFrequency]) -> String {
    entries
        .iter()
        .map(|WordFrequency(count, word)| format!("{word} ({count})"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use textostats_core::ParamError;

    fn args() -> StatsArgs {
        StatsArgs {
            file: Utf8PathBuf::from("-"),
            ..StatsArgs::default()
        }
    }

    #[test]
    fn flags_override_config_defaults() {
        let defaults = RequestParams {
            text: None,
            omit_words: Some(vec!["of".to_string()]),
            max_disp_words: Some(9),
            skip_first: Some(2),
        };
        let args = StatsArgs {
            max_disp_words: Some(4),
            ..args()
        };

        let params = args.request_params("Hi.".to_string(), &defaults).unwrap();
        assert_eq!(params.text.as_deref(), Some("Hi."));
        assert_eq!(params.max_disp_words, Some(4));
        assert_eq!(params.skip_first, Some(2));
        assert_eq!(params.omit_words, Some(vec!["of".to_string()]));
    }

    #[test]
    fn no_stopwords_clears_the_list() {
        let args = StatsArgs {
            no_stopwords: true,
            ..args()
        };
        let params = args
            .request_params("Hi.".to_string(), &RequestParams::default())
            .unwrap();
        assert_eq!(params.omit_words, Some(Vec::new()));
    }

    #[test]
    fn request_body_sits_between_flags_and_config() {
        let defaults = RequestParams {
            skip_first: Some(3),
            max_disp_words: Some(9),
            ..RequestParams::default()
        };
        let args = StatsArgs {
            request: true,
            skip_first: Some(1),
            ..args()
        };

        let params = args
            .request_params(
                r#"{"text": "Hi.", "maxDispWords": 5, "skipFirst": 4}"#.to_string(),
                &defaults,
            )
            .unwrap();
        assert_eq!(params.text.as_deref(), Some("Hi."));
        assert_eq!(params.max_disp_words, Some(5));
        assert_eq!(params.skip_first, Some(1));
    }

    #[test]
    fn malformed_request_body_is_missing_text() {
        let args = StatsArgs {
            request: true,
            ..args()
        };
        let err = args
            .request_params("not json".to_string(), &RequestParams::default())
            .unwrap_err();
        assert_eq!(err, ParamError::MissingText);
    }

    #[test]
    fn frequencies_format_word_then_count() {
        let entries = vec![
            WordFrequency(2, "run".to_string()),
            WordFrequency(1, "cats".to_string()),
        ];
        assert_eq!(format_frequencies(&entries), "run (2), cats (1)");
    }
}
