//! Info command implementation

use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use textostats_core::config::{Config, ConfigSources, user_config_dir};
use textostats_core::params::{DEFAULT_MAX_DISP_WORDS, DEFAULT_OMIT_WORDS};
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    homepage: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            homepage: env!("CARGO_PKG_HOMEPAGE"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_config_dir: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    omit_words: Vec<String>,
    max_disp_words: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_first: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        let omit_words = config.omit_words.clone().unwrap_or_else(|| {
            DEFAULT_OMIT_WORDS
                .iter()
                .map(|w| (*w).to_string())
                .collect()
        });
        let max_disp_words = config
            .max_disp_words
            .filter(|n| *n != 0)
            .unwrap_or_else(|| i64::try_from(DEFAULT_MAX_DISP_WORDS).unwrap_or_default());
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            user_config_dir: user_config_dir().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            omit_words,
            max_disp_words,
            skip_first: config.skip_first.filter(|n| *n != 0),
            max_input_bytes: config.input_limit(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let info = PackageInfo::new();

    debug!(json_output = global_json, "executing info command");

    let config_info = ConfigInfo::from_config(config, sources);
    let full_info = FullInfo {
        package: info,
        config: config_info,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
    } else {
        println!(
            "{} {}",
            full_info.package.name.if_supports_color(Stream::Stdout, |t| t.bold()),
            full_info.package.version.if_supports_color(Stream::Stdout, |t| t.green())
        );
        if !full_info.package.description.is_empty() {
            println!("{}", full_info.package.description);
        }
        if !full_info.package.license.is_empty() {
            println!(
                "{}: {}",
                "License".if_supports_color(Stream::Stdout, |t| t.dimmed()),
                full_info.package.license,
            );
        }
        if !full_info.package.repository.is_empty() {
            println!(
                "{}: {}",
                "Repository".if_supports_color(Stream::Stdout, |t| t.dimmed()),
                full_info.package.repository.if_supports_color(Stream::Stdout, |t| t.cyan())
            );
        }

        // Configuration section
        println!();
        println!(
            "{}",
            "Configuration".if_supports_color(Stream::Stdout, |t| t.bold().underline().to_string()),
        );
        if let Some(ref path) = full_info.config.config_file {
            println!(
                "{}: {}",
                "Config file".if_supports_color(Stream::Stdout, |t| t.dimmed()),
                path.if_supports_color(Stream::Stdout, |t| t.cyan()),
            );
        } else {
            println!(
                "{}: {}",
                "Config file".if_supports_color(Stream::Stdout, |t| t.dimmed()),
                "none loaded".if_supports_color(Stream::Stdout, |t| t.yellow()),
            );
        }
        if let Some(ref dir) = full_info.config.user_config_dir {
            println!(
                "{}: {}",
                "User config dir".if_supports_color(Stream::Stdout, |t| t.dimmed()),
                dir,
            );
        }
        println!(
            "{}: {}",
            "Log level".if_supports_color(Stream::Stdout, |t| t.dimmed()),
            full_info.config.log_level,
        );
        if let Some(ref dir) = full_info.config.log_dir {
            println!(
                "{}: {}",
                "Log directory".if_supports_color(Stream::Stdout, |t| t.dimmed()),
                dir,
            );
        }

        // Request defaults
        println!();
        println!(
            "{}",
            "Defaults".if_supports_color(Stream::Stdout, |t| t.bold().underline().to_string()),
        );
        println!(
            "{}: {}",
            "Omit words".if_supports_color(Stream::Stdout, |t| t.dimmed()),
            full_info.config.omit_words.join(", ")
        );
        println!(
            "{}: {}",
            "Max display words".if_supports_color(Stream::Stdout, |t| t.dimmed()),
            full_info.config.max_disp_words
        );
        print_opt("Skip first", &full_info.config.skip_first);
        match full_info.config.max_input_bytes {
            Some(max) => println!(
                "{}: {} bytes",
                "Input limit".if_supports_color(Stream::Stdout, |t| t.dimmed()),
                max
            ),
            None => println!(
                "{}: {}",
                "Input limit".if_supports_color(Stream::Stdout, |t| t.dimmed()),
                "disabled".if_supports_color(Stream::Stdout, |t| t.yellow())
            ),
        }
    }

    Ok(())
}

/// Print an optional numeric value or "(not set)".
fn print_opt<T: std::fmt::Display>(label: &str, value: &Option<T>) {
    let label = label.if_supports_color(Stream::Stdout, |t| t.dimmed());
    match value {
        Some(v) => println!("{label}: {v}"),
        None => println!(
            "{label}: {}",
            "(not set)".if_supports_color(Stream::Stdout, |t| t.dimmed())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::default()
    }

    fn test_sources() -> ConfigSources {
        ConfigSources::default()
    }

    #[test]
    fn test_cmd_info_text_succeeds() {
        assert!(cmd_info(InfoArgs::default(), false, &test_config(), &test_sources()).is_ok());
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        assert!(cmd_info(InfoArgs::default(), true, &test_config(), &test_sources()).is_ok());
    }

    #[test]
    fn test_config_info_no_file() {
        let info = ConfigInfo::from_config(&test_config(), &test_sources());
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.omit_words, vec!["a", "an", "the"]);
        assert_eq!(info.max_disp_words, 3);
        assert!(info.skip_first.is_none());
        assert_eq!(info.max_input_bytes, Some(textostats_core::DEFAULT_MAX_INPUT_BYTES));
    }

    #[test]
    fn test_config_info_reports_configured_defaults() {
        let config = Config {
            omit_words: Some(vec!["of".to_string()]),
            max_disp_words: Some(6),
            skip_first: Some(1),
            disable_input_limit: true,
            ..Config::default()
        };
        let info = ConfigInfo::from_config(&config, &test_sources());
        assert_eq!(info.omit_words, vec!["of"]);
        assert_eq!(info.max_disp_words, 6);
        assert_eq!(info.skip_first, Some(1));
        assert!(info.max_input_bytes.is_none());
    }
}
