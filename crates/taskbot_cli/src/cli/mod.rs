use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskbot_core::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(author, version, about = "Track todos, deadlines and events from typed commands", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task file to read and write, overriding config and environment
    #[arg(long, value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read commands from stdin until EXIT or end of input (the default)
    ///
    /// Example: taskbot shell
    Shell,
    /// Run a single command line
    ///
    /// Example: taskbot exec TODO borrow book
    /// Example: taskbot exec DEADLINE return book /by 2/12/2019 1800
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Load the task file and report what could be recovered
    ///
    /// Example: taskbot check
    Check,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    StorePath,
    LogFilter,
    Alias(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let (field, remainder) = key_raw
        .split_once('.')
        .map(|(field, rest)| (field.trim(), Some(rest.trim())))
        .unwrap_or((key_raw.trim(), None));

    let canonical_field =
        canonicalize_flag_name(field).ok_or_else(|| "override key cannot be empty".to_string())?;

    match canonical_field.as_str() {
        "store_path" | "store" => {
            no_subfield(&canonical_field, remainder)?;
            Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::StorePath,
                value,
            })
        }
        "log_filter" | "log" => {
            no_subfield(&canonical_field, remainder)?;
            Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::LogFilter,
                value,
            })
        }
        "aliases" | "alias" => {
            let alias_name = remainder
                .filter(|segment| !segment.is_empty())
                .ok_or_else(|| "aliases override requires an alias name".to_string())?;
            if value.is_empty() {
                return Err(format!("alias '{alias_name}' needs an expansion"));
            }
            Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::Alias(alias_name.to_string()),
                value,
            })
        }
        other => Err(format!("unknown config field '{other}'")),
    }
}

/// Folds every `--config-override` into one set of overrides; later wins.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::StorePath => overrides.store_path = Some(parsed.value),
            ConfigOverrideTarget::LogFilter => overrides.log_filter = Some(parsed.value),
            ConfigOverrideTarget::Alias(name) => {
                overrides.aliases.insert(name, parsed.value);
            }
        }
    }
    Ok(overrides)
}

fn no_subfield(field: &str, remainder: Option<&str>) -> Result<(), String> {
    if remainder.is_some() {
        Err(format!("{field} override cannot have subfields"))
    } else {
        Ok(())
    }
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
