use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "TASKBOT_CONFIG_PATH";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store_path: Option<String>,
    #[serde(default)]
    pub log_filter: Option<String>,
    /// Leading-token rewrites applied before parsing, e.g. `"ls" -> "LIST"`.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub store_path: Option<String>,
    pub log_filter: Option<String>,
    pub aliases: HashMap<String, String>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("taskbot")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskbot")
            .join(CONFIG_FILE_NAME))
    }
}

pub fn load_config() -> Result<Config, AppError> {
    let path = config_path()?;
    load_config_from_path(&path)
}

/// Never fails: a broken or unlocatable config falls back to defaults and
/// the problem is handed back for the caller to report.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks a config from any source, including one merged with overrides.
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    validate_aliases(&config.aliases)
}

fn validate_aliases(aliases: &HashMap<String, String>) -> Result<(), AppError> {
    for (alias, expansion) in aliases {
        if alias.is_empty() || alias.contains(char::is_whitespace) {
            return Err(AppError::invalid_data(format!(
                "alias '{alias}' must be a single token"
            )));
        }
        if expansion.trim().is_empty() {
            return Err(AppError::invalid_data(format!(
                "alias '{alias}' has an empty expansion"
            )));
        }
    }
    Ok(())
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(store_path) = overrides.store_path.as_ref() {
        merged.store_path = Some(store_path.clone());
    }
    if let Some(log_filter) = overrides.log_filter.as_ref() {
        merged.log_filter = Some(log_filter.clone());
    }

    for (alias, value) in overrides.aliases.iter() {
        merged.aliases.insert(alias.clone(), value.clone());
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::{
        Config, ConfigOverrides, load_config_from_path, load_config_with_fallback_from_path,
        merge_overrides, validate_config,
    };
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("taskbot-{nanos}-{file_name}"))
    }

    #[test]
    fn load_config_missing_returns_defaults_without_error() {
        let path = temp_path("missing-config.json");
        let result = load_config_with_fallback_from_path(&path);

        assert_eq!(result.config, Config::default());
        assert!(result.error.is_none());
    }

    #[test]
    fn load_config_invalid_returns_defaults_and_error() {
        let path = temp_path("invalid-config.json");
        fs::write(&path, "{ invalid json ").unwrap();

        let result = load_config_with_fallback_from_path(&path);
        fs::remove_file(&path).ok();

        assert_eq!(result.config, Config::default());
        assert_eq!(result.error.unwrap().code(), "invalid_data");
    }

    #[test]
    fn load_config_reads_valid_file() {
        let path = temp_path("valid-config.json");
        let content = serde_json::json!({
            "store_path": "/tmp/tasks.txt",
            "aliases": {
                "ls": "LIST"
            }
        });
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let loaded = load_config_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.store_path.as_deref(), Some("/tmp/tasks.txt"));
        assert_eq!(loaded.log_filter, None);
        assert_eq!(loaded.aliases.get("ls").map(String::as_str), Some("LIST"));
    }

    #[test]
    fn load_config_rejects_multi_token_alias() {
        let path = temp_path("bad-alias.json");
        let content = serde_json::json!({ "aliases": { "two words": "LIST" } });
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let err = load_config_from_path(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert_eq!(err.code(), "invalid_data");
    }

    #[test]
    fn merge_overrides_updates_fields_and_aliases() {
        let base = Config {
            store_path: Some("a.txt".into()),
            log_filter: None,
            aliases: [("ls".into(), "LIST".into())].into_iter().collect(),
        };

        let overrides = ConfigOverrides {
            store_path: Some("b.txt".into()),
            log_filter: Some("debug".into()),
            aliases: [
                ("ls".into(), "FIND".into()),
                ("bye".into(), "EXIT".into()),
            ]
            .into_iter()
            .collect(),
        };

        let merged = merge_overrides(&base, &overrides);
        assert_eq!(merged.store_path.as_deref(), Some("b.txt"));
        assert_eq!(merged.log_filter.as_deref(), Some("debug"));
        assert_eq!(merged.aliases.get("ls").map(String::as_str), Some("FIND"));
        assert_eq!(merged.aliases.get("bye").map(String::as_str), Some("EXIT"));
        assert_eq!(base.store_path.as_deref(), Some("a.txt"));
    }

    #[test]
    fn validate_config_rejects_merged_override_aliases() {
        let overrides = ConfigOverrides {
            aliases: [("two words".into(), "LIST".into())].into_iter().collect(),
            ..ConfigOverrides::default()
        };
        let merged = merge_overrides(&Config::default(), &overrides);

        let err = validate_config(&merged).unwrap_err();
        assert_eq!(err.code(), "invalid_data");
        assert!(err.message().contains("two words"));

        let blank = ConfigOverrides {
            aliases: [("ls".into(), "  ".into())].into_iter().collect(),
            ..ConfigOverrides::default()
        };
        assert!(validate_config(&merge_overrides(&Config::default(), &blank)).is_err());
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn merge_overrides_with_empty_overrides_returns_clone() {
        let base = Config {
            store_path: None,
            log_filter: Some("info".into()),
            aliases: [("ls".into(), "LIST".into())].into_iter().collect(),
        };

        let merged = merge_overrides(&base, &ConfigOverrides::default());

        assert_eq!(merged, base);
    }
}
