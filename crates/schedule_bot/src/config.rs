use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bot_logging::LogDestination;
use schedule_engine::{EngineConfig, FetchSettings, DEFAULT_SCHEDULE_URL};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "schedule_bot.ron";
pub const CONFIG_PATH_ENV: &str = "SCHEDULE_BOT_CONFIG";
pub const TOKEN_ENV: &str = "BOT_TOKEN";
pub const GROUP_ENV: &str = "GROUP_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("bot token is not set: put `bot_token` in schedule_bot.ron or export BOT_TOKEN")]
    MissingToken,
    #[error("group id is not set: put `group_id` in schedule_bot.ron or export GROUP_ID")]
    MissingGroup,
}

/// Bot settings, read from a RON file. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub bot_token: String,
    pub group_id: String,
    pub schedule_url: String,
    pub telegram_api_url: String,
    pub cache_path: PathBuf,
    pub debug_copy_path: Option<PathBuf>,
    pub poll_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub log_level: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for BotConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            bot_token: String::new(),
            group_id: String::new(),
            schedule_url: DEFAULT_SCHEDULE_URL.to_string(),
            telegram_api_url: "https://api.telegram.org".to_string(),
            cache_path: PathBuf::from("templeraspisan.html"),
            debug_copy_path: Some(PathBuf::from("server_response.html")),
            poll_timeout_secs: 30,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            log_level: "info".to_string(),
            log_destination: LogDestination::Terminal,
            log_file: PathBuf::from("schedule_bot.log"),
        }
    }
}

impl BotConfig {
    /// Load the config file at `path`. `None` means there is no file; the
    /// caller falls back to the defaults and environment variables.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Apply `BOT_TOKEN` and `GROUP_ID` from `lookup` over the file values.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup(TOKEN_ENV).filter(|value| !value.trim().is_empty()) {
            self.bot_token = token.trim().to_string();
        }
        if let Some(group) = lookup(GROUP_ENV).filter(|value| !value.trim().is_empty()) {
            self.group_id = group.trim().to_string();
        }
        self
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.bot_token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if self.group_id.trim().is_empty() {
            return Err(ConfigError::MissingGroup);
        }
        Ok(self)
    }

    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default_with_cache(&self.group_id, self.cache_path.clone());
        config.schedule_url = self.schedule_url.clone();
        config.debug_copy_path = self.debug_copy_path.clone();
        config.fetch = FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        };
        config
    }
}

/// Config location: first CLI argument, then `SCHEDULE_BOT_CONFIG`, then
/// `schedule_bot.ron` in the working directory.
pub fn config_path(mut args: impl Iterator<Item = String>, env_value: Option<String>) -> PathBuf {
    args.next()
        .or(env_value)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(bot_token: "123:abc", group_id: "2471", log_level: "debug", debug_copy_path: None)"#
        )
        .unwrap();

        let config = BotConfig::load(file.path()).unwrap().expect("file exists");
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.group_id, "2471");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.debug_copy_path, None);
        assert_eq!(config.cache_path, PathBuf::from("templeraspisan.html"));
        assert_eq!(config.schedule_url, DEFAULT_SCHEDULE_URL);
        assert_eq!(config.log_destination, LogDestination::Terminal);
    }

    #[test]
    fn shipped_example_parses_to_the_defaults() {
        let example: BotConfig =
            ron::from_str(include_str!("../../../schedule_bot.example.ron")).unwrap();
        assert_eq!(example, BotConfig::default());
    }

    #[test]
    fn missing_file_is_reported_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = BotConfig::load(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(loaded, None);
        assert_eq!(loaded.unwrap_or_default(), BotConfig::default());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "(bot_token: 42").unwrap();
        assert!(matches!(
            BotConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn environment_overrides_file_values() {
        let config = BotConfig {
            bot_token: "from-file".to_string(),
            group_id: "1".to_string(),
            ..BotConfig::default()
        }
        .with_env_overrides(|key| match key {
            TOKEN_ENV => Some(" from-env ".to_string()),
            GROUP_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.bot_token, "from-env");
        assert_eq!(config.group_id, "1");
    }

    #[test]
    fn token_and_group_are_required() {
        let config = BotConfig::default().with_env_overrides(no_env);
        assert!(matches!(config.validate(), Err(ConfigError::MissingToken)));

        let config = BotConfig {
            bot_token: "t".to_string(),
            ..BotConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MissingGroup)));
    }

    #[test]
    fn engine_config_carries_fetch_limits() {
        let config = BotConfig {
            group_id: "2471".to_string(),
            request_timeout_secs: 7,
            max_bytes: 1024,
            ..BotConfig::default()
        };
        let engine = config.engine_config();
        assert_eq!(engine.group_id, "2471");
        assert_eq!(engine.fetch.request_timeout, Duration::from_secs(7));
        assert_eq!(engine.fetch.max_bytes, 1024);
        assert_eq!(engine.debug_copy_path, Some(PathBuf::from("server_response.html")));
    }

    #[test]
    fn config_path_prefers_argument_then_environment() {
        let arg = vec!["custom.ron".to_string()].into_iter();
        assert_eq!(
            config_path(arg, Some("env.ron".to_string())),
            PathBuf::from("custom.ron")
        );
        assert_eq!(
            config_path(std::iter::empty(), Some("env.ron".to_string())),
            PathBuf::from("env.ron")
        );
        assert_eq!(
            config_path(std::iter::empty(), None),
            PathBuf::from(DEFAULT_CONFIG_FILE)
        );
    }
}
