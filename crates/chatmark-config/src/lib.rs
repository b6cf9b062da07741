use chatmark_engine::{MentionKind, MentionResolver, ParserOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pretty-print JSON output.
    pub pretty: bool,
    pub parser: ParserSection,
    pub mentions: MentionDirectory,
}

/// `[parser]` table, mirrors [`ParserOptions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSection {
    pub max_nesting: usize,
    pub linkify: bool,
}

impl Default for ParserSection {
    fn default() -> Self {
        let options = ParserOptions::default();
        Self {
            max_nesting: options.max_nesting,
            linkify: options.linkify,
        }
    }
}

/// Display names for user, role and channel ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MentionDirectory {
    pub users: BTreeMap<String, String>,
    pub roles: BTreeMap<String, String>,
    pub channels: BTreeMap<String, String>,
}

impl MentionDirectory {
    pub fn lookup(&self, kind: MentionKind, id: &str) -> Option<&str> {
        let names = match kind {
            MentionKind::User => &self.users,
            MentionKind::Role => &self.roles,
            MentionKind::Channel => &self.channels,
            MentionKind::Everyone | MentionKind::Here => return None,
        };
        names.get(id).map(String::as_str)
    }
}

impl MentionResolver for MentionDirectory {
    fn resolve(&self, kind: MentionKind, id: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.lookup(kind, id).map(|name| json!({ "name": name })))
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/chatmark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expands `~` and environment variables in a user-supplied path.
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            max_nesting: self.parser.max_nesting,
            linkify: self.parser.linkify,
        }
    }
}
