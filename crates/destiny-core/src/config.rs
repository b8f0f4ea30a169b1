//! Application configuration.
//!
//! | Source | Example |
//! |--------|---------|
//! | defaults | `storage_path = "./data"` |
//! | file: `DESTINY_CONFIG` path, else `config/destiny.toml` | `history_limit = 20` |
//! | environment, prefix `DESTINY__` | `DESTINY__STORAGE_PATH=/var/lib/destiny` |

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::calculator::MatrixCalculator;
use crate::error::CoreError;
use crate::interpretations::InterpretationCorpus;

const DEFAULT_CONFIG_PATH: &str = "config/destiny.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Shown in report headers and CLI banners.
    pub app_name: String,
    /// Base directory for the ledger database.
    pub storage_path: String,
    /// Optional TOML interpretation corpus; the built-in one is used when unset.
    #[serde(default)]
    pub interpretations_path: Option<String>,
    /// How many calculations `history` shows.
    pub history_limit: usize,
    /// Interpretation excerpt length (characters) in text reports.
    pub excerpt_chars: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            app_name: "Destiny Matrix".to_string(),
            storage_path: "./data".to_string(),
            interpretations_path: None,
            history_limit: 10,
            excerpt_chars: 200,
        }
    }
}

impl CoreConfig {
    /// Load from defaults, the config file and `DESTINY__*` variables, in that precedence.
    pub fn load() -> Result<Self, CoreError> {
        let path =
            std::env::var("DESTINY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Same as [`CoreConfig::load`] with an explicit file path; a missing file is skipped.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("storage_path", defaults.storage_path)?
            .set_default("history_limit", defaults.history_limit as i64)?
            .set_default("excerpt_chars", defaults.excerpt_chars as i64)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("DESTINY").separator("__"))
            .build()?;

        let cfg: Self = built.try_deserialize()?;
        tracing::debug!(
            storage_path = %cfg.storage_path,
            corpus = cfg.interpretations_path.as_deref().unwrap_or("builtin"),
            "configuration loaded"
        );
        Ok(cfg)
    }

    /// `<storage_path>/destiny/ledger.sqlite`
    pub fn ledger_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_path)
            .join("destiny")
            .join("ledger.sqlite")
    }

    /// Corpus named by `interpretations_path`, else the built-in one.
    pub fn corpus(&self) -> Result<InterpretationCorpus, CoreError> {
        match self.interpretations_path.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => InterpretationCorpus::from_toml_file(p),
            _ => Ok(InterpretationCorpus::builtin().clone()),
        }
    }

    /// Calculator wired to the configured corpus.
    pub fn calculator(&self) -> Result<MatrixCalculator, CoreError> {
        Ok(MatrixCalculator::with_corpus(Arc::new(self.corpus()?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_path_under_storage() {
        let cfg = CoreConfig {
            storage_path: "/tmp/x".to_string(),
            ..CoreConfig::default()
        };
        assert_eq!(cfg.ledger_path(), PathBuf::from("/tmp/x/destiny/ledger.sqlite"));
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("destiny.toml");
        std::fs::write(&path, "history_limit = 3\napp_name = \"Matrix\"\n").unwrap();
        let cfg = CoreConfig::load_from(&path).unwrap();
        assert_eq!(cfg.history_limit, 3);
        assert_eq!(cfg.app_name, "Matrix");
        assert_eq!(cfg.excerpt_chars, 200);
        assert_eq!(cfg.interpretations_path, None);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = CoreConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.history_limit, CoreConfig::default().history_limit);
        assert_eq!(cfg.storage_path, CoreConfig::default().storage_path);
    }

    #[test]
    fn blank_corpus_path_means_builtin() {
        let cfg = CoreConfig {
            interpretations_path: Some("  ".to_string()),
            ..CoreConfig::default()
        };
        assert_eq!(&cfg.corpus().unwrap(), InterpretationCorpus::builtin());
    }

    #[test]
    fn unreadable_corpus_is_an_error() {
        let cfg = CoreConfig {
            interpretations_path: Some("/definitely/not/here.toml".to_string()),
            ..CoreConfig::default()
        };
        assert!(matches!(cfg.corpus(), Err(CoreError::CorpusIo { .. })));
    }
}
