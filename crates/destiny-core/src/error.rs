use std::path::PathBuf;

use thiserror::Error;

/// Errors raised outside the engine itself: loading the corpus and config.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("interpretation corpus {path}: {source}")]
    CorpusIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("interpretation corpus {path}: {source}")]
    CorpusParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
}
