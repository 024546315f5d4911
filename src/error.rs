use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TierconfError {
    #[error("{} is not a file", path.display())]
    NotAFile { path: PathBuf },

    #[error("{} does not exist", path.display())]
    NotExist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Prefixes are escaped before compiling, so this only fires when the
    /// combined pattern exceeds the regex engine's size limit.
    #[error("Error parsing comment prefixes `{pattern}`: {source}")]
    InvalidCommentPrefix {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("File delimiter must not be empty")]
    EmptyDelimiter,

    #[error("No flag registered with name '{0}'")]
    UnknownFlag(String),

    #[error("Failed to parse TOML seed values: {source}")]
    TomlSeed {
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse JSON seed values: {source}")]
    JsonSeed {
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, TierconfError>;
