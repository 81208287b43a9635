use std::path::PathBuf;

use thiserror::Error;

/// Fatal startup errors raised while compiling sprites and loading levels.
///
/// Every variant names the offending file; parse errors also carry the
/// 1-based line number.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk asset directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("{file}:{line}: {message}")]
    Parse { file: String, line: usize, message: String },

    #[error("{file}: expected 3 color lines and 8 tile rows, found {found} data lines")]
    WrongLineCount { file: String, found: usize },

    #[error("{count} sprite types exceed the palette table ({max} entries)")]
    TooManySprites { count: usize, max: usize },

    #[error("sprite '{0}' is required but was not found")]
    MissingSprite(String),

    #[error("{file}: level has no '{marker}' marker")]
    MissingMarker { file: String, marker: char },

    #[error("{file}:{line}: second '{marker}' marker")]
    DuplicateMarker { file: String, line: usize, marker: char },

    #[error("{file}: {count} {kind} exceed the {max} reserved sprite slots")]
    TooManyEntities { file: String, kind: &'static str, count: usize, max: usize },

    #[error("{file}:{line}: cell at column {column} lies outside the playfield")]
    OutOfPlayfield { file: String, line: usize, column: usize },

    #[error("no level files found")]
    NoLevels,
}

pub type AssetResult<T> = Result<T, AssetError>;

/// Errors raised while reading a `GameConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
