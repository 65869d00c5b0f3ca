use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("max level must be between 1 and {limit}, got {actual}")]
    MaxLevel { actual: usize, limit: usize },

    #[error("level up probability must be strictly between 0 and 1, got {0}")]
    Probability(f64),

    #[error("arena reservation of {actual} nodes exceeds the limit of {limit}")]
    ArenaCapacity { actual: usize, limit: usize },

    #[error("invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },
}

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("failed to open snapshot {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("snapshot I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("snapshot truncated after {records} records ({trailing} trailing bytes)")]
    Truncated { records: usize, trailing: usize },

    #[error("snapshot record {record} does not decode as the list's key/value types")]
    Corrupt { record: usize },

    #[error("key and value types are both zero width, records can't be delimited")]
    ZeroWidthRecord,
}
