use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected before any input is read.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write output file {}: {}", .path.display(), .source)]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
