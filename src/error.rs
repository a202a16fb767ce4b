use std::path::PathBuf;

use thiserror::Error;

/// Library error type for collage operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A photo handed out by the repository could not be read.
    #[error("failed to read photo {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}
