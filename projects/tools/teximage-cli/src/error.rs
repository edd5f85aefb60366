use std::io;
use teximage_api::TexImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    TexImage(#[from] TexImageError),
    #[error("{path}: {source}")]
    File {
        path: String,
        #[source]
        source: TexImageError,
    },
    #[error("Cannot compare images: {0}")]
    Incompatible(String),
}
