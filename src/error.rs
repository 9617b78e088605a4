use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unparseable probe output: {0:?}")]
    ProbeOutput(String),

    #[error("No curl found!")]
    CurlMissing(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MirrorError>;
