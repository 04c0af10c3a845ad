use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("filename required")]
    MissingFilename,
    #[error("invalid filename")]
    InvalidFilename(String),
    #[error("unknown file")]
    UnknownFile(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
