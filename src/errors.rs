use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
    #[error("Price out of range: {0}")]
    PriceOutOfRange(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] toml::de::Error),
}
