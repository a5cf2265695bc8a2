use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid schema JSON: {0}")]
    Schema(#[source] serde_json::Error),
    #[error("Invalid layout settings: {0}")]
    Settings(#[source] serde_json::Error),
    #[error("Stale layout result: ticket {ticket} superseded by {current}")]
    StaleLayout { ticket: u64, current: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
