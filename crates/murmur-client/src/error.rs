use murmur_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the view-state engine.
///
/// The engine itself never fails on bad input; the only faults it passes on
/// come from the read-state storage behind it.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Read-state storage error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
