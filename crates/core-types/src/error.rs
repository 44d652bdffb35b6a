use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid time window: from ({from}) is after to ({to})")]
    InvalidWindow { from: i64, to: i64 },
}
