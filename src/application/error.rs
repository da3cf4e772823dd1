use thiserror::Error;

use crate::domain::Cents;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(Cents),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Description too long ({len} chars, max {max})")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("Transaction could not be stored")]
    StoreRejected,

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
