use crate::error::StorageError;

pub mod config;
pub mod history;

pub type Result<T> = std::result::Result<T, StorageError>;
