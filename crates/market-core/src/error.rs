//! Error types for the reward optimization engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid market configuration: {0}")]
    InvalidMarket(String),

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
