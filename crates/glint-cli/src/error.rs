//! Error type for the `glint` CLI binary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse template data as JSON: {0}")]
    Data(#[from] serde_json::Error),

    #[error("{0}")]
    Template(#[from] glint::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
