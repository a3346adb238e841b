/// CLI error types
use civiclink_client::{ClientError, View};
use civiclink_core::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Protected view requested without a session
    #[error("{0} requires a signed-in user; run `civiclink login` first")]
    LoginRequired(View),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
