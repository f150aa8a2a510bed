//! Command-line usage errors

use thiserror::Error;

/// Errors in how the binary was invoked.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("missing command; expected one of: {}", crate::command::COMMANDS.join(", "))]
    MissingCommand,

    #[error(
        "unknown command {cmd:?}; expected one of: {}",
        crate::command::COMMANDS.join(", "),
        cmd = .0
    )]
    UnknownCommand(String),

    #[error("invalid service id {0:?}: expected an integer")]
    InvalidServiceId(String),

    #[error("account has no NBN services to default to")]
    NoServices,
}

/// Result alias using CLI Error
pub type Result<T> = std::result::Result<T, Error>;
