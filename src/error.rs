use std::net::SocketAddr;
use std::time::Duration;

/// Errors surfaced by the argument renderer and the container facade.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid marshal group: {0}")]
    InvalidGroup(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("port {addr} did not become live within {timeout:?}")]
    Timeout { addr: SocketAddr, timeout: Duration },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("`docker {command}` failed (exit {code:?}): {stderr}")]
    Daemon {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot split command line: {0}")]
    Split(#[from] shell_words::ParseError),

    #[error("container {0} has no IP address")]
    NoAddress(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
