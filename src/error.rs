use std::fmt::Display;

/// Result for the fallible internals of [`Device`](super::Device) and discovery
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Error from http client
    Reqwest(reqwest::Error),
    /// Error from std::io
    IO(std::io::Error),
    /// Connect, send or receive did not finish in time
    Timeout,
    /// Device answered with a non-success HTTP status
    Status(u16),
    /// Payload did not have the expected shape
    Parse(String),
}

impl Error {
    pub fn is_reqwest(&self) -> bool {
        matches!(self, Error::Reqwest(_))
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Error::IO(_))
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout => true,
            Error::Reqwest(e) => e.is_timeout(),
            Error::IO(e) => e.kind() == std::io::ErrorKind::TimedOut,
            _ => false,
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    pub(crate) fn parse<S: Into<String>>(msg: S) -> Error {
        Error::Parse(msg.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Reqwest(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::IO(e)
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Error {
        Error::Timeout
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reqwest(e) => write!(f, "{}", e),
            Self::IO(e) => write!(f, "{}", e),
            Self::Timeout => write!(f, "Operation timed out"),
            Self::Status(code) => write!(f, "Device answered with status {}", code),
            Self::Parse(e) => write!(f, "Malformed payload: {}", e),
        }
    }
}

impl std::error::Error for Error {}
