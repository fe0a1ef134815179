use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// Non-positive density, page capacity, or width budget. Raised when the
    /// offending value is constructed, never in the middle of a build.
    Config(String),
    /// Undecodable source image or zero-sized dimensions. Fatal to the
    /// enclosing section only; sections already built remain valid.
    InvalidImage(String),
    /// The codec failed to persist or reload a band. Aborts the remaining
    /// bands of the current section; bands already emitted stay valid.
    Resource(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Config(msg) => write!(f, "configuration error: {msg}"),
            Error::InvalidImage(msg) => write!(f, "invalid image: {msg}"),
            Error::Resource(msg) => write!(f, "resource error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
