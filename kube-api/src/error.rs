use std::fmt;
use kube::config::{InferConfigError, KubeconfigError};

#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    Config(String),
    Connect(String),
    NotFound(String),
    Status(String, u16),
    Empty(String),
    Other(String),
}

impl From<kube::Error> for Error {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(e) if e.code == 404 => Error::NotFound(e.message),
            kube::Error::Api(e)                  => Error::Status(e.message, e.code),
            kube::Error::HyperError(e)           => Error::Connect(e.to_string()),
            kube::Error::Service(e)              => Error::Connect(e.to_string()),
            e                                    => Error::Other(e.to_string()),
        }
    }
}

impl From<KubeconfigError> for Error {
    fn from(err: KubeconfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<InferConfigError> for Error {
    fn from(err: InferConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<std::net::AddrParseError> for Error {
    fn from(err: std::net::AddrParseError) -> Self {
        Error::Other(err.to_string())
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Error::Config(msg)         => write!(f, "invalid cluster config: {}", msg),
            Error::Connect(msg)        => write!(f, "connection failed: {}", msg),
            Error::NotFound(msg)       => write!(f, "not found: {}", msg),
            Error::Status(msg, code)   => write!(f, "api error {}: {}", code, msg),
            Error::Empty(msg)          => write!(f, "missing data: {}", msg),
            Error::Other(msg)          => write!(f, "{}", msg),
        }
    }
}
