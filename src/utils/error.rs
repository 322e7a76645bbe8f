//! Error handling.

use std::fmt;

use crate::backend::session::Tenant;

/// Boxed error from the network layer, kept intact for callers.
pub type TransportSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug)]
pub enum Error {
    /// A navigation could not resolve one of its views.
    Navigation { path: String, message: String },
    /// The request never produced an HTTP response.
    Transport { url: String, source: TransportSource },
    /// The backend rejected the session credentials.
    Unauthorized {
        tenant: Tenant,
        url: String,
        body: serde_json::Value,
    },
    /// Any other non-2xx response.
    Status {
        method: String,
        url: String,
        status: u16,
        body: serde_json::Value,
    },
    /// The response body did not match the expected shape.
    Decode { url: String, source: serde_json::Error },
    Storage(std::io::Error),
    Config(String),
    Message(String),
}

impl Error {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn transport(url: impl Into<String>, source: impl Into<TransportSource>) -> Self {
        Self::Transport {
            url: url.into(),
            source: source.into(),
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigation { path, message } => {
                write!(f, "Navigation to {path} failed: {message}")
            }
            Self::Transport { url, source } => write!(f, "Request to {url} failed: {source}"),
            Self::Unauthorized { tenant, url, .. } => {
                write!(f, "Unauthorized ({tenant} session) at {url}")
            }
            Self::Status {
                method,
                url,
                status,
                ..
            } => write!(f, "{method} {url} returned HTTP {status}"),
            Self::Decode { url, source } => write!(f, "Invalid response from {url}: {source}"),
            Self::Storage(err) => write!(f, "Session storage error: {err}"),
            Self::Config(message) => write!(f, "Configuration error: {message}"),
            Self::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source.as_ref()),
            Self::Decode { source, .. } => Some(source),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {err}"))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(ToString::to_string).unwrap_or_default();
        Self::transport(url, err)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Self::new(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Self::new(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! simple_error {
    ($msg:literal) => {
        $crate::utils::error::Error::new($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::utils::error::Error::new(format!($fmt, $($arg)*))
    };
}
