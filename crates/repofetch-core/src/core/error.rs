use thiserror::Error;

pub type RepofetchResult<T> = Result<T, RepofetchError>;

#[derive(Error, Debug)]
pub enum RepofetchError {
    /// A caller-supplied argument was rejected before any I/O happened.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The remote host answered with a non-success status code.
    #[error("Remote error: HTTP {status} {message} ({url})")]
    Remote {
        status: u16,
        message: String,
        url: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or truncated archive, or an entry that cannot be unpacked.
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RepofetchError {
    /// Status code of a `Remote` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            RepofetchError::Remote { status, .. } => Some(*status),
            RepofetchError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the remote reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
