//! Request options and results for the fetch/extract pipeline

use crate::core::{ArchiveFormat, RepofetchError, RepofetchResult, RepositoryRef};
use base64::Engine;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Credential sent in the `Authorization` header
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Personal access token, sent as `token <value>`
    Token(String),
    /// Username/password pair, sent as HTTP Basic auth
    Basic { username: String, password: String },
}

impl Credential {
    /// Render the `Authorization` header value
    pub fn header_value(&self) -> String {
        match self {
            Credential::Token(token) => format!("token {}", token),
            Credential::Basic { username, password } => {
                let encoded = base64::engine::general_purpose::STANDARD
                    .encode(format!("{}:{}", username, password));
                format!("Basic {}", encoded)
            }
        }
    }
}

// Never print secrets in logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Token(_) => f.write_str("Token(***)"),
            Credential::Basic { username, .. } => {
                write!(f, "Basic {{ username: {:?}, password: *** }}", username)
            }
        }
    }
}

/// Options for [`GitHubClient::download`](crate::github::GitHubClient::download)
///
/// Every field is optional; unset fields fall back to the client configuration
/// (`branch`, `format`), the current working directory (`dest`) and the
/// client's default token.
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    pub branch: Option<String>,
    pub dest: Option<PathBuf>,
    /// Per-call token, takes precedence over `auth`
    pub token: Option<String>,
    pub auth: Option<Credential>,
    pub format: Option<ArchiveFormat>,
}

impl DownloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn dest(mut self, dest: impl Into<PathBuf>) -> Self {
        self.dest = Some(dest.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn auth(mut self, credential: Credential) -> Self {
        self.auth = Some(credential);
        self
    }

    pub fn format(mut self, format: ArchiveFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Options for [`GitHubClient::download_and_extract`](crate::github::GitHubClient::download_and_extract)
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub download: DownloadOptions,
    /// Delete the archive once extraction succeeded (default `true`)
    pub remove_archive: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            download: DownloadOptions::default(),
            remove_archive: true,
        }
    }
}

impl ExtractOptions {
    pub fn new(download: DownloadOptions) -> Self {
        Self {
            download,
            ..Default::default()
        }
    }

    pub fn remove_archive(mut self, remove: bool) -> Self {
        self.remove_archive = remove;
        self
    }
}

/// A download with every default resolved
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub repository: RepositoryRef,
    pub branch: String,
    pub dest: PathBuf,
    pub credential: Option<Credential>,
    pub format: ArchiveFormat,
}

impl DownloadRequest {
    /// Resolve `options` against the client defaults.
    ///
    /// Credential precedence: `options.token`, then `options.auth`, then
    /// `default_token`.
    pub fn resolve(
        identifier: &str,
        options: DownloadOptions,
        default_branch: &str,
        default_format: ArchiveFormat,
        default_token: Option<&str>,
    ) -> RepofetchResult<Self> {
        let repository = RepositoryRef::parse(identifier)?;

        let branch = options
            .branch
            .unwrap_or_else(|| default_branch.to_string());
        if branch.trim().is_empty() {
            return Err(RepofetchError::InvalidArgument(
                "branch must be a non-empty string".to_string(),
            ));
        }

        let dest = match options.dest {
            Some(dest) => dest,
            None => std::env::current_dir().map_err(|e| {
                RepofetchError::Path(format!("Failed to get current directory: {}", e))
            })?,
        };

        let credential = options
            .token
            .map(Credential::Token)
            .or(options.auth)
            .or_else(|| default_token.map(|t| Credential::Token(t.to_string())));

        Ok(Self {
            repository,
            branch,
            dest,
            credential,
            format: options.format.unwrap_or(default_format),
        })
    }

    /// `{dest}/{repo}-{branch}.{ext}`
    pub fn archive_path(&self) -> PathBuf {
        crate::core::archive_path(&self.dest, &self.repository.name, &self.branch, self.format)
    }
}

/// A downloaded archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchResult {
    /// Path of the archive file
    pub location: PathBuf,
    pub organization: String,
    pub repository: String,
    pub branch: String,
    pub format: ArchiveFormat,
    pub bytes_written: u64,
    /// Hex SHA-256 of the archive, computed while streaming
    pub sha256: String,
}

/// An extracted archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractResult {
    /// Path of the extracted `{repo}-{branch}` directory
    pub location: PathBuf,
    pub organization: String,
    pub repository: String,
    pub branch: String,
    /// The archive file, when it was kept
    pub archive: Option<PathBuf>,
    /// Paths written by the unpack, relative to the destination directory
    pub entries: Vec<PathBuf>,
}
