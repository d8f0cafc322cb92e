//! Trait definitions for dependency injection

use crate::archive::{DownloadOptions, ExtractOptions, ExtractResult, FetchResult};
use crate::core::{ArchiveFormat, RepofetchResult};
use crate::github::{ActivityLookup, ActivityQuery};
use async_trait::async_trait;
use std::time::Duration;

/// Trait for configuration access
///
/// Provides read-only access to application configuration.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Host serving repository archives
    fn github_url(&self) -> &str;

    /// GitHub REST API base URL
    fn api_url(&self) -> &str;

    /// Branch used when a download does not name one
    fn default_branch(&self) -> &str;

    /// Archive flavour used when a download does not name one
    fn archive_format(&self) -> ArchiveFormat;

    /// `User-Agent` header value
    fn user_agent(&self) -> &str;

    /// Maximum redirects followed for archive downloads
    fn max_redirects(&self) -> usize;

    /// Connect/read timeout (optional)
    fn timeout(&self) -> Option<Duration>;

    /// Token from the config file (optional)
    fn token(&self) -> Option<&str>;
}

/// Trait for downloading (and extracting) repository archives
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Download `organization.repository` into the destination directory
    async fn download(&self, repository: &str, options: DownloadOptions)
        -> RepofetchResult<FetchResult>;

    /// Download then unpack `organization.repository`
    async fn download_and_extract(
        &self,
        repository: &str,
        options: ExtractOptions,
    ) -> RepofetchResult<ExtractResult>;
}

/// Trait for the contributor activity lookup
#[async_trait]
pub trait ActivityProvider: Send + Sync {
    /// Last activity timestamps of a repository's contributors
    async fn contributors_last_activities(
        &self,
        query: ActivityQuery,
    ) -> RepofetchResult<ActivityLookup>;
}
