//! Mock implementations of service traits for testing

use super::traits::{ActivityProvider, ArchiveSource, ConfigProvider};
use crate::archive::{
    ArchiveExtractor, DownloadOptions, DownloadRequest, ExtractOptions, ExtractResult,
    FetchResult,
};
use crate::core::{ArchiveFormat, RepofetchError, RepofetchResult};
use crate::github::{ActivityLookup, ActivityQuery, ContributorActivity};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use repofetch::di::mocks::MockConfigProvider;
/// use repofetch::di::ConfigProvider;
///
/// let mut config = MockConfigProvider::default();
/// config.default_branch = "master".to_string();
///
/// assert_eq!(config.default_branch(), "master");
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub github_url: String,
    pub api_url: String,
    pub default_branch: String,
    pub archive_format: ArchiveFormat,
    pub user_agent: String,
    pub max_redirects: usize,
    pub timeout: Option<Duration>,
    pub token: Option<String>,
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self {
            github_url: "https://github.com".to_string(),
            api_url: "https://api.github.com".to_string(),
            default_branch: "main".to_string(),
            archive_format: ArchiveFormat::TarGz,
            user_agent: "repofetch-test".to_string(),
            max_redirects: 1,
            timeout: None,
            token: None,
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn github_url(&self) -> &str {
        &self.github_url
    }

    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn default_branch(&self) -> &str {
        &self.default_branch
    }

    fn archive_format(&self) -> ArchiveFormat {
        self.archive_format
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Mock archive source serving in-memory archives
///
/// Archives are registered per `organization.repository` identifier and
/// written to the same `{dest}/{repo}-{branch}.{ext}` path a real download
/// would use. Unknown repositories answer like a GitHub 404.
#[derive(Clone, Default)]
pub struct MockArchiveSource {
    pub archives: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    /// Every resolved request, in call order
    pub requests: Arc<Mutex<Vec<DownloadRequest>>>,
}

impl MockArchiveSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_archive(&self, identifier: impl Into<String>, bytes: Vec<u8>) {
        if let Ok(mut archives) = self.archives.lock() {
            archives.insert(identifier.into(), bytes);
        }
    }

    pub fn requests(&self) -> Vec<DownloadRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn serve(&self, request: &DownloadRequest) -> RepofetchResult<FetchResult> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let bytes = self
            .archives
            .lock()
            .map_err(|_| RepofetchError::Config("mock archive store poisoned".to_string()))?
            .get(&request.repository.to_string())
            .cloned()
            .ok_or_else(|| RepofetchError::Remote {
                status: 404,
                message: "Not Found".to_string(),
                url: format!("mock://{}", request.repository.full_name()),
            })?;

        std::fs::create_dir_all(&request.dest)?;
        let location = request.archive_path();
        std::fs::write(&location, &bytes)?;

        Ok(FetchResult {
            location,
            organization: request.repository.organization.clone(),
            repository: request.repository.name.clone(),
            branch: request.branch.clone(),
            format: request.format,
            bytes_written: bytes.len() as u64,
            sha256: hex::encode(Sha256::digest(&bytes)),
        })
    }
}

#[async_trait]
impl ArchiveSource for MockArchiveSource {
    async fn download(
        &self,
        repository: &str,
        options: DownloadOptions,
    ) -> RepofetchResult<FetchResult> {
        let request =
            DownloadRequest::resolve(repository, options, "main", ArchiveFormat::TarGz, None)?;
        self.serve(&request)
    }

    async fn download_and_extract(
        &self,
        repository: &str,
        options: ExtractOptions,
    ) -> RepofetchResult<ExtractResult> {
        let request = DownloadRequest::resolve(
            repository,
            options.download,
            "main",
            ArchiveFormat::TarGz,
            None,
        )?;
        let fetched = self.serve(&request)?;

        ArchiveExtractor::new(request.dest.clone())
            .unpack_fetched(fetched, options.remove_archive)
            .await
    }
}

/// Mock activity provider returning a canned answer
#[derive(Clone, Default)]
pub struct MockActivityProvider {
    /// `None` answers [`ActivityLookup::NotFound`]
    pub activities: Option<BTreeMap<String, ContributorActivity>>,
    pub queries: Arc<Mutex<Vec<ActivityQuery>>>,
}

impl MockActivityProvider {
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn with_activities(activities: BTreeMap<String, ContributorActivity>) -> Self {
        Self {
            activities: Some(activities),
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<ActivityQuery> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ActivityProvider for MockActivityProvider {
    async fn contributors_last_activities(
        &self,
        query: ActivityQuery,
    ) -> RepofetchResult<ActivityLookup> {
        query.validate()?;
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }

        Ok(match &self.activities {
            Some(activities) => {
                let mut activities = activities.clone();
                if let Some(login) = &query.contributor {
                    activities.retain(|k, _| k == login);
                }
                ActivityLookup::Found(activities)
            }
            None => ActivityLookup::NotFound,
        })
    }
}
