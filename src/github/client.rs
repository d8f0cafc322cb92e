//! GitHub client: archive downloads and the contributor activity lookup

use crate::archive::{
    ArchiveExtractor, ArchiveFetcher, DownloadOptions, DownloadRequest, ExtractOptions,
    ExtractResult, FetchResult,
};
use crate::config::Config;
use crate::core::{RepofetchError, RepofetchResult};
use crate::di::traits::{ActivityProvider, ArchiveSource, ConfigProvider};
use crate::github::types::{
    ActivityLookup, ActivityQuery, Contributor, ContributorActivity, UserEvent,
};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{header, Client as HttpClient, StatusCode};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Environment variable holding the default token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// GitHub client
///
/// Owns the default token used when a call does not carry its own. The
/// token is read once from `GITHUB_TOKEN` (falling back to the config file)
/// when the client is built, and can be replaced with [`set_token`](Self::set_token).
pub struct GitHubClient {
    config: Arc<dyn ConfigProvider>,
    api_client: HttpClient,
    fetcher: ArchiveFetcher,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client from the config file
    pub fn new() -> RepofetchResult<Self> {
        Self::with_config(Config::load()?)
    }

    /// Create a client from an explicit configuration
    pub fn with_config(config: Config) -> RepofetchResult<Self> {
        Self::with_provider(Arc::new(config))
    }

    /// Create a client reading every default from `config`
    pub fn with_provider(config: Arc<dyn ConfigProvider>) -> RepofetchResult<Self> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| config.token().map(str::to_string));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(config.user_agent())
                .map_err(|e| RepofetchError::Config(format!("Invalid user agent: {}", e)))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let mut builder = HttpClient::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let api_client = builder
            .build()
            .map_err(|e| RepofetchError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let fetcher = ArchiveFetcher::new(config.as_ref())?;

        Ok(Self {
            config,
            api_client,
            fetcher,
            token,
        })
    }

    /// Show a download progress bar on stderr
    pub fn with_progress(mut self, show: bool) -> Self {
        self.fetcher = self.fetcher.with_progress(show);
        self
    }

    /// Replace the default token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// The default token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    fn resolve(&self, repository: &str, options: DownloadOptions) -> RepofetchResult<DownloadRequest> {
        DownloadRequest::resolve(
            repository,
            options,
            self.config.default_branch(),
            self.config.archive_format(),
            self.token.as_deref(),
        )
    }

    /// Download `organization.repository` as `{dest}/{repo}-{branch}.{ext}`
    pub async fn download(
        &self,
        repository: &str,
        options: DownloadOptions,
    ) -> RepofetchResult<FetchResult> {
        let request = self.resolve(repository, options)?;
        self.fetcher.fetch(&request).await
    }

    /// Download then unpack `organization.repository` into `{dest}/{repo}-{branch}`
    ///
    /// The archive is deleted afterwards unless `remove_archive` is false.
    pub async fn download_and_extract(
        &self,
        repository: &str,
        options: ExtractOptions,
    ) -> RepofetchResult<ExtractResult> {
        let request = self.resolve(repository, options.download)?;
        let fetched = self.fetcher.fetch(&request).await?;

        let extractor = ArchiveExtractor::new(request.dest.clone());
        let result = extractor
            .unpack_fetched(fetched, options.remove_archive)
            .await?;

        info!(
            location = %result.location.display(),
            entries = result.entries.len(),
            "extracted {}",
            request.repository.full_name()
        );
        Ok(result)
    }

    /// Last activity of a repository's contributors
    ///
    /// Empty arguments are rejected with `InvalidArgument`. Everything that
    /// goes wrong remotely is reported through [`ActivityLookup`], never as
    /// an `Err`.
    pub async fn contributors_last_activities(
        &self,
        query: ActivityQuery,
    ) -> RepofetchResult<ActivityLookup> {
        query.validate()?;

        let token = query.token.as_deref().or(self.token.as_deref());
        match self.lookup_activities(&query, token).await {
            Ok(activities) => Ok(ActivityLookup::Found(activities)),
            Err(e) if e.is_not_found() => {
                debug!("{} not found: {}", query.full_name(), e);
                Ok(ActivityLookup::NotFound)
            }
            Err(e) => {
                warn!("Contributor lookup for {} failed: {}", query.full_name(), e);
                Ok(ActivityLookup::Failed(e))
            }
        }
    }

    async fn lookup_activities(
        &self,
        query: &ActivityQuery,
        token: Option<&str>,
    ) -> RepofetchResult<BTreeMap<String, ContributorActivity>> {
        let logins = match &query.contributor {
            Some(login) => vec![login.clone()],
            None => self.get_contributors(query, token).await?,
        };

        let full_name = query.full_name();
        let full_name = full_name.as_str();
        let lookups = logins.into_iter().map(|login| async move {
            let url = format!(
                "{}/users/{}/events/public",
                self.api_base(),
                urlencoding::encode(&login)
            );
            let events: Vec<UserEvent> = self.api_get(&url, token).await?;
            Ok::<_, RepofetchError>((login, ContributorActivity::from_events(&events, full_name)))
        });

        join_all(lookups).await.into_iter().collect()
    }

    async fn get_contributors(
        &self,
        query: &ActivityQuery,
        token: Option<&str>,
    ) -> RepofetchResult<Vec<String>> {
        let url = format!(
            "{}/repos/{}/{}/contributors",
            self.api_base(),
            urlencoding::encode(&query.owner),
            urlencoding::encode(&query.repository)
        );

        let response = self.api_request(&url, token).await?;
        // Empty repositories answer 204 without a body
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        let contributors: Vec<Contributor> = response.json().await?;
        Ok(contributors.into_iter().map(|c| c.login).collect())
    }

    fn api_base(&self) -> &str {
        self.config.api_url().trim_end_matches('/')
    }

    /// Make an API request, turning non-success statuses into `Remote` errors
    async fn api_request(&self, url: &str, token: Option<&str>) -> RepofetchResult<reqwest::Response> {
        let mut request = self.api_client.get(url);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RepofetchError::Remote {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    /// Make an API GET request and parse JSON response
    async fn api_get<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> RepofetchResult<T> {
        let response = self.api_request(url, token).await?;
        Ok(response.json().await?)
    }
}

// Implement ArchiveSource trait
#[async_trait]
impl ArchiveSource for GitHubClient {
    async fn download(
        &self,
        repository: &str,
        options: DownloadOptions,
    ) -> RepofetchResult<FetchResult> {
        Self::download(self, repository, options).await
    }

    async fn download_and_extract(
        &self,
        repository: &str,
        options: ExtractOptions,
    ) -> RepofetchResult<ExtractResult> {
        Self::download_and_extract(self, repository, options).await
    }
}

// Implement ActivityProvider trait
#[async_trait]
impl ActivityProvider for GitHubClient {
    async fn contributors_last_activities(
        &self,
        query: ActivityQuery,
    ) -> RepofetchResult<ActivityLookup> {
        Self::contributors_last_activities(self, query).await
    }
}
