//! Service container for dependency injection

use super::traits::{ActivityProvider, ArchiveSource, ConfigProvider};
use crate::config::Config;
use crate::core::RepofetchResult;
use crate::github::GitHubClient;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the services the CLI commands run against as trait objects, so
/// tests can swap in the mocks from [`crate::di::mocks`].
///
/// # Example (Testing)
///
/// ```
/// use repofetch::di::{ServiceContainer, mocks::*};
/// use std::sync::Arc;
///
/// let archives = Arc::new(MockArchiveSource::new());
/// let activity = Arc::new(MockActivityProvider::not_found());
///
/// let container = ServiceContainer::with_providers(archives, activity);
/// # let _ = container.archive_source();
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub archive_source: Arc<dyn ArchiveSource>,
    pub activity_provider: Arc<dyn ActivityProvider>,
}

impl ServiceContainer {
    /// Create a new service container with production implementations
    ///
    /// Loads the config file (creating it if missing) and builds a single
    /// [`GitHubClient`] that serves both archives and activity lookups.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Config file cannot be loaded or created
    /// - The HTTP client cannot be built from the configuration
    pub fn new() -> RepofetchResult<Self> {
        let config = Config::load()?;
        Self::from_config(config, false)
    }

    /// Build production services from an already-loaded config.
    pub fn from_config(config: Config, show_progress: bool) -> RepofetchResult<Self> {
        Self::from_provider(Arc::new(config), show_progress)
    }

    /// Build production services whose defaults come from `config`
    pub fn from_provider(
        config: Arc<dyn ConfigProvider>,
        show_progress: bool,
    ) -> RepofetchResult<Self> {
        let client = GitHubClient::with_provider(config)?.with_progress(show_progress);
        let client = Arc::new(client);

        Ok(Self {
            archive_source: client.clone(),
            activity_provider: client,
        })
    }

    /// Create a service container with custom provider implementations
    pub fn with_providers(
        archive_source: Arc<dyn ArchiveSource>,
        activity_provider: Arc<dyn ActivityProvider>,
    ) -> Self {
        Self {
            archive_source,
            activity_provider,
        }
    }

    /// Get the archive source
    pub fn archive_source(&self) -> &dyn ArchiveSource {
        self.archive_source.as_ref()
    }

    /// Get the activity provider
    pub fn activity_provider(&self) -> &dyn ActivityProvider {
        self.activity_provider.as_ref()
    }
}
