//! repofetch: download and extract GitHub repository archives
//!
//! This crate provides the main repofetch library, re-exporting core types
//! from `repofetch-core` and organizing the download, extraction and
//! contributor activity features.
//!
//! ```no_run
//! use repofetch::{DownloadOptions, ExtractOptions, GitHubClient};
//!
//! # async fn example() -> repofetch::RepofetchResult<()> {
//! let client = GitHubClient::new()?;
//!
//! let archive = client
//!     .download("SlimIO.Config", DownloadOptions::new().dest("/tmp"))
//!     .await?;
//! println!("{}", archive.location.display());
//!
//! let extracted = client
//!     .download_and_extract("SlimIO.Core", ExtractOptions::new(DownloadOptions::new()))
//!     .await?;
//! println!("{}", extracted.location.display());
//! # Ok(())
//! # }
//! ```

pub use repofetch_core::{format_error_with_help, ErrorHelp, RepofetchError, RepofetchResult};

/// Core module re-exported from repofetch-core.
pub mod core {
    pub use repofetch_core::core::*;
    pub use repofetch_core::*;

    /// Path module re-exported from repofetch-core.
    pub mod path {
        pub use repofetch_core::core::path::*;
    }
}

/// Archive download and extraction.
pub mod archive;

/// Configuration management.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// GitHub integration.
pub mod github;

pub use crate::archive::{Credential, DownloadOptions, ExtractOptions, ExtractResult, FetchResult};
pub use crate::core::{ArchiveFormat, RepositoryRef};
pub use crate::github::{ActivityLookup, ActivityQuery, ContributorActivity, GitHubClient};
