//! Archive acquisition and extraction
//!
//! - [`ArchiveFetcher`] streams `/{org}/{repo}/archive/{branch}.{ext}` to disk
//! - [`ArchiveExtractor`] unpacks the downloaded file next to it

pub mod extractor;
pub mod fetcher;
pub mod options;

pub use extractor::ArchiveExtractor;
pub use fetcher::ArchiveFetcher;
pub use options::{
    Credential, DownloadOptions, DownloadRequest, ExtractOptions, ExtractResult, FetchResult,
};
