//! Core utilities for repofetch
//!
//! Shared by the `repofetch` library and binary:
//! - Error types and CLI error hints
//! - Repository identifiers and archive naming rules
//! - Platform paths for the configuration file

pub mod core;

pub use self::core::error::{RepofetchError, RepofetchResult};
pub use self::core::error_help::{format_error_with_help, ErrorHelp};
pub use self::core::repository::{archive_path, extracted_dir, ArchiveFormat, RepositoryRef};
