//! Dependency injection infrastructure for repofetch
//!
//! The CLI commands run against the traits in [`traits`], so they can be
//! exercised against the in-memory implementations in [`mocks`].
//!
//! # Example (Production)
//! ```no_run
//! use repofetch::di::ServiceContainer;
//!
//! # fn example() -> repofetch::core::RepofetchResult<()> {
//! let container = ServiceContainer::new()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example (Testing)
//! ```
//! use repofetch::di::{ServiceContainer, mocks::*};
//! use std::sync::Arc;
//!
//! # fn example() {
//! let archives = Arc::new(MockArchiveSource::new());
//! let activity = Arc::new(MockActivityProvider::not_found());
//!
//! let container = ServiceContainer::with_providers(archives, activity);
//! # }
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{ActivityProvider, ArchiveSource, ConfigProvider};
