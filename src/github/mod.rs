//! GitHub integration
//!
//! - Download repository archives from `{github_url}/{org}/{repo}/archive/{branch}.{ext}`
//! - Look up the last public activity of a repository's contributors

pub mod client;
pub mod types;

pub use client::GitHubClient;
pub use types::{
    ActivityLookup, ActivityQuery, Contributor, ContributorActivity, EventRepo, UserEvent,
};
