//! GitHub API type definitions

use crate::core::RepofetchError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entry of `GET /repos/{owner}/{repo}/contributors`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    #[serde(default)]
    pub contributions: u64,
}

/// Entry of `GET /users/{login}/events/public`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEvent {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
}

/// Repository an event happened in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRepo {
    /// `owner/repo`
    pub name: String,
}

/// Last activity timestamps of one contributor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorActivity {
    /// Newest public event, anywhere on GitHub
    pub last_activity: Option<DateTime<Utc>>,
    /// Newest public event in the queried repository
    pub last_repository_activity: Option<DateTime<Utc>>,
}

impl ContributorActivity {
    /// Fold a user's public events into activity timestamps for `full_name`.
    pub fn from_events(events: &[UserEvent], full_name: &str) -> Self {
        let last_activity = events.iter().map(|e| e.created_at).max();
        let last_repository_activity = events
            .iter()
            .filter(|e| e.repo.name.eq_ignore_ascii_case(full_name))
            .map(|e| e.created_at)
            .max();

        Self {
            last_activity,
            last_repository_activity,
        }
    }
}

/// Parameters of the contributor activity lookup
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    pub owner: String,
    pub repository: String,
    /// Only look up this login instead of every contributor
    pub contributor: Option<String>,
    /// Per-call token, overrides the client default
    pub token: Option<String>,
}

impl ActivityQuery {
    pub fn new(owner: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            ..Default::default()
        }
    }

    pub fn contributor(mut self, login: impl Into<String>) -> Self {
        self.contributor = Some(login.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Reject empty owner/repository/contributor before any request.
    pub fn validate(&self) -> Result<(), RepofetchError> {
        let fields = [
            ("owner", Some(self.owner.as_str())),
            ("repository", Some(self.repository.as_str())),
            ("contributor", self.contributor.as_deref()),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(RepofetchError::InvalidArgument(format!(
                        "{} must be a non-empty string, but got `{}`",
                        name, value
                    )));
                }
            }
        }
        Ok(())
    }

    /// `owner/repository`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repository)
    }
}

/// Outcome of the contributor activity lookup
///
/// The lookup is forgiving: remote failures never surface as `Err`, but the
/// reason is kept here instead of being collapsed into "nothing found".
#[derive(Debug)]
pub enum ActivityLookup {
    /// Activity per contributor login
    Found(BTreeMap<String, ContributorActivity>),
    /// The owner or repository does not exist (or is not visible)
    NotFound,
    /// Transport, API or decoding failure
    Failed(RepofetchError),
}

impl ActivityLookup {
    /// Collapse to the forgiving contract: `None` unless activity was found.
    pub fn into_option(self) -> Option<BTreeMap<String, ContributorActivity>> {
        match self {
            ActivityLookup::Found(map) => Some(map),
            ActivityLookup::NotFound | ActivityLookup::Failed(_) => None,
        }
    }
}
