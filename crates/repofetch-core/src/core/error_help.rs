//! Human-readable hints for CLI error output

use crate::core::error::RepofetchError;

/// Suggests what the user can do about an error.
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for RepofetchError {
    fn help(&self) -> Option<String> {
        match self {
            RepofetchError::InvalidArgument(_) => Some(
                "Repositories are written as `organization.repository`, e.g. `SlimIO.is`. Owner, repository and branch must not be empty."
                    .to_string(),
            ),
            RepofetchError::Remote { status: 404, .. } => Some(
                "Check the repository name and branch (use --branch). Private repositories need GITHUB_TOKEN or --token."
                    .to_string(),
            ),
            RepofetchError::Remote { status: 401, .. }
            | RepofetchError::Remote { status: 403, .. } => Some(
                "The token was rejected or lacks access. Set GITHUB_TOKEN or pass --token."
                    .to_string(),
            ),
            RepofetchError::Extraction(_) => Some(
                "The archive may be truncated. The archive file was kept; try downloading again."
                    .to_string(),
            ),
            RepofetchError::Yaml(_) | RepofetchError::Config(_) => Some(
                "Inspect the config file with `repofetch config show` or delete it to restore defaults."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

/// Format an error followed by its hint, if any.
pub fn format_error_with_help(error: &RepofetchError) -> String {
    match error.help() {
        Some(help) => format!("Error: {}\n\nHelp: {}", error, help),
        None => format!("Error: {}", error),
    }
}
