use crate::core::error::{RepofetchError, RepofetchResult};
use std::path::{Path, PathBuf};

/// Environment variable overriding the repofetch home directory
pub const HOME_ENV: &str = "REPOFETCH_HOME";

/// Get the repofetch home directory
///
/// `REPOFETCH_HOME` wins when set. Otherwise:
/// - Windows: %APPDATA%\repofetch
/// - Linux: ~/.config/repofetch
/// - macOS: ~/Library/Application Support/repofetch
pub fn repofetch_home() -> RepofetchResult<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let config_dir = dirs::config_dir()
        .ok_or_else(|| RepofetchError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("repofetch"))
}

/// Get the config file path (`<home>/config.yaml`)
pub fn config_file() -> RepofetchResult<PathBuf> {
    Ok(repofetch_home()?.join("config.yaml"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> RepofetchResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
