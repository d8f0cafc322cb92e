//! Repository identifiers and archive naming
//!
//! GitHub serves `/{org}/{repo}/archive/{branch}.tar.gz` and packs the tree
//! under a single `{repo}-{branch}/` folder. Both the downloaded file and the
//! extracted folder are named after that convention.

use crate::core::error::{RepofetchError, RepofetchResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A remote repository, written `organization.repository`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    pub organization: String,
    pub name: String,
}

impl RepositoryRef {
    /// Parse an `organization.repository` identifier.
    ///
    /// Splits on the first `.` only, so `NodeSecure.vuln.js` names the
    /// `vuln.js` repository.
    pub fn parse(identifier: &str) -> RepofetchResult<Self> {
        let invalid = || {
            RepofetchError::InvalidArgument(format!(
                "repository must be a string of the form `organization.repository`, but got `{}`",
                identifier
            ))
        };

        let (organization, name) = identifier.split_once('.').ok_or_else(invalid)?;
        let (organization, name) = (organization.trim(), name.trim());
        if organization.is_empty() || name.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            organization: organization.to_string(),
            name: name.to_string(),
        })
    }

    /// `organization/name`, as used in GitHub URLs and API payloads
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.organization, self.name)
    }
}

impl FromStr for RepositoryRef {
    type Err = RepofetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.organization, self.name)
    }
}

/// Archive flavour served by GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArchiveFormat {
    #[default]
    #[serde(rename = "tar.gz")]
    TarGz,
    #[serde(rename = "zip")]
    Zip,
}

impl ArchiveFormat {
    /// File extension, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::Zip => "zip",
        }
    }

    /// Guess the format from a file name
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveFormat::TarGz)
        } else if name.ends_with(".zip") {
            Some(ArchiveFormat::Zip)
        } else {
            None
        }
    }
}

impl FromStr for ArchiveFormat {
    type Err = RepofetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "tar.gz" | "tgz" | "tarball" => Ok(ArchiveFormat::TarGz),
            "zip" | "zipball" => Ok(ArchiveFormat::Zip),
            other => Err(RepofetchError::InvalidArgument(format!(
                "unsupported archive format `{}` (expected tar.gz or zip)",
                other
            ))),
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Folder name GitHub uses inside the archive: `{repo}-{branch}`.
///
/// Slashes in the branch become dashes (`feature/x` -> `repo-feature-x`).
pub fn archive_stem(repository: &str, branch: &str) -> String {
    format!("{}-{}", repository, branch.replace('/', "-"))
}

/// `{dest}/{repo}-{branch}.{ext}`
pub fn archive_path(dest: &Path, repository: &str, branch: &str, format: ArchiveFormat) -> PathBuf {
    dest.join(format!(
        "{}.{}",
        archive_stem(repository, branch),
        format.extension()
    ))
}

/// `{dest}/{repo}-{branch}`
pub fn extracted_dir(dest: &Path, repository: &str, branch: &str) -> PathBuf {
    dest.join(archive_stem(repository, branch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifier() {
        let repo = RepositoryRef::parse("SlimIO.Config").unwrap();
        assert_eq!(repo.organization, "SlimIO");
        assert_eq!(repo.name, "Config");
        assert_eq!(repo.full_name(), "SlimIO/Config");
        assert_eq!(repo.to_string(), "SlimIO.Config");
    }

    #[test]
    fn test_parse_splits_on_first_dot() {
        let repo: RepositoryRef = "NodeSecure.vuln.js".parse().unwrap();
        assert_eq!(repo.organization, "NodeSecure");
        assert_eq!(repo.name, "vuln.js");
    }

    #[test]
    fn test_parse_rejects_malformed_identifiers() {
        for input in ["", "SlimIO", ".Config", "SlimIO.", "  .  "] {
            match RepositoryRef::parse(input) {
                Err(RepofetchError::InvalidArgument(msg)) => {
                    assert!(msg.contains("repository must be a string"), "{}", msg);
                }
                other => panic!("expected InvalidArgument for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_archive_naming() {
        let dest = Path::new("/tmp/out");
        assert_eq!(
            archive_path(dest, "Config", "master", ArchiveFormat::TarGz),
            PathBuf::from("/tmp/out/Config-master.tar.gz")
        );
        assert_eq!(
            archive_path(dest, "Config", "master", ArchiveFormat::Zip),
            PathBuf::from("/tmp/out/Config-master.zip")
        );
        assert_eq!(
            extracted_dir(dest, "Safe-emitter", "master"),
            PathBuf::from("/tmp/out/Safe-emitter-master")
        );
    }

    #[test]
    fn test_branch_with_slash() {
        assert_eq!(archive_stem("is", "feature/x"), "is-feature-x");
    }

    #[test]
    fn test_archive_format_parsing() {
        assert_eq!("tar.gz".parse::<ArchiveFormat>().unwrap(), ArchiveFormat::TarGz);
        assert_eq!(".tgz".parse::<ArchiveFormat>().unwrap(), ArchiveFormat::TarGz);
        assert_eq!("ZIP".parse::<ArchiveFormat>().unwrap(), ArchiveFormat::Zip);
        assert!("rar".parse::<ArchiveFormat>().is_err());
        assert_eq!(ArchiveFormat::default(), ArchiveFormat::TarGz);
    }

    #[test]
    fn test_archive_format_from_path() {
        assert_eq!(
            ArchiveFormat::from_path(Path::new("/x/is-master.tar.gz")),
            Some(ArchiveFormat::TarGz)
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("is-master.zip")),
            Some(ArchiveFormat::Zip)
        );
        assert_eq!(ArchiveFormat::from_path(Path::new("is-master")), None);
    }

    #[test]
    fn test_archive_format_serde() {
        let yaml = serde_yaml::to_string(&ArchiveFormat::TarGz).unwrap();
        assert_eq!(yaml.trim(), "tar.gz");
        let parsed: ArchiveFormat = serde_yaml::from_str("zip").unwrap();
        assert_eq!(parsed, ArchiveFormat::Zip);
    }
}
