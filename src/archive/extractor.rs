//! Unpacks downloaded tar.gz and zip archives next to them

use crate::archive::options::{ExtractResult, FetchResult};
use crate::core::path::ensure_dir;
use crate::core::{extracted_dir, ArchiveFormat, RepofetchError, RepofetchResult};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Component, Path, PathBuf};
use tar::Archive;
use tracing::{debug, warn};

/// File type bits of a unix mode
const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

/// Unpacks downloaded archives (tar.gz, zip) into a destination directory
///
/// Entries are unpacked into a hidden staging directory inside `dest_dir`
/// first, then moved into place. A top-level folder that does not exist yet
/// appears with a single rename; an existing one is merged into, with
/// archive files overwriting files already on disk.
#[derive(Debug, Clone)]
pub struct ArchiveExtractor {
    dest_dir: PathBuf,
}

impl ArchiveExtractor {
    /// Create a new ArchiveExtractor
    pub fn new(dest_dir: PathBuf) -> Self {
        Self { dest_dir }
    }

    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    /// Extract an archive file.
    ///
    /// Returns every path written, relative to the destination directory.
    /// The archive itself is never touched.
    pub fn extract(&self, archive_path: &Path, format: ArchiveFormat) -> RepofetchResult<Vec<PathBuf>> {
        ensure_dir(&self.dest_dir)?;

        let staging = tempfile::Builder::new()
            .prefix(".repofetch-")
            .tempdir_in(&self.dest_dir)?;
        debug!(
            archive = %archive_path.display(),
            staging = %staging.path().display(),
            "unpacking {} archive",
            format
        );

        let entries = match format {
            ArchiveFormat::TarGz => Self::unpack_targz(archive_path, staging.path())?,
            ArchiveFormat::Zip => Self::unpack_zip(archive_path, staging.path())?,
        };

        for entry in fs::read_dir(staging.path())? {
            let entry = entry?;
            move_into_place(&entry.path(), &self.dest_dir.join(entry.file_name()))?;
        }

        if let Err(e) = staging.close() {
            warn!("Failed to remove staging directory: {}", e);
        }

        Ok(entries)
    }

    /// [`extract`](Self::extract) on the blocking thread pool
    pub async fn extract_async(
        &self,
        archive_path: &Path,
        format: ArchiveFormat,
    ) -> RepofetchResult<Vec<PathBuf>> {
        let extractor = self.clone();
        let archive_path = archive_path.to_path_buf();
        tokio::task::spawn_blocking(move || extractor.extract(&archive_path, format))
            .await
            .map_err(|e| RepofetchError::Extraction(format!("Extraction task failed: {}", e)))?
    }

    /// Unpack a downloaded archive, then delete it when `remove_archive` is set.
    ///
    /// The archive is only removed after every entry was written; a failed
    /// extraction always leaves it on disk. Failing to delete it is an error.
    pub async fn unpack_fetched(
        &self,
        fetched: FetchResult,
        remove_archive: bool,
    ) -> RepofetchResult<ExtractResult> {
        let entries = self.extract_async(&fetched.location, fetched.format).await?;

        let archive = if remove_archive {
            tokio::fs::remove_file(&fetched.location).await?;
            debug!(archive = %fetched.location.display(), "removed archive");
            None
        } else {
            Some(fetched.location)
        };

        Ok(ExtractResult {
            location: extracted_dir(&self.dest_dir, &fetched.repository, &fetched.branch),
            organization: fetched.organization,
            repository: fetched.repository,
            branch: fetched.branch,
            archive,
            entries,
        })
    }

    fn unpack_targz(archive_path: &Path, staging: &Path) -> RepofetchResult<Vec<PathBuf>> {
        let file = File::open(archive_path)?;
        let decoder = GzDecoder::new(BufReader::new(file));
        let mut archive = Archive::new(decoder);

        let mut written = Vec::new();
        for entry in archive.entries().map_err(invalid_archive)? {
            let mut entry = entry.map_err(invalid_archive)?;

            // GitHub tarballs start with a pax header carrying the commit id
            if entry.header().entry_type().is_pax_global_extensions() {
                continue;
            }

            let path = entry.path().map_err(invalid_archive)?.into_owned();
            if !entry.unpack_in(staging).map_err(unpack_error)? {
                return Err(RepofetchError::Extraction(format!(
                    "Entry escapes the destination directory: {}",
                    path.display()
                )));
            }
            written.push(path);
        }

        Ok(written)
    }

    fn unpack_zip(archive_path: &Path, staging: &Path) -> RepofetchResult<Vec<PathBuf>> {
        use zip::ZipArchive;

        let file = File::open(archive_path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))
            .map_err(|e| RepofetchError::Extraction(format!("Invalid zip: {}", e)))?;

        let mut written = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|e| RepofetchError::Extraction(format!("Invalid zip entry: {}", e)))?;

            let relative = entry.enclosed_name().map(Path::to_path_buf).ok_or_else(|| {
                RepofetchError::Extraction(format!(
                    "Entry escapes the destination directory: {}",
                    entry.name()
                ))
            })?;
            let out_path = staging.join(&relative);
            let mode = entry.unix_mode();

            if mode.is_some_and(|m| m & S_IFMT == S_IFLNK) {
                // Zipballs store the link target as the entry data
                let mut target = String::new();
                entry.read_to_string(&mut target).map_err(invalid_archive)?;
                if !link_stays_inside(&relative, &target) {
                    return Err(RepofetchError::Extraction(format!(
                        "Link escapes the destination directory: {} -> {}",
                        entry.name(),
                        target
                    )));
                }
                if let Some(parent) = out_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                create_symlink(&target, &out_path)?;
                written.push(relative);
                continue;
            }

            if entry.is_dir() {
                fs::create_dir_all(&out_path)?;
            } else {
                if let Some(parent) = out_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut out = File::create(&out_path)?;
                copy_entry(&mut entry, &mut out)?;
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = mode {
                    fs::set_permissions(&out_path, fs::Permissions::from_mode(mode & 0o7777))?;
                }
            }

            written.push(relative);
        }

        Ok(written)
    }
}

fn invalid_archive(e: io::Error) -> RepofetchError {
    RepofetchError::Extraction(format!("Corrupt or truncated archive: {}", e))
}

/// `unpack_in` both decodes the archive and writes to disk. Decode failures
/// are `Extraction`; local filesystem failures stay `Io`.
fn unpack_error(e: io::Error) -> RepofetchError {
    match e.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof => {
            invalid_archive(e)
        }
        _ => RepofetchError::Io(e),
    }
}

/// Copy one archive entry, keeping read (decode) and write errors apart.
fn copy_entry(reader: &mut impl Read, out: &mut impl Write) -> RepofetchResult<u64> {
    let mut buf = [0u8; 64 * 1024];
    let mut copied = 0;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(invalid_archive(e)),
        };
        out.write_all(&buf[..n])?;
        copied += n as u64;
    }
    out.flush()?;
    Ok(copied)
}

/// Whether `target`, read relative to the link at `link`, stays under the
/// archive root.
fn link_stays_inside(link: &Path, target: &str) -> bool {
    let mut depth = link.components().count().saturating_sub(1);
    for component in Path::new(target).components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}

#[cfg(unix)]
fn create_symlink(target: &str, link: &Path) -> RepofetchResult<()> {
    std::os::unix::fs::symlink(target, link)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_symlink(target: &str, link: &Path) -> RepofetchResult<()> {
    Err(RepofetchError::Extraction(format!(
        "unsupported entry type: symlink {} -> {}",
        link.display(),
        target
    )))
}

/// Move `src` to `target`, merging directories that already exist.
fn move_into_place(src: &Path, target: &Path) -> RepofetchResult<()> {
    let src_is_dir = fs::symlink_metadata(src)?.is_dir();

    match fs::symlink_metadata(target) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::rename(src, target)?;
        }
        Err(e) => return Err(e.into()),
        Ok(existing) if existing.is_dir() && src_is_dir => {
            debug!(target = %target.display(), "merging into existing directory");
            for child in fs::read_dir(src)? {
                let child = child?;
                move_into_place(&child.path(), &target.join(child.file_name()))?;
            }
        }
        Ok(existing) => {
            if existing.is_dir() {
                fs::remove_dir_all(target)?;
            } else {
                fs::remove_file(target)?;
            }
            fs::rename(src, target)?;
        }
    }

    Ok(())
}
