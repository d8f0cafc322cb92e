//! Streams GitHub archives to disk

use crate::archive::options::{DownloadRequest, FetchResult};
use crate::core::path::ensure_dir;
use crate::core::{RepofetchError, RepofetchResult};
use crate::di::ConfigProvider;
use futures::{Stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{header, redirect, Client as HttpClient, Url};
use sha2::{Digest, Sha256};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// Downloads `/{org}/{repo}/archive/{branch}.{ext}` into the destination directory
#[derive(Clone)]
pub struct ArchiveFetcher {
    http_client: HttpClient,
    github_url: Url,
    show_progress: bool,
}

impl ArchiveFetcher {
    /// Create a fetcher from the client configuration
    pub fn new(config: &dyn ConfigProvider) -> RepofetchResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(config.user_agent())
                .map_err(|e| RepofetchError::Config(format!("Invalid user agent: {}", e)))?,
        );
        headers.insert(
            header::ACCEPT_ENCODING,
            header::HeaderValue::from_static("gzip, deflate"),
        );

        let mut builder = HttpClient::builder()
            .default_headers(headers)
            .redirect(redirect::Policy::limited(config.max_redirects()));
        if let Some(timeout) = config.timeout() {
            builder = builder.connect_timeout(timeout).read_timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| RepofetchError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let github_url = Url::parse(config.github_url()).map_err(|e| {
            RepofetchError::Config(format!(
                "Invalid GitHub URL `{}`: {}",
                config.github_url(),
                e
            ))
        })?;

        Ok(Self {
            http_client,
            github_url,
            show_progress: false,
        })
    }

    /// Draw a progress bar on stderr while downloading
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// `{github_url}/{org}/{repo}/archive/{branch}.{ext}`
    ///
    /// Branches containing `/` keep their slashes as path separators.
    pub fn archive_url(&self, request: &DownloadRequest) -> RepofetchResult<Url> {
        let mut url = self.github_url.clone();
        let branch_segments: Vec<&str> = request.branch.split('/').collect();
        let (last, parents) = branch_segments
            .split_last()
            .ok_or_else(|| RepofetchError::InvalidArgument("branch must not be empty".to_string()))?;
        let file_name = format!("{}.{}", last, request.format.extension());

        url.path_segments_mut()
            .map_err(|_| {
                RepofetchError::Config(format!("GitHub URL cannot be a base: {}", self.github_url))
            })?
            .pop_if_empty()
            .push(&request.repository.organization)
            .push(&request.repository.name)
            .push("archive")
            .extend(parents)
            .push(&file_name);

        Ok(url)
    }

    /// Stream the archive to `{dest}/{repo}-{branch}.{ext}`.
    ///
    /// A non-success status fails before any file is created. The body is
    /// written to a temporary file that only replaces the target once every
    /// byte arrived, so a failed or cancelled download never leaves a
    /// truncated archive behind.
    pub async fn fetch(&self, request: &DownloadRequest) -> RepofetchResult<FetchResult> {
        let url = self.archive_url(request)?;
        let location = request.archive_path();
        debug!(%url, location = %location.display(), "fetching archive");

        let mut http_request = self.http_client.get(url.clone());
        if let Some(credential) = &request.credential {
            http_request = http_request.header(header::AUTHORIZATION, credential.header_value());
        }

        let response = http_request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RepofetchError::Remote {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url: url.to_string(),
            });
        }
        if response.url() != &url {
            debug!(final_url = %response.url(), "archive request was redirected");
        }

        ensure_dir(&request.dest)?;

        // The body lands in a hidden file next to the target, which is deleted
        // on failure or when this future is dropped mid-stream.
        let partial = tempfile::Builder::new()
            .prefix(".repofetch-")
            .suffix(".part")
            .tempfile_in(&request.dest)?;
        let mut file = tokio::fs::File::from_std(partial.as_file().try_clone()?);

        let expected = response.content_length();
        let progress = self.progress_bar(expected);
        let streamed = write_stream(response.bytes_stream(), expected, &mut file, &progress).await;
        progress.finish_and_clear();
        drop(file);

        let (bytes_written, sha256) = match streamed {
            Ok(done) => done,
            Err(e) => {
                warn!(location = %location.display(), "download failed, discarding partial archive: {}", e);
                return Err(e);
            }
        };

        // Temporary files are created 0600
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(partial.path(), std::fs::Permissions::from_mode(0o644))?;
        }
        partial
            .persist(&location)
            .map_err(|e| RepofetchError::Io(e.error))?;

        info!(
            location = %location.display(),
            bytes = bytes_written,
            "downloaded {}",
            request.repository.full_name()
        );

        Ok(FetchResult {
            location,
            organization: request.repository.organization.clone(),
            repository: request.repository.name.clone(),
            branch: request.branch.clone(),
            format: request.format,
            bytes_written,
            sha256,
        })
    }

    fn progress_bar(&self, total: Option<u64>) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        match total {
            Some(total) => {
                let pb = ProgressBar::new(total);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("#>-"),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner} {bytes} downloaded")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb
            }
        }
    }
}

/// Write a body stream chunk by chunk, hashing as it goes.
///
/// Fails with `UnexpectedEof` when fewer bytes than `expected` arrive.
/// Returns the byte count and the hex SHA-256 of what was written.
async fn write_stream<S, B, E, W>(
    stream: S,
    expected: Option<u64>,
    out: &mut W,
    progress: &ProgressBar,
) -> RepofetchResult<(u64, String)>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<RepofetchError>,
    W: AsyncWrite + Unpin,
{
    futures::pin_mut!(stream);
    let mut sha = Sha256::new();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(Into::into)?;
        let chunk = chunk.as_ref();
        out.write_all(chunk).await?;
        sha.update(chunk);
        written += chunk.len() as u64;
        progress.inc(chunk.len() as u64);
    }
    out.flush().await?;

    if let Some(expected) = expected {
        if written != expected {
            return Err(RepofetchError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "archive truncated: expected {} bytes, got {}",
                    expected, written
                ),
            )));
        }
    }

    Ok((written, hex::encode(sha.finalize())))
}
