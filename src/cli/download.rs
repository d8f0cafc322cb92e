use repofetch::archive::{DownloadOptions, ExtractOptions, ExtractResult, FetchResult};
use repofetch::core::{ArchiveFormat, RepofetchResult};
use repofetch::di::ServiceContainer;
use std::path::PathBuf;

pub struct DownloadArgs {
    pub repository: String,
    pub branch: Option<String>,
    pub dest: Option<PathBuf>,
    pub token: Option<String>,
    pub format: Option<ArchiveFormat>,
    pub extract: bool,
    pub keep_archive: bool,
    pub json: bool,
}

impl DownloadArgs {
    fn options(&self) -> DownloadOptions {
        DownloadOptions {
            branch: self.branch.clone(),
            dest: self.dest.clone(),
            token: self.token.clone(),
            auth: None,
            format: self.format,
        }
    }
}

pub async fn run(container: &ServiceContainer, args: DownloadArgs) -> RepofetchResult<()> {
    let output = if args.extract {
        let options = ExtractOptions::new(args.options()).remove_archive(!args.keep_archive);
        let result = container
            .archive_source()
            .download_and_extract(&args.repository, options)
            .await?;
        if args.json {
            serde_json::to_string_pretty(&result)?
        } else {
            format_extracted(&result)
        }
    } else {
        let result = container
            .archive_source()
            .download(&args.repository, args.options())
            .await?;
        if args.json {
            serde_json::to_string_pretty(&result)?
        } else {
            format_fetched(&result)
        }
    };

    println!("{}", output);
    Ok(())
}

fn format_fetched(result: &FetchResult) -> String {
    format!(
        "✓ Downloaded {}.{} ({}) to {}\n  {} bytes, sha256 {}",
        result.organization,
        result.repository,
        result.branch,
        result.location.display(),
        result.bytes_written,
        result.sha256
    )
}

fn format_extracted(result: &ExtractResult) -> String {
    let mut output = format!(
        "✓ Extracted {}.{} ({}) to {}",
        result.organization,
        result.repository,
        result.branch,
        result.location.display()
    );
    if let Some(archive) = &result.archive {
        output.push_str(&format!("\n  Archive kept at {}", archive.display()));
    }
    output
}
