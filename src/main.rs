use clap::{Parser, Subcommand};
use repofetch::config::Config;
use repofetch::core::{ArchiveFormat, RepofetchResult};
use repofetch::di::ServiceContainer;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "repofetch")]
#[command(about = "Download and extract GitHub repository archives")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a repository archive
    Download {
        /// Repository as `organization.repository`
        repository: String,
        /// Branch to download (defaults to the configured branch)
        #[arg(short, long)]
        branch: Option<String>,
        /// Destination directory (defaults to the current directory)
        #[arg(short, long)]
        dest: Option<PathBuf>,
        /// Token for private repositories (defaults to GITHUB_TOKEN)
        #[arg(long)]
        token: Option<String>,
        /// Archive format: tar.gz or zip
        #[arg(long)]
        format: Option<ArchiveFormat>,
        /// Extract the archive after downloading
        #[arg(short = 'x', long)]
        extract: bool,
        /// Keep the archive after extracting
        #[arg(long, requires = "extract")]
        keep_archive: bool,
        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the last activity of a repository's contributors
    Contributors {
        /// Repository owner
        owner: String,
        /// Repository name
        repository: String,
        /// Only look up this contributor
        #[arg(short, long)]
        contributor: Option<String>,
        /// Token for the GitHub API (defaults to GITHUB_TOKEN)
        #[arg(long)]
        token: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configure global settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the current configuration
    Show,
    /// Print the configuration file location
    Path,
    /// Set the branch used when none is given
    SetBranch {
        /// Branch name
        branch: String,
    },
    /// Set the archive format used when none is given
    SetFormat {
        /// tar.gz or zip
        format: ArchiveFormat,
    },
}

fn services(show_progress: bool) -> RepofetchResult<ServiceContainer> {
    let config = Config::load()?;
    ServiceContainer::from_config(config, show_progress)
}

async fn run(command: Commands) -> RepofetchResult<()> {
    match command {
        Commands::Download {
            repository,
            branch,
            dest,
            token,
            format,
            extract,
            keep_archive,
            no_progress,
            json,
        } => {
            let show_progress = !no_progress && !json && std::io::stderr().is_terminal();
            let container = services(show_progress)?;
            cli::download::run(
                &container,
                cli::download::DownloadArgs {
                    repository,
                    branch,
                    dest,
                    token,
                    format,
                    extract,
                    keep_archive,
                    json,
                },
            )
            .await
        }
        Commands::Contributors {
            owner,
            repository,
            contributor,
            token,
            json,
        } => {
            let container = services(false)?;
            cli::contributors::run(
                &container,
                cli::contributors::ContributorsArgs {
                    owner,
                    repository,
                    contributor,
                    token,
                    json,
                },
            )
            .await
        }
        Commands::Config(cmd) => {
            let config_path = repofetch::core::path::config_file()?;
            match cmd {
                ConfigCommands::Show => cli::config::show(&config_path),
                ConfigCommands::Path => cli::config::path(&config_path),
                ConfigCommands::SetBranch { branch } => {
                    cli::config::set_branch(&config_path, branch)
                }
                ConfigCommands::SetFormat { format } => {
                    cli::config::set_format(&config_path, format)
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{}", repofetch::core::error_help::format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
