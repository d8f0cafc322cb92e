//! Common utilities for CLI tests

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated home directory and working directory for one test
pub struct TestContext {
    pub temp: TempDir,
    pub home: PathBuf,
    pub workdir: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let workdir = temp.path().join("work");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(&workdir).unwrap();
        Self {
            temp,
            home,
            workdir,
        }
    }

    /// Point archive downloads and API calls at `server_uri`
    pub fn with_server(server_uri: &str) -> Self {
        let ctx = Self::new();
        ctx.write_config(&format!(
            "github_url: {uri}\napi_url: {uri}\ndefault_branch: main\n",
            uri = server_uri
        ));
        ctx
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).unwrap();
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.yaml")
    }

    /// Create a Command for running repofetch with an isolated environment
    pub fn repofetch(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("repofetch").unwrap();
        cmd.current_dir(&self.workdir)
            .env("REPOFETCH_HOME", &self.home)
            .env_remove("GITHUB_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// A GitHub-style tarball with every file under `{prefix}/`
pub fn targz(prefix: &str, files: &[(&str, &str)]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut tar = tar::Builder::new(encoder);
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header
            .set_path(Path::new(prefix).join(name))
            .unwrap();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        tar.append(&header, content.as_bytes()).unwrap();
    }
    tar.into_inner().unwrap().finish().unwrap()
}
