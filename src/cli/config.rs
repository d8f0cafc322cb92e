use repofetch::config::Config;
use repofetch::core::{ArchiveFormat, RepofetchError, RepofetchResult};
use std::path::Path;

fn load_or_default(config_path: &Path) -> RepofetchResult<Config> {
    if config_path.exists() {
        Config::load_from(config_path)
    } else {
        Ok(Config::default())
    }
}

pub fn show(config_path: &Path) -> RepofetchResult<()> {
    let config = load_or_default(config_path)?;
    let mut yaml = serde_yaml::to_string(&config)?;
    if config.token.is_some() {
        yaml = mask_token(&yaml);
    }
    print!("{}", yaml);
    Ok(())
}

pub fn path(config_path: &Path) -> RepofetchResult<()> {
    println!("{}", config_path.display());
    Ok(())
}

pub fn set_branch(config_path: &Path, branch: String) -> RepofetchResult<()> {
    if branch.trim().is_empty() {
        return Err(RepofetchError::InvalidArgument(
            "branch must be a non-empty string".to_string(),
        ));
    }

    let mut config = load_or_default(config_path)?;
    config.default_branch = branch;
    config.save_to(config_path)?;

    println!("✓ Default branch set to: {}", config.default_branch);
    Ok(())
}

pub fn set_format(config_path: &Path, format: ArchiveFormat) -> RepofetchResult<()> {
    let mut config = load_or_default(config_path)?;
    config.archive_format = format;
    config.save_to(config_path)?;

    println!("✓ Default archive format set to: {}", format);
    Ok(())
}

fn mask_token(yaml: &str) -> String {
    yaml.lines()
        .map(|line| {
            if line.starts_with("token:") {
                "token: '***'".to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}
