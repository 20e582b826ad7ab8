use std::path::PathBuf;
use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_PROFILE: &str = ".bashrc";

pub fn get_global_config_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "quickinstall", "quickinstall")
        .ok_or_else(|| anyhow!("Could not get project directories"))?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

/// Returns the path of the global `config.toml`, whether it exists or not.
pub fn get_global_config_file() -> Result<PathBuf> {
    Ok(get_global_config_dir()?.join(CONFIG_FILE_NAME))
}

pub fn get_home_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(base_dirs.home_dir().to_path_buf())
}

/// Returns `~/.bashrc`, the default target of the `env` method.
pub fn get_default_profile() -> Result<PathBuf> {
    Ok(get_home_dir()?.join(DEFAULT_PROFILE))
}
