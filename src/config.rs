use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::error::{InstallError, Result};

/// Represents the contents of the optional `config.toml`.
///
/// Every field is optional. Command-line values take precedence over these.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root directory for generated module files.
    pub modules_dir: Option<PathBuf>,
    /// Branch used when `--branch` is not given.
    pub branch: Option<String>,
    /// Shell startup file the `env` method appends to (defaults to `~/.bashrc`).
    pub profile: Option<PathBuf>,
    /// Python interpreter for the `setup` method (defaults to `python`).
    pub python: Option<String>,
    /// Pip executable for the `pip` method (defaults to `pip`).
    pub pip: Option<String>,
}

impl Config {
    /// Loads a `Config` from a file path.
    ///
    /// # Errors
    /// Returns [`InstallError::FileSystem`] if the file can't be read and
    /// [`InstallError::Config`] if it isn't valid TOML for this structure.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| InstallError::file_system(path, e))?;
        toml::from_str(&content).map_err(|e| InstallError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads the file at `path` if it exists, falling back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
        if path.as_ref().exists() {
            Config::load(path)
        }
        else {
            Ok(Config::default())
        }
    }

    /// Saves the `Config` to the given file path in pretty TOML format.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let toml_str = toml::to_string_pretty(self).map_err(|e| InstallError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, toml_str).map_err(|e| InstallError::file_system(path, e))
    }

    pub fn python(&self) -> &str {
        self.python.as_deref().unwrap_or("python")
    }

    pub fn pip(&self) -> &str {
        self.pip.as_deref().unwrap_or("pip")
    }
}
