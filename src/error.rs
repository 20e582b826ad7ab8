use std::path::PathBuf;
use thiserror::Error;
use crate::request::Method;

/// Everything that can go wrong while installing a product.
///
/// The `Display` texts of [`InstallError::UnsupportedMethod`] and
/// [`InstallError::Execution`] are kept stable since scripts scrape them.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("A product name is required")]
    MissingRequiredInput,

    #[error("No method found.  Cannot install program {name}")]
    UnsupportedMethod { name: String },

    #[error("Filesystem error at {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install via {method}: {output}")]
    Execution { method: Method, output: String },

    #[error("Invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("Could not read input: {0}")]
    Prompt(String),
}

impl InstallError {
    pub fn file_system<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        InstallError::FileSystem { path: path.into(), source }
    }

    /// Process exit code reported by the binary for this error.
    ///
    /// An unsupported method is informational only and still exits with `0`.
    pub fn exit_code(&self) -> u8 {
        match self {
            InstallError::UnsupportedMethod { .. } => 0,
            InstallError::MissingRequiredInput => 2,
            InstallError::FileSystem { .. } => 3,
            InstallError::Execution { .. } => 4,
            InstallError::Config { .. } | InstallError::Prompt(_) => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, InstallError>;
