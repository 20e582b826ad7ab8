//! # Quickinstall Core Library
//!
//! Installs a named product in one of four ways:
//! generating an environment-module file, running `python setup.py install`,
//! appending shell exports to the user's profile, or running `pip install`.
//!
//! This library backs the `quickinstall` CLI, but the [`Installer`] can be driven
//! directly: every ambient input (base directory, profile, module search path,
//! prompt) is passed in explicitly.
//!
//! ## Modules Overview
//! - [`request`] – The install request and the [`Method`] selector
//! - [`installer`] – Dispatch over the four installation methods
//! - [`module_file`] – Rendering of environment-module file headers
//! - [`util`] – Path resolution and file helpers
//! - [`config`] – The optional `config.toml`
//! - [`error`] – The [`InstallError`] type
//! - [`logger`] – Colored, leveled console logging
//! - [`global`] – Global paths (config file, home directory)

pub mod logger;
pub mod error;
pub mod request;
pub mod module_file;
pub mod util;
pub mod installer;
pub mod config;
pub mod global;

pub use error::*;
pub use request::*;
pub use module_file::*;
pub use util::*;
pub use installer::*;
pub use config::*;
pub use global::utils::*;
