use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use clap::ValueEnum;
use crate::error::{InstallError, Result};

/// Branch used when none is given on the command line or in the config.
pub const DEFAULT_BRANCH: &str = "master";

/// The strategy used to install a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Write an environment-module file for the product
    Modules,
    /// Run `python setup.py install` inside the product directory
    Setup,
    /// Append shell exports for the product to the shell profile
    Env,
    /// Run `pip install <name>`
    Pip,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Modules => "modules",
            Method::Setup => "setup",
            Method::Env => "env",
            Method::Pip => "pip",
        }
    }

    /// Parses a method name, mapping empty or unknown input to `None`.
    pub fn parse_optional(value: &str) -> Option<Method> {
        value.parse().ok()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "modules" => Ok(Method::Modules),
            "setup" => Ok(Method::Setup),
            "env" => Ok(Method::Env),
            "pip" => Ok(Method::Pip),
            other => Err(format!("Unknown installation method: '{other}'")),
        }
    }
}

/// One installation request, built once per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallRequest {
    name: String,
    method: Option<Method>,
    modules_dir: Option<PathBuf>,
    branch: String,
}

impl InstallRequest {
    /// Creates a request for `name` with no method and the default branch.
    ///
    /// # Errors
    /// Returns [`InstallError::MissingRequiredInput`] if `name` is blank.
    pub fn new(name: &str) -> Result<InstallRequest> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InstallError::MissingRequiredInput);
        }
        Ok(InstallRequest {
            name: name.to_string(),
            method: None,
            modules_dir: None,
            branch: DEFAULT_BRANCH.to_string(),
        })
    }

    pub fn with_method(mut self, method: Option<Method>) -> Self {
        self.method = method;
        self
    }

    /// Sets the module file root. Empty paths are ignored.
    pub fn with_modules_dir(mut self, modules_dir: Option<PathBuf>) -> Self {
        self.modules_dir = modules_dir.filter(|dir| !dir.as_os_str().is_empty());
        self
    }

    /// Sets the branch. An empty branch keeps the default.
    pub fn with_branch(mut self, branch: &str) -> Self {
        if !branch.trim().is_empty() {
            self.branch = branch.trim().to_string();
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    pub fn modules_dir(&self) -> Option<&PathBuf> {
        self.modules_dir.as_ref()
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }
}
