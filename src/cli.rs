use std::path::PathBuf;
use clap::Parser;
use quickinstall::Method;

/// Quickly install a product
#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    /// Name of program to install
    #[clap(short, long)]
    pub(crate) name: String,
    /// Method of installation
    #[clap(short, long, value_enum)]
    pub(crate) method: Option<Method>,
    /// Path to your module files
    #[clap(short = 'd', long, env = "MODULES_DIR")]
    pub(crate) modulesdir: Option<PathBuf>,
    /// Module file version to use [default: master]
    #[clap(short, long)]
    pub(crate) branch: Option<String>,
    /// Use this config file instead of the global one
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Turn debugging information on
    #[clap(long)]
    pub(crate) debug: bool,
}
