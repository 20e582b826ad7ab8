use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{Context, Result};
use quickinstall::config::Config;
use quickinstall::installer::Installer;
use quickinstall::request::InstallRequest;
use quickinstall::util::MODULEPATH_VAR;
use quickinstall::{get_default_profile, get_global_config_file, log_debug, log_error, InstallError};
use crate::cli::CLI;

/// Runs one invocation and maps the outcome to the process exit code.
///
/// Diagnostics for a missing method and for failed child processes go to
/// stdout with the same wording as always; the exit code tells them apart.
pub fn execute(cli: CLI) -> ExitCode {
    quickinstall::logger::init(cli.debug);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<InstallError>() {
            Some(err) => {
                report(err);
                ExitCode::from(err.exit_code())
            }
            None => {
                log_error!("{:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: &CLI) -> Result<()> {
    let config = load_config(cli)?;
    let installer = build_installer(&config)?;
    let branch = cli.branch.as_deref().or(config.branch.as_deref()).unwrap_or_default();
    let request = InstallRequest::new(&cli.name)?
        .with_method(cli.method)
        .with_modules_dir(cli.modulesdir.clone().or(config.modules_dir))
        .with_branch(branch);
    log_debug!("{:?}", request);
    installer.install(&request)?;
    Ok(())
}

fn report(err: &InstallError) {
    match err {
        InstallError::UnsupportedMethod { .. } | InstallError::Execution { .. } => {
            println!("{}", err);
        }
        _ => log_error!("{}", err),
    }
}

/// An explicit `--config` must exist, the global one is optional.
fn load_config(cli: &CLI) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => {
            log_debug!("Using config file {}", path.display());
            Config::load(path)?
        }
        None => {
            let path: PathBuf = get_global_config_file()?;
            log_debug!("Using config file {}", path.display());
            Config::load_or_default(&path)?
        }
    };
    Ok(config)
}

fn build_installer(config: &Config) -> Result<Installer> {
    let cwd = std::env::current_dir().context("Could not determine the current directory")?;
    let profile = match &config.profile {
        Some(profile) => profile.clone(),
        None => get_default_profile()?,
    };
    Ok(Installer::new(cwd, profile)
        .with_module_path(std::env::var(MODULEPATH_VAR).ok())
        .with_python(config.python())
        .with_pip(config.pip()))
}
