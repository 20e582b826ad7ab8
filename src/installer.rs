use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use crate::error::{InstallError, Result};
use crate::module_file::render_module_header;
use crate::request::{InstallRequest, Method};
use crate::util::{
    append_to_file, ensure_dir, env_prefix, is_shell_identifier, resolve_library_path,
    resolve_modules_directory, write_file,
};
use crate::{log_debug, log_info, log_warn};

const MODULES_DIR_PROMPT: &str = "Enter the root path for your module files:";

/// Asks the user for the module file root when nothing else provides one.
pub type Prompt = Box<dyn Fn() -> Result<String>>;

/// Performs one installation per [`InstallRequest`].
///
/// All ambient inputs are held explicitly: the directory products are resolved
/// against, the shell profile, the module search path and the prompt. Nothing
/// touches the process working directory.
pub struct Installer {
    base_dir: PathBuf,
    profile: PathBuf,
    module_path: Option<String>,
    python: String,
    pip: String,
    prompt: Prompt,
}

impl Installer {
    /// Creates an installer resolving products under `base_dir` and appending
    /// shell exports to `profile`.
    pub fn new<B: AsRef<Path>, P: AsRef<Path>>(base_dir: B, profile: P) -> Installer {
        Installer {
            base_dir: base_dir.as_ref().to_path_buf(),
            profile: profile.as_ref().to_path_buf(),
            module_path: None,
            python: "python".to_string(),
            pip: "pip".to_string(),
            prompt: Box::new(prompt_modules_dir),
        }
    }

    /// Sets the module search path, i.e. the value of `MODULEPATH`.
    pub fn with_module_path(mut self, module_path: Option<String>) -> Self {
        self.module_path = module_path;
        self
    }

    pub fn with_python(mut self, python: &str) -> Self {
        self.python = python.to_string();
        self
    }

    pub fn with_pip(mut self, pip: &str) -> Self {
        self.pip = pip.to_string();
        self
    }

    pub fn with_prompt<F>(mut self, prompt: F) -> Self
    where
        F: Fn() -> Result<String> + 'static,
    {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn profile(&self) -> &Path {
        &self.profile
    }

    /// Installs the product named in `request` with the requested method.
    ///
    /// # Errors
    /// - [`InstallError::UnsupportedMethod`] when the request carries no method.
    ///   Nothing is written or run in that case.
    /// - [`InstallError::FileSystem`] when a directory or file can't be written.
    /// - [`InstallError::Execution`] when `python` or `pip` fails; the error
    ///   carries the captured output of the child process.
    pub fn install(&self, request: &InstallRequest) -> Result<()> {
        let Some(method) = request.method() else {
            return Err(InstallError::UnsupportedMethod { name: request.name().to_string() });
        };
        log_debug!("Installing '{}' via {}", request.name(), method);
        match method {
            Method::Modules => {
                let path = self.install_modules(request)?;
                log_info!("Wrote module file {}", path.display());
            }
            Method::Setup => {
                self.install_setup(request)?;
                log_info!("Installed {} with setup.py", request.name());
            }
            Method::Env => {
                self.install_env(request)?;
                log_info!("Added {} to {}", request.name(), self.profile.display());
            }
            Method::Pip => {
                self.install_pip(request)?;
                log_info!("Installed {} with pip", request.name());
            }
        }
        Ok(())
    }

    /// Writes `<modules_dir>/<name>/<branch>` and returns its path.
    pub fn install_modules(&self, request: &InstallRequest) -> Result<PathBuf> {
        let name = request.name();
        warn_unexportable(name);
        let product_dir = self.base_dir.join(name);
        let module = render_module_header(&product_dir, name, request.branch());
        let modules_dir = resolve_modules_directory(
            request.modules_dir().map(PathBuf::as_path),
            self.module_path.as_deref(),
            || (self.prompt)(),
        )?;
        log_debug!("Module file root: {}", modules_dir.display());

        let submod = modules_dir.join(name);
        if !submod.is_dir() {
            log_debug!("Creating {}", submod.display());
            ensure_dir(&submod)?;
        }
        let filename = submod.join(request.branch());
        write_file(&filename, &module)?;
        Ok(filename)
    }

    /// Runs `python setup.py install` inside `<base_dir>/<name>`.
    pub fn install_setup(&self, request: &InstallRequest) -> Result<String> {
        let product_dir = self.base_dir.join(request.name());
        run_command(Method::Setup, &self.python, &["setup.py", "install"], Some(&product_dir))
    }

    /// Appends the product's export block to the shell profile.
    pub fn install_env(&self, request: &InstallRequest) -> Result<()> {
        warn_unexportable(request.name());
        let block = render_env_exports(request.name(), &self.base_dir);
        log_debug!("Appending to {}:{}", self.profile.display(), block);
        append_to_file(&self.profile, &block)
    }

    /// Runs `pip install <name>`.
    pub fn install_pip(&self, request: &InstallRequest) -> Result<String> {
        run_command(Method::Pip, &self.pip, &["install", request.name()], None)
    }
}

/// Asks for the root path of the module files.
///
/// Uses an interactive prompt on a terminal and reads one line otherwise, so
/// the answer can be piped in.
pub fn prompt_modules_dir() -> Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return inquire::Text::new(MODULES_DIR_PROMPT)
            .prompt()
            .map_err(|e| InstallError::Prompt(e.to_string()));
    }
    print!("{MODULES_DIR_PROMPT}");
    std::io::stdout().flush().map_err(|e| InstallError::Prompt(e.to_string()))?;
    read_answer(stdin.lock())
}

fn read_answer<R: BufRead>(mut input: R) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| InstallError::Prompt(e.to_string()))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn warn_unexportable(name: &str) {
    let prefix = env_prefix(name);
    if !is_shell_identifier(&prefix) {
        log_warn!("{prefix}_DIR is not a valid shell variable name, the shell cannot export it");
    }
}

/// Builds the shell block the `env` method appends to the profile.
///
/// The `PYTHONPATH` line is left out when the product has neither a `python`
/// nor a `<name>` directory.
pub fn render_env_exports<P: AsRef<Path>>(name: &str, base_dir: P) -> String {
    let path = base_dir.as_ref().join(name);
    let bindir = path.join("bin");
    let prefix = env_prefix(name);

    let mut block = format!("\n# {name} setup\n");
    block.push_str(&format!("export {prefix}_DIR={}\n", path.display()));
    block.push_str(&format!("export PATH=$PATH:{}\n", bindir.display()));
    match resolve_library_path(name, base_dir) {
        Some(pypath) => block.push_str(&format!("export PYTHONPATH=$PYTHONPATH:{}\n", pypath.display())),
        None => log_debug!("No python library directory found for {name}"),
    }
    block
}

/// Runs `program` with captured output and no stdin.
///
/// A failure to spawn and a non-zero exit both become [`InstallError::Execution`].
fn run_command(method: Method, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null());
    if let Some(cwd) = cwd {
        command.current_dir(cwd);
    }
    log_debug!("Executing: {} {}", program, args.join(" "));

    let output = command.output().map_err(|e| InstallError::Execution {
        method,
        output: format!("could not run '{program}': {e}"),
    })?;
    let captured = collect_output(&output);
    if !output.status.success() {
        log_debug!("'{}' exited with {}", program, output.status);
        return Err(InstallError::Execution { method, output: captured });
    }
    log_debug!("Output of '{}': {}", program, captured);
    Ok(captured)
}

fn collect_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let captured = [stdout.trim_end(), stderr.trim_end()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    if captured.is_empty() {
        format!("process exited with {}", output.status)
    } else {
        captured
    }
}
