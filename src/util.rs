use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::error::{InstallError, Result};

/// Environment variable holding the colon-separated module search path.
pub const MODULEPATH_VAR: &str = "MODULEPATH";

/// Returns the upper-cased product name used as prefix for `<NAME>_DIR` and `<NAME>_VER`.
pub fn env_prefix(name: &str) -> String {
    name.to_ascii_uppercase()
}

/// Whether `name` can be exported from a POSIX shell: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_shell_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Finds the directory holding the product's Python library.
///
/// Checks `<base_dir>/<name>/python` first, then `<base_dir>/<name>/<name>`.
/// Returns `None` if neither is a directory.
pub fn resolve_library_path<P: AsRef<Path>>(name: &str, base_dir: P) -> Option<PathBuf> {
    let path = base_dir.as_ref().join(name);
    let python_dir = path.join("python");
    let name_dir = path.join(name);
    [python_dir, name_dir].into_iter().find(|dir| dir.is_dir())
}

/// Returns the first entry of a colon-separated search path, if any.
pub fn first_search_path_segment(search_path: &str) -> Option<&str> {
    search_path.split(':').next().filter(|segment| !segment.is_empty())
}

/// Decides where module files go.
///
/// `explicit` wins when non-empty. Otherwise the first segment of `module_path`
/// (the value of `MODULEPATH`) is used. The `prompt` is asked when that is unset
/// or its first segment is empty.
///
/// # Errors
/// Returns [`InstallError::Prompt`] if the prompt fails or yields nothing.
pub fn resolve_modules_directory<F>(
    explicit: Option<&Path>,
    module_path: Option<&str>,
    prompt: F,
) -> Result<PathBuf>
where
    F: FnOnce() -> Result<String>,
{
    if let Some(explicit) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(explicit.to_path_buf());
    }
    match module_path.and_then(first_search_path_segment) {
        Some(first) => Ok(PathBuf::from(first)),
        None => {
            let answer = prompt()?;
            let answer = answer.trim();
            if answer.is_empty() {
                return Err(InstallError::Prompt("No module file root entered".to_string()));
            }
            Ok(PathBuf::from(answer))
        }
    }
}

/// Creates `path` and all missing parents.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).map_err(|e| InstallError::file_system(path, e))
}

/// Writes `content` to `path`, replacing whatever was there.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, content).map_err(|e| InstallError::file_system(path, e))
}

/// Appends `content` to `path`, creating the file if it doesn't exist.
pub fn append_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| InstallError::file_system(path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| InstallError::file_system(path, e))
}
