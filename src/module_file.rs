use std::path::{Path, PathBuf};
use crate::util::env_prefix;

/// Header of an environment-module file for one product.
///
/// The rendered text is a Tcl script for the `module` command: loading it sets
/// `<NAME>_DIR` and `<NAME>_VER` and prepends the product's `bin` and `python`
/// directories to `PATH` and `PYTHONPATH`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleFileHeader {
    pub name: String,
    pub version: String,
    pub product_dir: PathBuf,
}

impl ModuleFileHeader {
    pub fn new<P: AsRef<Path>>(product_dir: P, name: &str, version: &str) -> ModuleFileHeader {
        ModuleFileHeader {
            name: name.to_string(),
            version: version.to_string(),
            product_dir: product_dir.as_ref().to_path_buf(),
        }
    }

    /// Renders the module file text, trimmed of surrounding whitespace.
    pub fn render(&self) -> String {
        let prefix = env_prefix(&self.name);
        let hdr = format!(
            r#"#%Module1.0
proc ModulesHelp {{ }} {{
    global product version
    puts stderr "This module adds $product/$version to various paths"
}}
set name {name}
set product {name}
set version {version}
conflict $product
module-whatis "Sets up $product/$version in your environment"

set PRODUCT_DIR {dir}
setenv {prefix}_DIR $PRODUCT_DIR
setenv {prefix}_VER $version
prepend-path PATH $PRODUCT_DIR/bin
prepend-path PYTHONPATH $PRODUCT_DIR/python
"#,
            name = self.name,
            version = self.version,
            dir = self.product_dir.display(),
            prefix = prefix,
        );
        hdr.trim().to_string()
    }
}

/// Renders the module file for `name` at `version`, rooted at `product_dir`.
///
/// # Examples
///
/// ```
/// use quickinstall::render_module_header;
///
/// let text = render_module_header("/opt/foo", "foo", "1.0");
/// assert!(text.starts_with("#%Module1.0"));
/// assert!(text.contains("setenv FOO_DIR $PRODUCT_DIR"));
/// ```
pub fn render_module_header<P: AsRef<Path>>(product_dir: P, name: &str, version: &str) -> String {
    ModuleFileHeader::new(product_dir, name, version).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_lines(text: &str, line: &str) -> usize {
        text.lines().filter(|l| *l == line).count()
    }

    #[test]
    fn test_header_has_single_name_and_version_lines() {
        let text = render_module_header("/opt/foo", "foo", "1.0");
        assert_eq!(count_lines(&text, "set name foo"), 1);
        assert_eq!(count_lines(&text, "set product foo"), 1);
        assert_eq!(count_lines(&text, "set version 1.0"), 1);
        assert_eq!(count_lines(&text, "conflict $product"), 1);
    }

    #[test]
    fn test_header_uppercases_env_names() {
        let text = render_module_header("/opt/mytool", "mytool", "master");
        assert!(text.contains("setenv MYTOOL_DIR $PRODUCT_DIR"));
        assert!(text.contains("setenv MYTOOL_VER $version"));
        assert!(!text.contains("mytool_DIR"));
    }

    #[test]
    fn test_header_paths_and_trimming() {
        let text = render_module_header("/opt/foo", "foo", "1.0");
        assert!(text.contains("set PRODUCT_DIR /opt/foo"));
        assert!(text.contains("prepend-path PATH $PRODUCT_DIR/bin"));
        assert!(text.contains("prepend-path PYTHONPATH $PRODUCT_DIR/python"));
        assert!(text.starts_with("#%Module1.0"));
        assert_eq!(text, text.trim());
    }

    #[test]
    fn test_render_is_deterministic() {
        let header = ModuleFileHeader::new("/opt/foo", "foo", "2.1");
        assert_eq!(header.render(), header.render());
    }
}
