use std::path::Path;
use tempfile::TempDir;
use quickinstall::*;

fn setup_tests() -> (TempDir, Installer) {
    let temp_dir = TempDir::new().unwrap();
    let installer = Installer::new(temp_dir.path(), temp_dir.path().join(".bashrc"))
        .with_prompt(|| panic!("prompt must not be called"));
    (temp_dir, installer)
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modules_install_writes_module_file() {
        let (dir, installer) = setup_tests();
        let mods = dir.path().join("mods");
        std::fs::create_dir_all(&mods).unwrap();
        let request = InstallRequest::new("foo")
            .unwrap()
            .with_method(Some(Method::Modules))
            .with_modules_dir(Some(mods.clone()))
            .with_branch("1.0");

        installer.install(&request).unwrap();

        let module_file = mods.join("foo").join("1.0");
        assert!(module_file.exists());
        let content = std::fs::read_to_string(&module_file).unwrap();
        assert!(content.trim().starts_with("#%Module1.0"));
        assert!(content.contains("set version 1.0"));
        assert!(content.contains(&format!("set PRODUCT_DIR {}", dir.path().join("foo").display())));
    }

    #[test]
    fn test_modules_install_overwrites_existing_file() {
        let (dir, installer) = setup_tests();
        let mods = dir.path().join("mods");
        std::fs::create_dir_all(mods.join("foo")).unwrap();
        std::fs::write(mods.join("foo").join("master"), "stale").unwrap();
        let request = InstallRequest::new("foo")
            .unwrap()
            .with_method(Some(Method::Modules))
            .with_modules_dir(Some(mods.clone()));

        installer.install(&request).unwrap();

        let content = std::fs::read_to_string(mods.join("foo").join("master")).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.contains("set version master"));
    }

    #[test]
    fn test_modules_install_into_unwritable_target_fails() {
        let (dir, installer) = setup_tests();
        // a file where the modules root should be
        let blocker = dir.path().join("mods");
        std::fs::write(&blocker, "").unwrap();
        let request = InstallRequest::new("foo")
            .unwrap()
            .with_method(Some(Method::Modules))
            .with_modules_dir(Some(blocker));

        let err = installer.install(&request).unwrap_err();
        assert!(matches!(err, InstallError::FileSystem { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_env_install_appends_to_profile() {
        let (dir, installer) = setup_tests();
        std::fs::create_dir_all(dir.path().join("foo").join("foo")).unwrap();
        std::fs::write(installer.profile(), "alias ll='ls -l'\n").unwrap();
        let request = InstallRequest::new("foo").unwrap().with_method(Some(Method::Env));

        installer.install(&request).unwrap();

        let profile = std::fs::read_to_string(installer.profile()).unwrap();
        assert!(profile.starts_with("alias ll='ls -l'\n"));
        assert!(profile.contains("# foo setup"));
        assert!(profile.contains("export FOO_DIR="));
        assert!(profile.contains(&format!(
            "export PYTHONPATH=$PYTHONPATH:{}",
            dir.path().join("foo").join("foo").display()
        )));
    }

    #[test]
    fn test_env_install_creates_missing_profile() {
        let (_dir, installer) = setup_tests();
        assert!(!installer.profile().exists());
        let request = InstallRequest::new("bar").unwrap().with_method(Some(Method::Env));
        installer.install(&request).unwrap();
        installer.install(&request).unwrap();
        let profile = std::fs::read_to_string(installer.profile()).unwrap();
        assert_eq!(profile.matches("# bar setup").count(), 2);
    }

    #[test]
    fn test_env_install_into_directory_profile_fails() {
        let temp_dir = TempDir::new().unwrap();
        let profile = temp_dir.path().join("profile.d");
        std::fs::create_dir_all(&profile).unwrap();
        let installer = Installer::new(temp_dir.path(), &profile);
        let request = InstallRequest::new("foo").unwrap().with_method(Some(Method::Env));

        let err = installer.install(&request).unwrap_err();
        assert!(matches!(err, InstallError::FileSystem { ref path, .. } if *path == profile));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_pip_install_invalid_package_reports_output() {
        let (_dir, installer) = setup_tests();
        let request = InstallRequest::new("!!not a package!!")
            .unwrap()
            .with_method(Some(Method::Pip));

        match installer.install(&request) {
            Err(InstallError::Execution { method, output }) => {
                assert_eq!(method, Method::Pip);
                assert!(!output.is_empty());
            }
            other => panic!("expected an execution error, got {other:?}"),
        }
    }

    #[test]
    fn test_setup_install_runs_in_product_dir() {
        let (dir, installer) = setup_tests();
        let installer = installer.with_python("sh");
        let product = dir.path().join("foo");
        std::fs::create_dir_all(&product).unwrap();
        std::fs::write(product.join("setup.py"), "touch installed-$1\n").unwrap();
        let request = InstallRequest::new("foo").unwrap().with_method(Some(Method::Setup));

        installer.install(&request).unwrap();

        assert!(product.join("installed-install").exists());
    }

    #[test]
    fn test_setup_install_failure_is_execution_error() {
        let (dir, installer) = setup_tests();
        let installer = installer.with_python("sh");
        let product = dir.path().join("foo");
        std::fs::create_dir_all(&product).unwrap();
        std::fs::write(product.join("setup.py"), "echo broken build; exit 1\n").unwrap();
        let request = InstallRequest::new("foo").unwrap().with_method(Some(Method::Setup));

        let err = installer.install(&request).unwrap_err();
        assert_eq!(err.to_string(), "Failed to install via setup: broken build");
    }

    #[test]
    fn test_setup_install_without_product_dir_fails() {
        let (dir, installer) = setup_tests();
        let installer = installer.with_python("sh");
        assert!(!dir.path().join("missing").exists());
        let request = InstallRequest::new("missing").unwrap().with_method(Some(Method::Setup));

        match installer.install(&request) {
            Err(InstallError::Execution { method, output }) => {
                assert_eq!(method, Method::Setup);
                assert!(!output.is_empty());
            }
            other => panic!("expected an execution error, got {other:?}"),
        }
        assert_eq!(entries(dir.path()), Vec::<String>::new());
    }

    #[test]
    fn test_unsupported_method_has_no_side_effects() {
        let (dir, installer) = setup_tests();
        let request = InstallRequest::new("foo")
            .unwrap()
            .with_method(Method::parse_optional(""))
            .with_modules_dir(Some(dir.path().join("mods")));
        let before = entries(dir.path());

        let err = installer.install(&request).unwrap_err();

        assert!(matches!(err, InstallError::UnsupportedMethod { .. }));
        assert!(err.to_string().contains("foo"));
        assert_eq!(entries(dir.path()), before);
    }
}
