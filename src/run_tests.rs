//! Tests for command execution.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use spcache::config::Cli;
use spcache::env::EnvError;

use super::{CACHE_KEY, RunError, execute};

/// Writes `content` to a file named `prefs` inside `dir`.
fn prefs_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("prefs");
    fs::write(&path, content).unwrap();
    path
}

/// Builds a `Cli` for the given argument list.
fn cli(args: &[&str]) -> Cli {
    Cli::parse_from_iter(std::iter::once("spcache").chain(args.iter().copied()))
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

mod set_command {
    use super::*;

    #[test]
    fn updates_an_existing_limit() {
        let dir = TempDir::new().unwrap();
        let path = prefs_file(&dir, "a=1\nstorage.size=512\n");

        let cli = cli(&["set", "--file", &path_arg(&path), "--size", "1024"]);
        execute(&cli).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "a=1\nstorage.size=1024\n"
        );
    }

    #[test]
    fn sets_a_fresh_limit_with_the_default_size() {
        let dir = TempDir::new().unwrap();
        let path = prefs_file(&dir, "a=1\n");

        let cli = cli(&["set", "--file", &path_arg(&path)]);
        execute(&cli).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "a=1\nstorage.size=1024\n"
        );
    }

    #[test]
    fn writes_the_limit_unquoted() {
        let dir = TempDir::new().unwrap();
        let path = prefs_file(&dir, "");

        let cli = cli(&["set", "--file", &path_arg(&path), "--size", "0"]);
        execute(&cli).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "storage.size=0\n");
    }

    #[test]
    fn invalid_line_fails_without_force() {
        let dir = TempDir::new().unwrap();
        let path = prefs_file(&dir, "not-a-valid-line\n");

        let cli = cli(&["set", "--file", &path_arg(&path)]);
        let error = execute(&cli).unwrap_err();

        assert!(matches!(
            error,
            RunError::Env(EnvError::InvalidLine { number: 1, .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not-a-valid-line\n");
    }

    #[test]
    fn force_tolerates_invalid_lines() {
        let dir = TempDir::new().unwrap();
        let path = prefs_file(&dir, "not-a-valid-line\n");

        let cli = cli(&["set", "--file", &path_arg(&path), "--force"]);
        execute(&cli).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "not-a-valid-line\nstorage.size=1024\n"
        );
    }

    #[test]
    fn missing_file_is_an_env_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("prefs");

        let cli = cli(&["set", "--file", &path_arg(&missing)]);
        let error = execute(&cli).unwrap_err();

        assert!(matches!(
            error,
            RunError::Env(EnvError::FileNotFound { .. })
        ));
    }
}

mod get_command {
    use super::*;

    #[test]
    fn reads_the_current_limit() {
        let dir = TempDir::new().unwrap();
        let path = prefs_file(&dir, "storage.size=512\n");

        let cli = cli(&["get", "--file", &path_arg(&path)]);
        execute(&cli).unwrap();
    }

    #[test]
    fn missing_key_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let path = prefs_file(&dir, "a=1\n");

        let cli = cli(&["get", "--file", &path_arg(&path)]);
        execute(&cli).unwrap();
    }

    #[test]
    fn never_modifies_the_file() {
        let dir = TempDir::new().unwrap();
        let source = "a=1\nstorage.size=512\n";
        let path = prefs_file(&dir, source);

        let cli = cli(&["get", "--file", &path_arg(&path)]);
        execute(&cli).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), source);
    }
}

mod cache_key {
    use super::*;

    #[test]
    fn targets_the_storage_size_key() {
        assert_eq!(CACHE_KEY, "storage.size");
    }
}

mod error_mapping {
    use super::*;

    /// Exit codes are opaque (`ExitCode` has no equality), so the mapping
    /// is pinned through its `Debug` form.
    fn code(error: &RunError) -> String {
        format!("{:?}", error.exit_code())
    }

    #[test]
    fn detection_failures_share_a_code() {
        assert_eq!(
            code(&RunError::Detection),
            code(&RunError::DetectionWithFileOption)
        );
    }

    #[test]
    fn invalid_line_gets_its_own_code() {
        let invalid = RunError::Env(EnvError::InvalidLine {
            number: 1,
            preview: String::new(),
        });
        assert_ne!(code(&invalid), code(&RunError::Detection));
        assert_ne!(code(&invalid), code(&RunError::Aborted));
    }

    #[test]
    fn aborting_is_a_generic_failure() {
        let not_found = RunError::Env(EnvError::FileNotFound {
            path: PathBuf::from("/tmp/x"),
        });
        assert_eq!(code(&RunError::Aborted), code(&not_found));
    }
}
