//! Integration tests for the lockcheck CLI

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn lockcheck(workdir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_lockcheck"));
    command
        .current_dir(workdir)
        .env_remove("LOCKCHECK_CACHE_DIR")
        .env_remove("LOCKCHECK_REQUIREMENTS_DIR")
        .env_remove("LOCKCHECK_TOOL")
        .env_remove("RUST_LOG");
    command
}

fn run(command: &mut Command) -> Output {
    command.output().expect("Failed to execute lockcheck")
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    let output = run(lockcheck(dir.path()).arg("--version"));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lockcheck"));
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = run(lockcheck(dir.path()).arg("--help"));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Verify that locked dependency files match"));
    assert!(stdout.contains("--force"));
    assert!(stdout.contains("--lock"));
}

#[test]
fn test_cli_invalid_argument() {
    let dir = TempDir::new().unwrap();
    let output = run(lockcheck(dir.path()).arg("--no-such-flag"));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected argument"));
}

#[test]
fn test_no_lock_files_configured() {
    let dir = TempDir::new().unwrap();
    let output = run(lockcheck(dir.path())
        .arg("--tool")
        .arg("update-locked")
        .arg("--cache-dir")
        .arg(dir.path().join("cache")));

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "));
    assert!(stderr.contains("Hint:"));
}

#[test]
fn test_missing_tool_is_reported() {
    let dir = TempDir::new().unwrap();
    let output = run(lockcheck(dir.path())
        .args(["--lock", "dev.txt"])
        .arg("--cache-dir")
        .arg(dir.path().join("cache")));

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tool.program"));
}

#[test]
fn test_invalid_lock_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = run(lockcheck(dir.path())
        .args(["--lock", "../dev.txt", "--tool", "update-locked"])
        .arg("--cache-dir")
        .arg(dir.path().join("cache")));

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
mod with_tool {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    const DEV_LOCK: &str = "attrs==23.1.0\npytest==7.4.0\n";
    const PROD_LOCK: &str = "requests==2.31.0\nurllib3==2.0.4\n";

    /// Checkout with spec files, lock files and a fake update tool that
    /// writes the contents of `generated/` into its output directory
    struct Checkout {
        dir: TempDir,
    }

    impl Checkout {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let root = dir.path();

            let requirements = root.join("requirements");
            std::fs::create_dir(&requirements).unwrap();
            std::fs::write(requirements.join("dev.in"), "pytest\n").unwrap();
            std::fs::write(requirements.join("prod.in"), "requests\n").unwrap();
            std::fs::write(requirements.join("dev.txt"), DEV_LOCK).unwrap();
            std::fs::write(requirements.join("prod.txt"), PROD_LOCK).unwrap();

            let generated = root.join("generated");
            std::fs::create_dir(&generated).unwrap();
            std::fs::write(generated.join("dev.txt"), DEV_LOCK).unwrap();
            std::fs::write(generated.join("prod.txt"), PROD_LOCK).unwrap();

            let tool = root.join("update-locked");
            std::fs::write(
                &tool,
                format!(
                    "#!/bin/sh\nset -e\n[ \"$1\" = \"--output-dir\" ]\ncp \"{}\"/*.txt \"$2\"\n",
                    generated.display()
                ),
            )
            .unwrap();
            std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

            std::fs::write(
                root.join("lockcheck.toml"),
                format!(
                    "[paths]\nrequirements_dir = \"requirements\"\ncache_dir = \"{}\"\n\n\
                     [locks]\nnames = [\"dev.txt\", \"prod.txt\"]\n\n\
                     [tool]\nprogram = \"{}\"\n",
                    root.join("cache").display(),
                    tool.display()
                ),
            )
            .unwrap();

            Self { dir }
        }

        fn root(&self) -> &Path {
            self.dir.path()
        }

        fn generate(&self, name: &str, contents: &str) {
            std::fs::write(self.root().join("generated").join(name), contents).unwrap();
        }

        fn cache_file(&self) -> std::path::PathBuf {
            self.root().join("cache").join("lock_hashes.json")
        }

        fn cached_hashes(&self) -> Vec<String> {
            let contents = std::fs::read_to_string(self.cache_file()).unwrap();
            serde_json::from_str(&contents).unwrap()
        }
    }

    #[test]
    fn test_consistent_locks_pass_silently() {
        let checkout = Checkout::new();
        let output = run(&mut lockcheck(checkout.root()));

        assert!(output.status.success());
        assert!(output.stdout.is_empty());
        assert!(output.stderr.is_empty());

        let hashes = checkout.cached_hashes();
        assert_eq!(hashes.len(), 1);
        assert_eq!(hashes[0].len(), 40);
    }

    #[test]
    fn test_second_run_hits_the_cache() {
        let checkout = Checkout::new();
        assert!(run(&mut lockcheck(checkout.root())).status.success());

        // A tool that would now disagree is never consulted
        checkout.generate("dev.txt", "attrs==23.2.0\npytest==7.4.0\n");
        let output = run(lockcheck(checkout.root()).arg("--verbose"));

        assert!(output.status.success());
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("already verified"));
        assert_eq!(checkout.cached_hashes().len(), 1);
    }

    #[test]
    fn test_force_regenerates_known_inputs() {
        let checkout = Checkout::new();
        assert!(run(&mut lockcheck(checkout.root())).status.success());

        checkout.generate("dev.txt", "attrs==23.2.0\npytest==7.4.0\n");
        let output = run(lockcheck(checkout.root()).arg("--force"));

        assert_eq!(output.status.code(), Some(1));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("-attrs==23.1.0"));
        assert!(stdout.contains("+attrs==23.2.0"));
    }

    #[test]
    fn test_stale_lock_prints_diff_and_fails() {
        let checkout = Checkout::new();
        checkout.generate("prod.txt", "requests==2.31.0\nurllib3==2.0.5\n");

        let output = run(&mut lockcheck(checkout.root()));

        assert_eq!(output.status.code(), Some(1));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("prod.txt"));
        assert!(!stdout.contains("dev.txt"));
        assert!(stdout.contains("-urllib3==2.0.4"));
        assert!(stdout.contains("+urllib3==2.0.5"));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.starts_with("Error: "));
        assert!(stderr.contains("out of date"));
        assert!(stderr.contains("prod.txt"));

        // The regenerated inputs are recorded even though the run failed
        assert_eq!(checkout.cached_hashes().len(), 1);
    }

    #[test]
    fn test_committing_regenerated_locks_passes() {
        let checkout = Checkout::new();
        let updated = "requests==2.31.0\nurllib3==2.0.5\n";
        checkout.generate("prod.txt", updated);
        assert_eq!(run(&mut lockcheck(checkout.root())).status.code(), Some(1));

        std::fs::write(
            checkout.root().join("requirements").join("prod.txt"),
            updated,
        )
        .unwrap();
        let output = run(lockcheck(checkout.root()).arg("--verbose"));

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("already verified"));
    }

    #[test]
    fn test_failing_tool_leaves_cache_empty() {
        let checkout = Checkout::new();
        std::fs::remove_dir_all(checkout.root().join("generated")).unwrap();

        let output = run(&mut lockcheck(checkout.root()));

        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Code: verify.tool_failed"));
        assert!(checkout.cached_hashes().is_empty());
    }

    #[test]
    fn test_lock_flag_narrows_the_checked_set() {
        let checkout = Checkout::new();
        checkout.generate("prod.txt", "requests==2.32.0\nurllib3==2.0.4\n");

        let output = run(lockcheck(checkout.root()).args(["--lock", "dev.txt"]));

        assert!(output.status.success());
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn test_env_overrides_cache_dir() {
        let checkout = Checkout::new();
        let cache = TempDir::new().unwrap();

        let output = run(lockcheck(checkout.root()).env("LOCKCHECK_CACHE_DIR", cache.path()));

        assert!(output.status.success());
        assert!(cache.path().join("lock_hashes.json").exists());
        assert!(!checkout.cache_file().exists());
    }
}
