//! Common test utilities for Requisite integration tests
//!
//! The host installer is replaced by `install.sh` in the project directory,
//! run as `sh install.sh <whitelist>...`.

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Installer script that records its whitelist and root requirements
pub const RECORDING_INSTALLER: &str = r#"printf '%s\n' "$@" > whitelist.txt
printf '%s' "$REQUISITE_ROOT_REQUIRES" > root.json
if [ -f next.lock ]; then mv next.lock manifest.lock; fi
exit "${INSTALL_STATUS:-0}"
"#;

/// A temp project for integration tests
pub struct TestProject {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestProject {
    /// Project with `manifest.json` and the recording installer configured
    pub fn new(manifest: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let project = Self { temp, path };

        project.write_file("manifest.json", manifest);
        project.write_file("install.sh", RECORDING_INSTALLER);
        project.write_file(
            "requisite.yaml",
            "installer:\n  program: sh\n  args: [install.sh]\n",
        );
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Read a JSON file from the project
    #[allow(dead_code)]
    pub fn read_json(&self, path: &str) -> serde_json::Value {
        serde_json::from_str(&self.read_file(path)).expect("Failed to parse JSON")
    }

    /// Lock state the installer will leave behind on its next run
    #[allow(dead_code)]
    pub fn next_lock(&self, content: &str) {
        self.write_file("next.lock", content);
    }

    /// Lines of the whitelist the installer last ran with
    #[allow(dead_code)]
    pub fn whitelist(&self) -> Vec<String> {
        self.read_file("whitelist.txt")
            .lines()
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// The requisite binary, run non-interactively inside this project
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("requisite").expect("Failed to find requisite binary");
        cmd.current_dir(&self.path)
            .env_remove("REQUISITE_WORKSPACE")
            .env_remove("RUST_LOG")
            .arg("--no-interaction");
        cmd
    }
}
