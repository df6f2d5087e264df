//! Test helpers for the wavefront workspace
//!
//! Locates the workspace root and the directory where tests drop rendered
//! plots and other artifacts for manual inspection.

use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

/// Error type for test helper operations
#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    #[error("Failed to find workspace root: {0}")]
    WorkspaceRootNotFound(String),
}

/// Walk up from `start` to the first directory whose Cargo.toml declares a
/// `[workspace]`.
pub fn find_workspace_root_from(start: &Path) -> Result<PathBuf, TestHelperError> {
    let mut dir = start.to_path_buf();
    loop {
        let manifest = dir.join("Cargo.toml");
        if manifest.exists() {
            let content = std::fs::read_to_string(&manifest).map_err(|e| {
                TestHelperError::WorkspaceRootNotFound(format!(
                    "Failed to read {}: {e}",
                    manifest.display()
                ))
            })?;
            if content.contains("[workspace]") {
                return Ok(dir);
            }
        }

        if !dir.pop() {
            return Err(TestHelperError::WorkspaceRootNotFound(format!(
                "no workspace manifest above {}",
                start.display()
            )));
        }
    }
}

/// Workspace root, searched from the current directory
pub fn find_workspace_root() -> Result<PathBuf, TestHelperError> {
    let cwd = env::current_dir().map_err(|e| {
        TestHelperError::WorkspaceRootNotFound(format!("Failed to get current directory: {e}"))
    })?;
    find_workspace_root_from(&cwd)
}

static WORKSPACE_ROOT: Lazy<PathBuf> =
    Lazy::new(|| find_workspace_root().expect("Failed to find workspace root directory"));

/// Directory for test artifacts, `<workspace>/test_output`, created on demand.
pub fn get_output_dir() -> PathBuf {
    let output_dir = WORKSPACE_ROOT.join("test_output");
    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir).expect("Failed to create output directory");
    }
    output_dir
}

/// Path of `name` inside the artifact directory
pub fn output_path<P: AsRef<Path>>(name: P) -> PathBuf {
    get_output_dir().join(name)
}
