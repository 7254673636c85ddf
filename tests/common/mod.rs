//! Integration tests for loman
//!
//! These tests verify end-to-end behavior by laying out real manifest files
//! and executing add operations through the command-line interface.

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const UTF8_DECL: &str = "<?xml version='1.0' encoding='UTF-8'?>\n";

/// Helper to create a default manifest next to an (initially empty) local one
#[allow(unused)]
pub fn create_test_manifests() -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();

    let default = temp.path().join("default.xml");
    fs::write(
        &default,
        "<manifest>\n\
         <project name=\"foo\" path=\"path/to/foo\" />\n\
         <project name=\"bar\" path=\"path/to/bar\" />\n\
         </manifest>\n",
    )
    .unwrap();

    let local = temp.path().join("local_manifest.xml");
    fs::write(&local, "<manifest>\n</manifest>").unwrap();

    (temp, default, local)
}

/// Helper to run an add command
pub fn run_add(
    local: &Path,
    default: &Path,
    project: &str,
    extra_args: &[&str],
) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("loman");
    cmd.arg("add")
        .arg("--workon")
        .arg("-f")
        .arg(local)
        .arg("-d")
        .arg(default)
        .arg(project)
        .args(extra_args);

    cmd.assert()
}
