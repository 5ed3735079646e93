//! Common test utilities for generation tests
//!
//! Builds a throwaway project directory with the usual input files and the
//! [`Inputs`] pointing at it.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use k8s_manifest_generator::Inputs;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PACKAGE_JSON: &str = r#"{
  "name": "orders-api",
  "version": "1.4.0",
  "author": "Jane Doe",
  "dependencies": {"express": "^4.19.2"}
}"#;

/// Project directory with its output directory nested inside
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    /// Project with `package.json` only
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        };
        fixture.write("package.json", PACKAGE_JSON);
        fixture
    }

    pub fn with_env(self, content: &str) -> Self {
        self.write(".env", content);
        self
    }

    pub fn with_build_number(self, build_number: u64) -> Self {
        self.write(
            "build-info.json",
            &format!(r#"{{"buildNumber": {build_number}}}"#),
        );
        self
    }

    pub fn write(&self, name: &str, content: &str) {
        fs::write(self.path().join(name), content).expect("Failed to write fixture file");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Output directory used by [`Fixture::inputs`]; not created up front
    pub fn output_dir(&self) -> PathBuf {
        self.path().join("out").join("k8s")
    }

    pub fn bundle_path(&self) -> PathBuf {
        self.output_dir().join("all-in-one.yaml")
    }

    /// Inputs with the required parameters and paths inside the fixture
    pub fn inputs(&self) -> Inputs {
        Inputs {
            path: Some(self.path().to_path_buf()),
            registry: Some("ghcr.io".to_string()),
            owner: Some("acme".to_string()),
            directory_path: Some(self.output_dir().to_string_lossy().into_owned()),
            ..Inputs::default()
        }
    }

    pub fn read_bundle(&self) -> String {
        fs::read_to_string(self.bundle_path()).expect("Bundle should have been written")
    }

    /// The bundle split into parsed YAML documents
    pub fn documents(&self) -> Vec<serde_yaml::Value> {
        self.read_bundle()
            .split("\n---\n")
            .map(|doc| serde_yaml::from_str(doc).expect("Each document should be valid YAML"))
            .collect()
    }
}
