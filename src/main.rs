//! # Kubernetes Manifest Generator
//!
//! Generates `all-in-one.yaml` (ConfigMap, Service, Deployment,
//! HorizontalPodAutoscaler) for a Node-style project.
//!
//! ## Overview
//!
//! 1. **Reading inputs** - flags or `INPUT_*` variables, `package.json`,
//!    `build-info.json` and the `.env` file
//! 2. **Merging** - version `{version}-{buildNumber}`, author label, ports
//! 3. **Rendering** - typed Kubernetes objects serialized to YAML
//! 4. **Writing** - `<directory-path>/all-in-one.yaml`
//!
//! ## Usage
//!
//! ```bash
//! k8s-manifest-generator --registry ghcr.io --owner acme --path ./service
//! ```
//!
//! Logging goes to stderr. `--verbose` (or `INPUT_VERBOSE=true`) enables
//! debug output; `RUST_LOG` overrides both.

use anyhow::{Context, Result};
use clap::Parser;
use k8s_manifest_generator::{actions, generate, Inputs};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};

fn main() -> ExitCode {
    let inputs = Inputs::parse();
    init_tracing(inputs.verbose);

    debug!(
        "Build info: git_hash={}, datetime={}",
        env!("BUILD_GIT_HASH"),
        env!("BUILD_DATETIME")
    );

    match run(&inputs) {
        Ok(path) => {
            info!("Manifest bundle created at {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            let message = format!("{e:#}");
            eprintln!("Error: {message}");
            if actions::running_in_github_actions() {
                println!("{}", actions::error_annotation(&message));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(inputs: &Inputs) -> Result<PathBuf> {
    generate(inputs)
        .inspect_err(|e| error!(kind = e.kind(), "Generation failed: {e}"))
        .context("Failed to generate Kubernetes manifests")
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "k8s_manifest_generator=debug"
    } else {
        "k8s_manifest_generator=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
