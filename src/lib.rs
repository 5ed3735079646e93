//! Kubernetes Manifest Generator Library
//!
//! Turns a project's `package.json`, optional `build-info.json` and optional
//! `.env` file into an `all-in-one.yaml` bundle holding a ConfigMap, a
//! Service, a Deployment and a HorizontalPodAutoscaler.
//!
//! A run is a single synchronous pass through four stages:
//!
//! 1. [`config`] and [`parser`] - apply defaults to the inputs and load the files
//! 2. [`release`] - merge everything into the values the manifests share
//! 3. [`manifest`] - build the typed Kubernetes objects
//! 4. [`render`] - serialize to YAML and write the bundle
//!
//! Tests are included in the module files (e.g., manifest.rs) and under
//! `tests/`.

pub mod actions;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod manifest;
pub mod parser;
pub mod release;
pub mod render;

pub use cli::Inputs;
pub use config::Configuration;
pub use error::GeneratorError;
pub use manifest::ManifestSet;
pub use release::Release;

use std::path::PathBuf;
use tracing::{debug, info};

/// Run the whole pipeline and return the path of the written bundle
///
/// Required parameters are checked before any file is read, and nothing is
/// written unless every input loaded and rendered successfully.
pub fn generate(inputs: &Inputs) -> Result<PathBuf, GeneratorError> {
    let config = Configuration::from_inputs(inputs)?;
    debug!(?config, "Resolved configuration");

    let loaded = parser::load_inputs(&config)?;
    let release = Release::merge(loaded, &config);
    info!(
        name = %release.name,
        version = %release.version,
        namespace = %release.metadata.namespace,
        "Generating manifests"
    );

    let manifests = ManifestSet::build(&release, &config);
    let bundle = render::render_bundle(&manifests)?;
    render::write_bundle(&config.directory_path, &bundle)
}
