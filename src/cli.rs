//! # Inputs
//!
//! Named configuration parameters of a generation run.
//!
//! Every parameter is a long flag and can also be supplied through the
//! environment variable a GitHub Actions runner sets for an action input
//! (`INPUT_<NAME>`, name upper-cased), so the same binary works as a CLI and
//! as a container action step:
//!
//! ```bash
//! k8s-manifest-generator --registry ghcr.io --owner acme --path ./app
//!
//! INPUT_REGISTRY=ghcr.io INPUT_OWNER=acme k8s-manifest-generator
//! ```
//!
//! Values are kept as raw text here. Defaults and numeric parsing are applied
//! by [`crate::config::Configuration::from_inputs`], which treats empty
//! values the same as absent ones.

use clap::builder::FalseyValueParser;
use clap::Parser;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    ", built ",
    env!("BUILD_DATETIME"),
    ")"
);

/// Generate an all-in-one Kubernetes manifest bundle
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "k8s-manifest-generator")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Generate a ConfigMap, Service, Deployment and HorizontalPodAutoscaler bundle",
    long_about = None,
    after_help = "\
Input files (relative to --path):
  .env             environment variables for the ConfigMap (optional, see --env-name)
  package.json     name, version and author of the application (required)
  build-info.json  {\"buildNumber\": N} appended to the image tag (optional)

Output:
  <directory-path>/all-in-one.yaml
"
)]
pub struct Inputs {
    /// Base directory containing the input files
    #[arg(long, env = "INPUT_PATH", value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Enable debug logging ("true" enables it when set through the environment)
    #[arg(long, env = "INPUT_VERBOSE", value_parser = FalseyValueParser::new())]
    pub verbose: bool,

    /// Value of the app.kubernetes.io/instance label
    #[arg(long, env = "INPUT_INSTANCE")]
    pub instance: Option<String>,

    /// Namespace of every generated object [default: default]
    #[arg(long, env = "INPUT_NAMESPACE")]
    pub namespace: Option<String>,

    /// Service type [default: ClusterIP]
    #[arg(long, env = "INPUT_SERVICETYPE")]
    pub service_type: Option<String>,

    /// Port the Service exposes inside the cluster [default: 8080]
    #[arg(long, env = "INPUT_TARGETPORT", value_name = "PORT")]
    pub target_port: Option<String>,

    /// Deployment replica count [default: 1]
    #[arg(long, env = "INPUT_REPLICAS", value_name = "N")]
    pub replicas: Option<String>,

    /// Container registry host, e.g. ghcr.io (required)
    #[arg(long, env = "INPUT_REGISTRY")]
    pub registry: Option<String>,

    /// Registry owner or organisation (required)
    #[arg(long, env = "INPUT_OWNER")]
    pub owner: Option<String>,

    /// Autoscaler lower bound [default: 1]
    #[arg(long, env = "INPUT_MINREPLICAS", value_name = "N")]
    pub min_replicas: Option<String>,

    /// Autoscaler upper bound [default: 3]
    #[arg(long, env = "INPUT_MAXREPLICAS", value_name = "N")]
    pub max_replicas: Option<String>,

    /// Autoscaler CPU utilisation target in percent [default: 80]
    #[arg(long, env = "INPUT_TARGETCPUUTILIZATIONPERCENTAGE", value_name = "PERCENT")]
    pub target_cpu_utilization_percentage: Option<String>,

    /// Output directory, created if missing [default: ./k8s]
    #[arg(long, env = "INPUT_DIRECTORYPATH", value_name = "DIR")]
    pub directory_path: Option<String>,

    /// Image pull secret attached to the pod, none when omitted
    #[arg(long, env = "INPUT_IMAGEPULLSECRETSNAME", value_name = "SECRET")]
    pub image_pull_secrets_name: Option<String>,

    /// Environment file name inside --path [default: .env]
    #[arg(long, env = "INPUT_ENVNAME", value_name = "FILE")]
    pub env_name: Option<String>,
}
