//! # Configuration
//!
//! Normalized configuration record of a run, built once from [`Inputs`] and
//! passed by reference to every later stage.
//!
//! Optional parameters fall back to the defaults in [`crate::constants`]
//! when they are absent or empty. Numeric parameters additionally fall back
//! when they are not an integer or are zero. `registry` and `owner` have no
//! default and must be non-empty.

use crate::cli::Inputs;
use crate::constants::{
    DEFAULT_DIRECTORY_PATH, DEFAULT_ENV_NAME, DEFAULT_MAX_REPLICAS, DEFAULT_MIN_REPLICAS,
    DEFAULT_NAMESPACE, DEFAULT_PATH, DEFAULT_REPLICAS, DEFAULT_SERVICE_TYPE,
    DEFAULT_TARGET_CPU_UTILIZATION_PERCENTAGE, DEFAULT_TARGET_PORT,
};
use crate::error::GeneratorError;
use std::path::PathBuf;
use tracing::warn;

/// Configuration of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Directory the input files are resolved against
    pub base_path: PathBuf,
    /// Environment file name inside `base_path`
    pub env_name: String,
    /// Directory the bundle is written to
    pub directory_path: PathBuf,
    /// Value of the `app.kubernetes.io/instance` label (may be empty)
    pub instance: String,
    pub namespace: String,
    pub service_type: String,
    /// External Service port; not the container's listening port
    pub target_port: i32,
    pub replicas: i32,
    pub registry: String,
    pub owner: String,
    pub min_replicas: i32,
    pub max_replicas: i32,
    pub target_cpu_utilization_percentage: i32,
    /// Pull secret attached to the pod spec when set
    pub image_pull_secrets_name: Option<String>,
}

impl Configuration {
    /// Apply defaults to the raw inputs and check the required parameters
    ///
    /// `registry` is checked before `owner`.
    pub fn from_inputs(inputs: &Inputs) -> Result<Self, GeneratorError> {
        let registry = required_text("registry", inputs.registry.as_deref())?;
        let owner = required_text("owner", inputs.owner.as_deref())?;

        Ok(Self {
            base_path: inputs
                .path
                .clone()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PATH)),
            env_name: text_or_default(inputs.env_name.as_deref(), DEFAULT_ENV_NAME),
            directory_path: PathBuf::from(text_or_default(
                inputs.directory_path.as_deref(),
                DEFAULT_DIRECTORY_PATH,
            )),
            instance: text_or_default(inputs.instance.as_deref(), ""),
            namespace: text_or_default(inputs.namespace.as_deref(), DEFAULT_NAMESPACE),
            service_type: text_or_default(inputs.service_type.as_deref(), DEFAULT_SERVICE_TYPE),
            target_port: int_or_default(
                "targetPort",
                inputs.target_port.as_deref(),
                DEFAULT_TARGET_PORT,
            ),
            replicas: int_or_default("replicas", inputs.replicas.as_deref(), DEFAULT_REPLICAS),
            registry,
            owner,
            min_replicas: int_or_default(
                "minReplicas",
                inputs.min_replicas.as_deref(),
                DEFAULT_MIN_REPLICAS,
            ),
            max_replicas: int_or_default(
                "maxReplicas",
                inputs.max_replicas.as_deref(),
                DEFAULT_MAX_REPLICAS,
            ),
            target_cpu_utilization_percentage: int_or_default(
                "targetCPUUtilizationPercentage",
                inputs.target_cpu_utilization_percentage.as_deref(),
                DEFAULT_TARGET_CPU_UTILIZATION_PERCENTAGE,
            ),
            image_pull_secrets_name: inputs
                .image_pull_secrets_name
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }

    /// Path of the environment file
    pub fn env_file(&self) -> PathBuf {
        self.base_path.join(&self.env_name)
    }
}

/// Non-empty trimmed value or the error naming the parameter
fn required_text(name: &'static str, value: Option<&str>) -> Result<String, GeneratorError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(GeneratorError::MissingRequiredParameter { name })
}

/// Read text input or return default value
fn text_or_default(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Read integer input or return default value
///
/// Zero counts as "not provided".
fn int_or_default(name: &str, value: Option<&str>, default: i32) -> i32 {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return default;
    };

    match raw.parse::<i32>() {
        Ok(0) => default,
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(
                parameter = name,
                value = raw,
                error = %e,
                "Ignoring non-numeric input, using default {}",
                default
            );
            default
        }
    }
}
