//! # Release
//!
//! Merges the loaded files with the [`Configuration`] into the values every
//! manifest is built from: the release version, the author label value, the
//! container's listening port and the shared [`BaseMetadata`].

use crate::config::Configuration;
use crate::constants::{DEFAULT_CONTAINER_PORT, DEFAULT_NAMESPACE, LABEL_PREFIX, PORT_VAR};
use crate::parser::{BuildDescriptor, EnvMap, LoadedInputs, PackageDescriptor};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

/// Labels and namespace shared by all generated objects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseMetadata {
    pub labels: BTreeMap<String, String>,
    pub namespace: String,
}

impl BaseMetadata {
    pub fn new(name: &str, author: &str, version: &str, instance: &str, namespace: &str) -> Self {
        let labels = [
            ("name", name),
            ("author", author),
            ("version", version),
            ("instance", instance),
        ]
        .into_iter()
        .map(|(key, value)| (format!("{LABEL_PREFIX}/{key}"), value.to_string()))
        .collect();

        let namespace = if namespace.is_empty() {
            DEFAULT_NAMESPACE
        } else {
            namespace
        };

        Self {
            labels,
            namespace: namespace.to_string(),
        }
    }

    /// Object metadata carrying the shared labels and namespace
    pub fn object_meta(&self, name: impl Into<String>) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.into()),
            namespace: Some(self.namespace.clone()),
            labels: Some(self.labels.clone()),
            ..ObjectMeta::default()
        }
    }
}

/// Normalized view of the application being deployed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Package name, also the Deployment and container name
    pub name: String,
    /// `{packageVersion}-{buildNumber}`
    pub version: String,
    /// Author with its first space replaced
    pub author: String,
    /// Port the container listens on (`PORT` from the env file)
    pub internal_port: i32,
    /// Environment for the ConfigMap, `None` when no env file exists
    pub env: Option<EnvMap>,
    pub metadata: BaseMetadata,
}

impl Release {
    pub fn merge(inputs: LoadedInputs, config: &Configuration) -> Self {
        let version = release_version(&inputs.package, inputs.build);
        let author = author_slug(inputs.package.author.name());
        let internal_port = internal_port(inputs.env.as_ref());
        let metadata = BaseMetadata::new(
            &inputs.package.name,
            &author,
            &version,
            &config.instance,
            &config.namespace,
        );

        Self {
            name: inputs.package.name,
            version,
            author,
            internal_port,
            env: inputs.env,
            metadata,
        }
    }

    pub fn config_map_name(&self) -> String {
        format!("{}-config", self.name)
    }

    pub fn service_name(&self) -> String {
        format!("{}-service", self.name)
    }

    pub fn autoscaler_name(&self) -> String {
        format!("{}-autoscaler", self.name)
    }

    /// `{registry}/{owner}/{name}:{version}`
    pub fn image(&self, config: &Configuration) -> String {
        format!(
            "{}/{}/{}:{}",
            config.registry, config.owner, self.name, self.version
        )
    }
}

pub fn release_version(package: &PackageDescriptor, build: BuildDescriptor) -> String {
    format!("{}-{}", package.version, build.build_number)
}

/// Replace the first space only; `"Jane Q Doe"` becomes `"Jane_Q Doe"`
pub fn author_slug(author: &str) -> String {
    author.replacen(' ', "_", 1)
}

/// Container port from `PORT`, falling back to the default
pub fn internal_port(env: Option<&EnvMap>) -> i32 {
    env.and_then(|env| env.get(PORT_VAR))
        .and_then(|port| port.trim().parse().ok())
        .unwrap_or(DEFAULT_CONTAINER_PORT)
}
