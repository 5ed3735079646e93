//! # Manifests
//!
//! Builds the Kubernetes objects of the bundle from a [`Release`] and the
//! [`Configuration`], using the typed `k8s-openapi` resources so every field
//! is checked at compile time.
//!
//! | Object | apiVersion | Name |
//! |---|---|---|
//! | ConfigMap | `v1` | `{name}-config` |
//! | Service | `v1` | `{name}-service` |
//! | Deployment | `apps/v1` | `{name}` |
//! | HorizontalPodAutoscaler | `autoscaling/v1` | `{name}-autoscaler` |
//!
//! The ConfigMap only exists when an environment file was found; the
//! Deployment's `envFrom` follows it. No numeric range validation is done
//! (e.g. `minReplicas <= maxReplicas` is not enforced).

use crate::config::Configuration;
use crate::constants::IMAGE_PULL_POLICY;
use crate::error::GeneratorError;
use crate::release::Release;
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::autoscaling::v1::{
    CrossVersionObjectReference, HorizontalPodAutoscaler, HorizontalPodAutoscalerSpec,
};
use k8s_openapi::api::core::v1::{
    ConfigMap, ConfigMapEnvSource, Container, ContainerPort, EnvFromSource,
    LocalObjectReference, PodSpec, PodTemplateSpec, Service, ServicePort, ServiceSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use k8s_openapi::Resource;

/// The objects of one bundle, in output order
#[derive(Debug, Clone)]
pub struct ManifestSet {
    pub config_map: Option<ConfigMap>,
    pub service: Service,
    pub deployment: Deployment,
    pub autoscaler: HorizontalPodAutoscaler,
}

impl ManifestSet {
    pub fn build(release: &Release, config: &Configuration) -> Self {
        Self {
            config_map: config_map(release),
            service: service(release, config),
            deployment: deployment(release, config),
            autoscaler: autoscaler(release, config),
        }
    }

    /// Each object as a YAML tree, in bundle order
    pub fn documents(&self) -> Result<Vec<serde_yaml::Value>, GeneratorError> {
        let mut documents = Vec::with_capacity(4);
        if let Some(config_map) = &self.config_map {
            documents.push(serde_yaml::to_value(config_map)?);
        }
        documents.push(serde_yaml::to_value(&self.service)?);
        documents.push(serde_yaml::to_value(&self.deployment)?);
        documents.push(serde_yaml::to_value(&self.autoscaler)?);
        Ok(documents)
    }
}

/// ConfigMap holding the whole environment, `None` without an env file
pub fn config_map(release: &Release) -> Option<ConfigMap> {
    let env = release.env.as_ref()?;
    Some(ConfigMap {
        metadata: release.metadata.object_meta(release.config_map_name()),
        data: Some(env.clone()),
        ..ConfigMap::default()
    })
}

/// Service mapping the configured port to the container's port
pub fn service(release: &Release, config: &Configuration) -> Service {
    Service {
        metadata: release.metadata.object_meta(release.service_name()),
        spec: Some(ServiceSpec {
            type_: Some(config.service_type.clone()),
            selector: Some(release.metadata.labels.clone()),
            ports: Some(vec![ServicePort {
                port: config.target_port,
                target_port: Some(IntOrString::Int(release.internal_port)),
                protocol: Some("TCP".to_string()),
                ..ServicePort::default()
            }]),
            ..ServiceSpec::default()
        }),
        ..Service::default()
    }
}

pub fn deployment(release: &Release, config: &Configuration) -> Deployment {
    let env_from = release.env.as_ref().map(|_| {
        vec![EnvFromSource {
            config_map_ref: Some(ConfigMapEnvSource {
                name: release.config_map_name(),
                ..ConfigMapEnvSource::default()
            }),
            ..EnvFromSource::default()
        }]
    });

    let image_pull_secrets = config
        .image_pull_secrets_name
        .as_ref()
        .map(|name| vec![LocalObjectReference { name: name.clone() }]);

    Deployment {
        metadata: release.metadata.object_meta(release.name.clone()),
        spec: Some(DeploymentSpec {
            replicas: Some(config.replicas),
            selector: LabelSelector {
                match_labels: Some(release.metadata.labels.clone()),
                ..LabelSelector::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(release.metadata.labels.clone()),
                    ..ObjectMeta::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: release.name.clone(),
                        image: Some(release.image(config)),
                        ports: Some(vec![ContainerPort {
                            container_port: release.internal_port,
                            ..ContainerPort::default()
                        }]),
                        env_from,
                        image_pull_policy: Some(IMAGE_PULL_POLICY.to_string()),
                        ..Container::default()
                    }],
                    image_pull_secrets,
                    ..PodSpec::default()
                }),
            },
            ..DeploymentSpec::default()
        }),
        ..Deployment::default()
    }
}

/// CPU-based autoscaler targeting the Deployment
pub fn autoscaler(release: &Release, config: &Configuration) -> HorizontalPodAutoscaler {
    HorizontalPodAutoscaler {
        metadata: release.metadata.object_meta(release.autoscaler_name()),
        spec: Some(HorizontalPodAutoscalerSpec {
            scale_target_ref: CrossVersionObjectReference {
                api_version: Some(Deployment::API_VERSION.to_string()),
                kind: Deployment::KIND.to_string(),
                name: release.name.clone(),
            },
            min_replicas: Some(config.min_replicas),
            max_replicas: config.max_replicas,
            target_cpu_utilization_percentage: Some(config.target_cpu_utilization_percentage),
        }),
        ..HorizontalPodAutoscaler::default()
    }
}
