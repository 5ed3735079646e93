//! # Constants
//!
//! Shared constants used throughout the generator.
//!
//! These values are the defaults applied when an input is absent, empty or
//! not usable; every one of them can be overridden through the CLI flags or
//! the matching `INPUT_*` environment variables.

/// Default base directory for the input files
pub const DEFAULT_PATH: &str = ".";

/// Default name of the environment file, relative to the base directory
pub const DEFAULT_ENV_NAME: &str = ".env";

/// Default output directory, relative to the working directory
pub const DEFAULT_DIRECTORY_PATH: &str = "./k8s";

/// Package descriptor file name, relative to the base directory
pub const PACKAGE_FILE_NAME: &str = "package.json";

/// Build descriptor file name, relative to the base directory
pub const BUILD_INFO_FILE_NAME: &str = "build-info.json";

/// Name of the rendered bundle inside the output directory
pub const BUNDLE_FILE_NAME: &str = "all-in-one.yaml";

/// Separator placed between YAML documents in the bundle
pub const DOCUMENT_SEPARATOR: &str = "\n---\n";

/// Default namespace for every generated object
pub const DEFAULT_NAMESPACE: &str = "default";

/// Default Service type
pub const DEFAULT_SERVICE_TYPE: &str = "ClusterIP";

/// Default external Service port
pub const DEFAULT_TARGET_PORT: i32 = 8080;

/// Default Deployment replica count
pub const DEFAULT_REPLICAS: i32 = 1;

/// Default HorizontalPodAutoscaler lower bound
pub const DEFAULT_MIN_REPLICAS: i32 = 1;

/// Default HorizontalPodAutoscaler upper bound
pub const DEFAULT_MAX_REPLICAS: i32 = 3;

/// Default HorizontalPodAutoscaler CPU target (percent)
pub const DEFAULT_TARGET_CPU_UTILIZATION_PERCENTAGE: i32 = 80;

/// Environment variable holding the container's listening port
pub const PORT_VAR: &str = "PORT";

/// Environment variable holding the container's bind address
pub const HOST_VAR: &str = "HOST";

/// Container listening port when the env file does not set a numeric `PORT`
pub const DEFAULT_CONTAINER_PORT: i32 = 3000;

/// Container bind address when the env file does not set `HOST`
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Prefix of the recommended Kubernetes application labels
pub const LABEL_PREFIX: &str = "app.kubernetes.io";

/// Image pull policy for the application container
pub const IMAGE_PULL_POLICY: &str = "Always";
