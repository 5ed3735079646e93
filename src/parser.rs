//! # Parser
//!
//! Loads the input files of a run.
//!
//! ## Supported Files
//!
//! - **Environment file** (`.env` by default): `KEY=value` lines parsed with
//!   `dotenvy`. Optional; when it is missing no ConfigMap is generated.
//!   Values are taken literally: `$NAME` is never substituted.
//! - **`package.json`**: `name`, `version` and `author`. Required.
//! - **`build-info.json`**: `{"buildNumber": N}`. Optional, defaults to 0.
//!
//! JSON documents are mapped onto typed records, so shape errors (missing
//! `name`, non-numeric `buildNumber`, ...) surface here as
//! [`GeneratorError::Parse`] instead of later during rendering.

use crate::config::Configuration;
use crate::constants::{
    BUILD_INFO_FILE_NAME, DEFAULT_CONTAINER_PORT, DEFAULT_HOST, HOST_VAR, PACKAGE_FILE_NAME,
    PORT_VAR,
};
use crate::error::GeneratorError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Variables of the environment file, sorted by name
pub type EnvMap = BTreeMap<String, String>;

/// Subset of `package.json` the manifests are derived from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    pub author: Author,
}

/// npm `author` field, either `"Name <email> (url)"` or a person object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Text(String),
    Person { name: String },
}

impl Author {
    pub fn name(&self) -> &str {
        match self {
            Author::Text(name) | Author::Person { name } => name,
        }
    }
}

/// Contents of `build-info.json`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDescriptor {
    #[serde(default)]
    pub build_number: u64,
}

/// Everything read from disk for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedInputs {
    /// `None` when the environment file does not exist
    pub env: Option<EnvMap>,
    pub package: PackageDescriptor,
    pub build: BuildDescriptor,
}

/// Load the environment file, package descriptor and build descriptor
pub fn load_inputs(config: &Configuration) -> Result<LoadedInputs, GeneratorError> {
    let env = load_env_file(&config.env_file())?;
    let package = load_package(&config.base_path.join(PACKAGE_FILE_NAME))?;
    let build = load_build_info(&config.base_path.join(BUILD_INFO_FILE_NAME))?;
    debug!(
        package = %package.name,
        version = %package.version,
        build_number = build.build_number,
        "Loaded input files"
    );

    Ok(LoadedInputs {
        env,
        package,
        build,
    })
}

/// Parse the environment file, `Ok(None)` when it does not exist
pub fn load_env_file(path: &Path) -> Result<Option<EnvMap>, GeneratorError> {
    let Some(content) = read_optional(path)? else {
        warn!(
            "Environment file not found at {}, skipping ConfigMap",
            path.display()
        );
        return Ok(None);
    };

    let env = parse_env_content(&content).map_err(|e| GeneratorError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    debug!(
        "Loaded {} variables from {}",
        env.len(),
        path.display()
    );

    Ok(Some(env))
}

/// Parse `.env` content and fill in `PORT` and `HOST`
pub fn parse_env_content(content: &str) -> Result<EnvMap, dotenvy::Error> {
    let literal = escape_substitutions(content);
    let mut env = EnvMap::new();
    for item in dotenvy::from_read_iter(literal.as_bytes()) {
        let (key, value) = item?;
        env.insert(key, value);
    }
    normalize_env(&mut env);
    Ok(env)
}

/// Escape every `$` that `dotenvy` would expand
///
/// Single-quoted values and comments are left alone, since `dotenvy` reads
/// them verbatim. An already escaped `\$` stays as written.
fn escape_substitutions(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    let mut quote: Option<char> = None;
    let mut after_backslash = false;
    let mut in_comment = false;
    let mut previous = '\n';

    for c in content.chars() {
        if in_comment {
            in_comment = c != '\n';
        } else if after_backslash {
            after_backslash = false;
        } else {
            match (quote, c) {
                (Some('\''), '\'') | (Some('"'), '"') => quote = None,
                (Some('\''), _) => {}
                (_, '\\') => after_backslash = true,
                (_, '$') => escaped.push('\\'),
                (None, '\'' | '"') => quote = Some(c),
                (None, '#') if previous.is_whitespace() => in_comment = true,
                _ => {}
            }
        }
        escaped.push(c);
        previous = c;
    }

    escaped
}

/// Ensure `PORT` holds an integer and `HOST` is present
fn normalize_env(env: &mut EnvMap) {
    let port_is_numeric = env
        .get(PORT_VAR)
        .is_some_and(|port| port.trim().parse::<i32>().is_ok());
    if !port_is_numeric {
        if let Some(port) = env.get(PORT_VAR) {
            warn!(
                value = %port,
                "PORT is not an integer, using {}",
                DEFAULT_CONTAINER_PORT
            );
        }
        env.insert(PORT_VAR.to_string(), DEFAULT_CONTAINER_PORT.to_string());
    }

    env.entry(HOST_VAR.to_string())
        .or_insert_with(|| DEFAULT_HOST.to_string());
}

/// Load the required `package.json`
pub fn load_package(path: &Path) -> Result<PackageDescriptor, GeneratorError> {
    let content = read_optional(path)?.ok_or_else(|| GeneratorError::MissingFile {
        path: path.to_path_buf(),
    })?;
    parse_json(path, &content)
}

/// Load the optional `build-info.json`
pub fn load_build_info(path: &Path) -> Result<BuildDescriptor, GeneratorError> {
    match read_optional(path)? {
        Some(content) => parse_json(path, &content),
        None => {
            debug!(
                "{} not found, using build number 0",
                path.display()
            );
            Ok(BuildDescriptor::default())
        }
    }
}

fn parse_json<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, GeneratorError> {
    serde_json::from_str(content).map_err(|e| GeneratorError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Read a file, `Ok(None)` when it does not exist
fn read_optional(path: &Path) -> Result<Option<String>, GeneratorError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(GeneratorError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
