use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::transform::{DEFAULT_AUTH_SCHEME, TransformOptions};

/// Top-level project configuration loaded from `.skyapi.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SkyapiConfig {
    pub input: String,
    pub output: String,
    /// Security scheme name that marks an operation as secured.
    pub auth_scheme: String,
    pub naming: NamingConfig,
    pub client: ClientOptions,
}

impl Default for SkyapiConfig {
    fn default() -> Self {
        Self {
            input: "spec/openapi.yaml".to_string(),
            output: "dist".to_string(),
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
            naming: NamingConfig::default(),
            client: ClientOptions::default(),
        }
    }
}

impl SkyapiConfig {
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            auth_scheme: self.auth_scheme.clone(),
            naming_strategy: self.naming.strategy,
            aliases: self.naming.aliases.clone(),
        }
    }
}

/// Naming strategy and aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub strategy: NamingStrategy,
    /// Map from resolved operation name (operationId or route-derived) to custom alias.
    pub aliases: IndexMap<String, String>,
}

/// How operation names are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    #[default]
    UseOperationId,
    UseRouteBased,
}

/// Options for the generated client module.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Name of the generated client struct.
    pub struct_name: String,
    /// Which config field the origin is derived from when none is given.
    pub origin_convention: OriginConvention,
    /// Path through which the generated module reaches the runtime crate.
    pub runtime_path: String,
    /// Pretty-print the generated source.
    pub format: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            struct_name: "SkyApi".to_string(),
            origin_convention: OriginConvention::Domain,
            runtime_path: "skyapi_runtime".to_string(),
            format: true,
        }
    }
}

/// Origin derivation when no explicit origin is configured: `https://{domain}`
/// or `https://{tenant}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginConvention {
    #[default]
    Domain,
    Tenant,
}

impl OriginConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            OriginConvention::Domain => "Domain",
            OriginConvention::Tenant => "Tenant",
        }
    }
}

/// Artifact produced by a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Dereferenced spec as JSON.
    Json,
    /// Dereferenced spec as YAML.
    Yaml,
    /// Generated client source.
    Source,
}

impl OutputKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputKind::Json => "openapi.json",
            OutputKind::Yaml => "openapi.yaml",
            OutputKind::Source => "client.rs",
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".skyapi.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SkyapiConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# skyapi configuration
input: spec/openapi.yaml
output: dist
auth_scheme: auth0     # security scheme that requires a bearer token

naming:
  strategy: use_operation_id  # use_operation_id | use_route_based
  aliases: {}
    # createDataset: new_dataset

client:
  struct_name: SkyApi
  origin_convention: domain   # domain | tenant
  runtime_path: skyapi_runtime
  format: true
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SkyapiConfig::default();
        assert_eq!(config.input, "spec/openapi.yaml");
        assert_eq!(config.output, "dist");
        assert_eq!(config.auth_scheme, "auth0");
        assert_eq!(config.naming.strategy, NamingStrategy::UseOperationId);
        assert_eq!(config.client.struct_name, "SkyApi");
        assert_eq!(config.client.origin_convention, OriginConvention::Domain);
        assert!(config.client.format);
    }

    #[test]
    fn test_default_content_matches_defaults() {
        let parsed: SkyapiConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        let defaults = SkyapiConfig::default();
        assert_eq!(parsed.input, defaults.input);
        assert_eq!(parsed.output, defaults.output);
        assert_eq!(parsed.auth_scheme, defaults.auth_scheme);
        assert_eq!(parsed.client.runtime_path, defaults.client.runtime_path);
        assert!(parsed.naming.aliases.is_empty());
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
input: api.json
output: out
auth_scheme: oauth
naming:
  strategy: use_route_based
  aliases:
    listDatasets: datasets
client:
  struct_name: Skycatch
  origin_convention: tenant
  format: false
"#;
        let config: SkyapiConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "api.json");
        assert_eq!(config.auth_scheme, "oauth");
        assert_eq!(config.naming.aliases["listDatasets"], "datasets");
        assert_eq!(config.client.origin_convention, OriginConvention::Tenant);
        assert_eq!(config.client.runtime_path, "skyapi_runtime");
        assert!(!config.client.format);

        let options = config.transform_options();
        assert_eq!(options.auth_scheme, "oauth");
        assert_eq!(options.naming_strategy, NamingStrategy::UseRouteBased);
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert!(load_config(&path).unwrap().is_none());

        std::fs::write(&path, "output: generated\n").unwrap();
        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.output, "generated");
        assert_eq!(config.input, "spec/openapi.yaml");

        std::fs::write(&path, "naming: [1, 2]\n").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
