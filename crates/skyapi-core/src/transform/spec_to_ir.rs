use indexmap::IndexMap;

use crate::config::NamingStrategy;
use crate::ir::*;
use crate::parse::operation::Operation;
use crate::parse::parameter::{self, Parameter};
use crate::parse::schema::{Schema, SchemaType};
use crate::parse::security::{SecurityRequirement, SecuritySchemeType};
use crate::parse::spec::SpecDocument;

use super::name_normalizer::{normalize_name, route_to_name};

/// Security scheme name that marks an operation as requiring a bearer token.
pub const DEFAULT_AUTH_SCHEME: &str = "auth0";

/// Options controlling how operations are named and which security scheme
/// is recognized.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    pub auth_scheme: String,
    pub naming_strategy: NamingStrategy,
    pub aliases: IndexMap<String, String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
            naming_strategy: NamingStrategy::default(),
            aliases: IndexMap::new(),
        }
    }
}

/// Transform a loaded document into operation records with default options.
pub fn transform(spec: &SpecDocument) -> IrSpec {
    transform_with_options(spec, &TransformOptions::default())
}

/// Flatten every (path, method) pair of `spec` into an [`OperationRecord`],
/// paths first then methods, both in document order.
pub fn transform_with_options(spec: &SpecDocument, options: &TransformOptions) -> IrSpec {
    let mut operations = Vec::with_capacity(spec.operation_count());

    for (path, item) in &spec.paths {
        for (method, op) in &item.operations {
            let Ok(method) = method.parse::<HttpMethod>() else {
                continue;
            };
            operations.push(build_record(method, path, op, &item.parameters, options));
        }
    }

    let token_url = spec
        .components
        .as_ref()
        .and_then(|c| c.security_schemes.get(&options.auth_scheme))
        .filter(|scheme| scheme.scheme_type == SecuritySchemeType::OAuth2)
        .and_then(|scheme| scheme.flows.as_ref())
        .and_then(|flows| flows.client_credentials.as_ref())
        .and_then(|flow| flow.token_url.clone());

    IrSpec {
        info: IrInfo {
            title: spec.info.title.clone(),
            description: spec.info.description.clone(),
            version: spec.info.version.clone(),
            servers: spec.servers.iter().map(|s| s.url.clone()).collect(),
            token_url,
        },
        operations,
    }
}

fn build_record(
    method: HttpMethod,
    path: &str,
    op: &Operation,
    shared: &[Parameter],
    options: &TransformOptions,
) -> OperationRecord {
    let raw_name = match (options.naming_strategy, &op.operation_id) {
        (NamingStrategy::UseOperationId, Some(id)) => id.clone(),
        _ => route_to_name(method.as_str(), path),
    };
    let name = options.aliases.get(&raw_name).unwrap_or(&raw_name);

    let mut parameters = Vec::new();
    for param in shared {
        let redeclared = op
            .parameters
            .iter()
            .any(|own| own.name == param.name && own.location == param.location);
        if !redeclared {
            parameters.extend(declared_parameter(param, path));
        }
    }
    parameters.extend(op.parameters.iter().filter_map(|p| declared_parameter(p, path)));

    if let Some(schema) = op.request_body.as_ref().and_then(|b| b.json_schema()) {
        for property in body_parameters(schema) {
            let declared = parameters
                .iter()
                .any(|p| p.location == ParameterLocation::Body && p.name == property.name);
            if !declared {
                parameters.push(property);
            }
        }
    }

    OperationRecord {
        name: normalize_name(name),
        method,
        endpoint: path.to_string(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        operation_id: op.operation_id.clone(),
        parameters,
        security: is_secured(op.security.as_deref(), &options.auth_scheme),
        deprecated: op.deprecated,
    }
}

/// True iff some requirement's first key is `scheme`.
pub fn is_secured(security: Option<&[SecurityRequirement]>, scheme: &str) -> bool {
    security
        .unwrap_or_default()
        .iter()
        .any(|requirement| requirement.keys().next().is_some_and(|key| key == scheme))
}

fn declared_parameter(param: &Parameter, path: &str) -> Option<IrParameter> {
    let location = match param.location {
        parameter::ParameterLocation::Path => ParameterLocation::Path,
        parameter::ParameterLocation::Query => ParameterLocation::Query,
        parameter::ParameterLocation::Header => ParameterLocation::Header,
        parameter::ParameterLocation::Body => ParameterLocation::Body,
        parameter::ParameterLocation::Cookie => {
            log::warn!("{path}: dropping cookie parameter `{}`", param.name);
            return None;
        }
        parameter::ParameterLocation::Unknown => {
            log::warn!("{path}: skipping parameter `{}` with no valid location", param.name);
            return None;
        }
    };
    Some(IrParameter {
        name: param.name.clone(),
        location,
        param_type: param.schema.as_ref().map(param_type).unwrap_or_default(),
        required: param.required,
        description: param.description.clone(),
    })
}

fn body_parameters(schema: &Schema) -> Vec<IrParameter> {
    let required = schema.collect_required();
    schema
        .collect_properties()
        .into_iter()
        .map(|(name, property)| IrParameter {
            required: required.contains(&name),
            param_type: param_type(&property),
            description: property.description.clone(),
            location: ParameterLocation::Body,
            name,
        })
        .collect()
}

fn param_type(schema: &Schema) -> ParamType {
    match schema.schema_type.as_ref().and_then(|t| t.primary()) {
        Some(SchemaType::String) => ParamType::String,
        Some(SchemaType::Number) => ParamType::Number,
        Some(SchemaType::Integer) => ParamType::Integer,
        Some(SchemaType::Boolean) => ParamType::Boolean,
        Some(SchemaType::Array) => ParamType::Array,
        Some(SchemaType::Object) => ParamType::Object,
        Some(SchemaType::Null | SchemaType::Unknown) => ParamType::Any,
        None if !schema.properties.is_empty() => ParamType::Object,
        None => ParamType::Any,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirement(keys: &[&str]) -> SecurityRequirement {
        keys.iter().map(|k| (k.to_string(), Vec::new())).collect()
    }

    #[test]
    fn test_is_secured_first_key_only() {
        assert!(is_secured(Some(&[requirement(&["auth0"])]), "auth0"));
        assert!(is_secured(
            Some(&[requirement(&["apiKey"]), requirement(&["auth0"])]),
            "auth0"
        ));
        assert!(!is_secured(Some(&[requirement(&["apiKey", "auth0"])]), "auth0"));
        assert!(!is_secured(Some(&[]), "auth0"));
        assert!(!is_secured(Some(&[requirement(&[])]), "auth0"));
        assert!(!is_secured(None, "auth0"));
    }

    #[test]
    fn test_param_type_from_schema() {
        let schema: Schema = serde_json::from_str(r#"{"type": ["null", "number"]}"#).unwrap();
        assert_eq!(param_type(&schema), ParamType::Number);
        let schema: Schema =
            serde_json::from_str(r#"{"properties": {"a": {"type": "string"}}}"#).unwrap();
        assert_eq!(param_type(&schema), ParamType::Object);
        assert_eq!(param_type(&Schema::default()), ParamType::Any);
    }
}
