use std::collections::HashSet;

use minijinja::Environment;
use serde::Serialize;
use skyapi_core::config::ClientOptions;
use skyapi_core::ir::{IrSpec, OperationRecord, ParameterLocation};

use super::format;
use super::naming::method_ident;
use crate::error::RenderError;

const CLIENT_TEMPLATE: &str = "client.rs.j2";
const METHOD_TEMPLATE: &str = "method.rs.j2";

#[derive(Serialize)]
struct ClientContext<'a> {
    runtime: &'a str,
    struct_name: &'a str,
    origin_convention: &'static str,
    doc: Vec<String>,
    methods: Vec<String>,
}

#[derive(Serialize)]
struct MethodContext<'a> {
    runtime: &'a str,
    fn_name: String,
    doc: Vec<String>,
    method: &'static str,
    endpoint: &'a str,
    security: bool,
    deprecated: bool,
    has_params: bool,
    path_params: Vec<PathPlacement<'a>>,
    query_params: Vec<&'a str>,
    header_params: Vec<&'a str>,
    body_params: Vec<&'a str>,
}

#[derive(Serialize)]
struct PathPlacement<'a> {
    name: &'a str,
    placeholder: String,
}

/// Quote a string as a Rust string literal.
fn rust_str(value: String) -> String {
    format!("{value:?}")
}

fn environment() -> Result<Environment<'static>, RenderError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("rust_str", rust_str);
    env.add_template(CLIENT_TEMPLATE, include_str!("../../templates/client.rs.j2"))?;
    env.add_template(METHOD_TEMPLATE, include_str!("../../templates/method.rs.j2"))?;
    Ok(env)
}

/// Render the client module for `ir`: the base template wraps one method
/// partial per operation record. Records whose method name was already
/// taken are skipped.
pub fn emit_client(ir: &IrSpec, options: &ClientOptions) -> Result<String, RenderError> {
    let env = environment()?;
    let method_tmpl = env.get_template(METHOD_TEMPLATE)?;

    let mut seen = HashSet::new();
    let mut methods = Vec::with_capacity(ir.operations.len());
    for op in &ir.operations {
        let ctx = method_context(op, &options.runtime_path);
        if !seen.insert(ctx.fn_name.clone()) {
            log::warn!(
                "skipping {} {}: method `{}` is already defined",
                op.method,
                op.endpoint,
                ctx.fn_name
            );
            continue;
        }
        methods.push(method_tmpl.render(&ctx)?);
    }

    let source = env.get_template(CLIENT_TEMPLATE)?.render(ClientContext {
        runtime: &options.runtime_path,
        struct_name: &options.struct_name,
        origin_convention: options.origin_convention.as_str(),
        doc: client_doc(ir),
        methods,
    })?;

    let banner = format!(
        "Generated by skyapi from {} {}. Do not edit by hand.",
        single_line(&ir.info.title),
        single_line(&ir.info.version)
    );
    format::finish(&source, &banner, options.format)
}

fn method_context<'a>(op: &'a OperationRecord, runtime: &'a str) -> MethodContext<'a> {
    let names = |location: ParameterLocation| -> Vec<&'a str> {
        op.parameters_in(location).map(|p| p.name.as_str()).collect()
    };

    MethodContext {
        runtime,
        fn_name: method_ident(&op.name.snake_case),
        doc: method_doc(op),
        method: op.method.as_str(),
        endpoint: &op.endpoint,
        security: op.security,
        deprecated: op.deprecated,
        has_params: !op.parameters.is_empty(),
        path_params: op
            .parameters_in(ParameterLocation::Path)
            .map(|p| PathPlacement {
                name: &p.name,
                placeholder: format!("{{{}}}", p.name),
            })
            .collect(),
        query_params: names(ParameterLocation::Query),
        header_params: names(ParameterLocation::Header),
        body_params: names(ParameterLocation::Body),
    }
}

fn client_doc(ir: &IrSpec) -> Vec<String> {
    let mut doc = vec![format!("Client for the {} API.", ir.info.title)];
    if let Some(description) = &ir.info.description {
        doc.push(String::new());
        doc.extend(doc_lines(description));
    }
    if !ir.info.servers.is_empty() {
        doc.push(String::new());
        doc.push("Servers:".to_string());
        doc.extend(ir.info.servers.iter().map(|url| format!("- <{url}>")));
    }
    if let Some(token_url) = &ir.info.token_url {
        doc.push(String::new());
        doc.push(format!("Declared token endpoint: <{token_url}>"));
    }
    doc.into_iter().map(|line| escape_doc(&line)).collect()
}

fn method_doc(op: &OperationRecord) -> Vec<String> {
    let mut doc = Vec::new();
    if let Some(summary) = &op.summary {
        doc.extend(doc_lines(summary));
    }
    if let Some(description) = &op.description {
        if !doc.is_empty() {
            doc.push(String::new());
        }
        doc.extend(doc_lines(description));
    }
    if !doc.is_empty() {
        doc.push(String::new());
    }
    doc.push(format!("`{} {}`", op.method, op.endpoint));
    if let Some(id) = &op.operation_id {
        doc.push(String::new());
        doc.push(format!("operationId: `{id}`"));
    }
    if op.security {
        doc.push(String::new());
        doc.push("Requires a bearer token.".to_string());
    }
    if !op.parameters.is_empty() {
        doc.push(String::new());
        doc.push("Parameters:".to_string());
        for param in &op.parameters {
            let required = if param.required { ", required" } else { "" };
            let mut line = format!(
                "- `{}` ({}, {}{required})",
                param.name,
                param.location.as_str(),
                param.param_type.as_str()
            );
            if let Some(description) = &param.description {
                line.push_str(": ");
                line.push_str(&single_line(description));
            }
            doc.push(line);
        }
    }
    doc.into_iter().map(|line| escape_doc(&line)).collect()
}

fn doc_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.trim().lines().map(|line| line.trim().to_string())
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep doc text from opening code blocks that rustdoc would run as tests.
fn escape_doc(line: &str) -> String {
    line.replace("```", "'''").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use skyapi_core::ir::{HttpMethod, IrInfo, IrParameter, ParamType};
    use skyapi_core::transform::name_normalizer::normalize_name;

    use super::*;

    fn param(name: &str, location: ParameterLocation, required: bool) -> IrParameter {
        IrParameter {
            name: name.to_string(),
            location,
            param_type: ParamType::String,
            required,
            description: None,
        }
    }

    fn record(name: &str, method: HttpMethod, endpoint: &str, parameters: Vec<IrParameter>) -> OperationRecord {
        OperationRecord {
            name: normalize_name(name),
            method,
            endpoint: endpoint.to_string(),
            summary: None,
            description: None,
            operation_id: Some(name.to_string()),
            parameters,
            security: false,
            deprecated: false,
        }
    }

    fn ir(operations: Vec<OperationRecord>) -> IrSpec {
        IrSpec {
            info: IrInfo {
                title: "Test".to_string(),
                description: None,
                version: "1".to_string(),
                servers: Vec::new(),
                token_url: None,
            },
            operations,
        }
    }

    #[test]
    fn test_rust_str_escapes() {
        assert_eq!(rust_str("a\"b\\c".to_string()), r#""a\"b\\c""#);
        assert_eq!(rust_str("{id}".to_string()), r#""{id}""#);
    }

    #[test]
    fn test_method_context_placement() {
        let op = record(
            "getDataset",
            HttpMethod::Get,
            "/datasets/{uuid}",
            vec![
                param("uuid", ParameterLocation::Path, true),
                param("uuid", ParameterLocation::Query, false),
                param("X-Request-Id", ParameterLocation::Header, false),
            ],
        );
        let ctx = method_context(&op, "skyapi_runtime");
        assert_eq!(ctx.fn_name, "get_dataset");
        assert_eq!(ctx.path_params[0].placeholder, "{uuid}");
        assert_eq!(ctx.query_params, vec!["uuid"]);
        assert_eq!(ctx.header_params, vec!["X-Request-Id"]);
        assert!(ctx.body_params.is_empty());
        assert!(ctx.has_params);
    }

    #[test]
    fn test_deprecated_operation_is_marked() {
        let mut op = record("legacyList", HttpMethod::Get, "/old", vec![]);
        op.deprecated = true;
        let out = emit_client(&ir(vec![op]), &ClientOptions::default()).unwrap();
        assert!(out.contains("#[deprecated]\n    pub async fn legacy_list("));
    }

    #[test]
    fn test_method_doc() {
        let mut op = record(
            "createDataset",
            HttpMethod::Post,
            "/datasets",
            vec![param("name", ParameterLocation::Body, true)],
        );
        op.summary = Some("Creates a dataset".to_string());
        op.description = Some("Long\n  description with ```code```".to_string());
        op.security = true;
        op.parameters[0].description = Some("Dataset\nname".to_string());
        assert_eq!(
            method_doc(&op),
            vec![
                "Creates a dataset",
                "",
                "Long",
                "description with '''code'''",
                "",
                "`POST /datasets`",
                "",
                "operationId: `createDataset`",
                "",
                "Requires a bearer token.",
                "",
                "Parameters:",
                "- `name` (body, string, required): Dataset name",
            ]
        );
    }

    #[test]
    fn test_duplicate_method_names_are_skipped() {
        let spec = ir(vec![
            record("listDatasets", HttpMethod::Get, "/datasets", vec![]),
            record("list_datasets", HttpMethod::Get, "/v1/datasets", vec![]),
        ]);
        let out = emit_client(&spec, &ClientOptions::default()).unwrap();
        assert_eq!(out.matches("pub async fn list_datasets(").count(), 1);
        assert!(out.contains("\"/datasets\""));
        assert!(!out.contains("\"/v1/datasets\""));
    }

    #[test]
    fn test_empty_spec_renders() {
        let out = emit_client(&ir(vec![]), &ClientOptions::default()).unwrap();
        assert!(out.starts_with("// Generated by skyapi from Test 1. Do not edit by hand.\n"));
        assert!(out.contains("pub struct SkyApi"));
        assert!(out.contains("OriginConvention::Domain"));
    }
}
