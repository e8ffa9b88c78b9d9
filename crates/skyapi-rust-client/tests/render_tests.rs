use std::path::Path;

use skyapi_core::config::{ClientOptions, OriginConvention};
use skyapi_core::ir::IrSpec;
use skyapi_core::parse::SpecFormat;
use skyapi_core::{CodeGenerator, load, transform};
use skyapi_rust_client::{RustClientGenerator, render};

fn datasets() -> IrSpec {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../skyapi-core/tests/fixtures/datasets.yaml");
    let spec = load::load(&path).unwrap();
    transform::transform(&spec.document)
}

fn from_yaml(input: &str) -> IrSpec {
    let spec = load::load_str(input, SpecFormat::Yaml, Path::new(".")).unwrap();
    transform::transform(&spec.document)
}

/// Names of the inherent methods on the generated client struct.
fn method_names(source: &str) -> Vec<String> {
    let file = syn::parse_file(source).unwrap();
    file.items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Impl(block) => Some(block),
            _ => None,
        })
        .flat_map(|block| &block.items)
        .filter_map(|item| match item {
            syn::ImplItem::Fn(f) => Some(f.sig.ident.to_string()),
            _ => None,
        })
        .collect()
}

fn compact(source: &str) -> String {
    source.split_whitespace().collect()
}

#[test]
fn renders_one_method_per_operation() {
    let out = render(&datasets(), &ClientOptions::default()).unwrap();
    insta::assert_snapshot!(method_names(&out).join("\n"), @r"
    new
    client
    refresh
    request
    create_dataset
    list_datasets
    get_dataset
    get_projections
    health
    ");
}

#[test]
fn render_is_deterministic() {
    let ir = datasets();
    let options = ClientOptions::default();
    assert_eq!(render(&ir, &options).unwrap(), render(&ir, &options).unwrap());
}

#[test]
fn banner_and_struct() {
    let out = render(&datasets(), &ClientOptions::default()).unwrap();
    assert!(out.starts_with("// Generated by skyapi from Skycatch Datasets 2. Do not edit by hand.\n"));
    assert!(!out.contains("//!"));
    let code = compact(&out);
    assert!(code.contains("useskyapi_runtime::{"));
    assert!(code.contains("pubstructSkyApi{client:Client,}"));
    assert!(code.contains("OriginConvention=OriginConvention::Domain;"));
    assert!(out.contains("Declared token endpoint: <https://skycatch.auth0.com/oauth/token>"));
}

#[test]
fn method_bodies_place_parameters() {
    let code = compact(&render(&datasets(), &ClientOptions::default()).unwrap());

    assert!(code.contains(r#"Method::GET,format!("/v{}{}",self.client.version(),"/datasets/{uuid}")"#));
    assert!(code.contains(
        r#"request.path=request.path.replace("{uuid}",&skyapi_runtime::path_segment(value));"#
    ));
    assert!(code.contains(r#"request.query.insert("uuid".to_string(),value.clone());"#));
    assert!(code.contains(
        r#"request.options.headers.push(("X-Request-Id".to_string(),skyapi_runtime::path_value(value)));"#
    ));
    assert!(code.contains(r#"request.body.insert("name".to_string(),value.clone());"#));
    assert!(code.contains(r#"request.body.insert("tags".to_string(),value.clone());"#));
    assert!(!code.contains(r#"params.get("session")"#));

    assert_eq!(code.matches("request.security=true;").count(), 1);
    assert_eq!(code.matches("request.security=false;").count(), 4);
    // listDatasets and health take no parameters
    assert_eq!(code.matches("let_=params;").count(), 2);
}

#[test]
fn declared_body_parameters_go_into_the_body() {
    let ir = from_yaml(
        r#"
openapi: 3.0.0
info: { title: Users, version: "1" }
paths:
  /users:
    post:
      operationId: createUser
      deprecated: true
      parameters:
        - { name: name, in: body, required: true, schema: { type: string } }
        - { name: userId, in: query }
      responses: { "200": { description: ok } }
"#,
    );
    let out = render(&ir, &ClientOptions::default()).unwrap();
    let code = compact(&out);
    assert!(code.contains(r#"request.body.insert("name".to_string(),value.clone());"#));
    assert!(code.contains(r#"request.query.insert("userId".to_string(),value.clone());"#));
    assert!(out.contains("/// - `name` (body, string, required)"));
    assert!(code.contains("#[deprecated]pubasyncfncreate_user("));
}

#[test]
fn method_docs_describe_the_call() {
    let out = render(&datasets(), &ClientOptions::default()).unwrap();
    assert!(out.contains("/// Create a dataset"));
    assert!(out.contains("/// `POST /datasets`"));
    assert!(out.contains("/// operationId: `createDataset`"));
    assert!(out.contains("/// - `userId` (query, string, required)"));
    assert!(out.contains("/// - `name` (body, string, required): Dataset name"));
    assert!(out.contains("/// - `lon` (query, number, required)"));
}

#[test]
fn client_options_shape_the_module() {
    let options = ClientOptions {
        struct_name: "Skycatch".to_string(),
        origin_convention: OriginConvention::Tenant,
        runtime_path: "crate::rt".to_string(),
        format: true,
    };
    let code = compact(&render(&datasets(), &options).unwrap());
    assert!(code.contains("usecrate::rt::{"));
    assert!(code.contains("implSkycatch{"));
    assert!(code.contains("OriginConvention::Tenant;"));
    assert!(code.contains("crate::rt::path_value(value)"));
}

#[test]
fn unformatted_output_still_parses() {
    let ir = datasets();
    let pretty = render(&ir, &ClientOptions::default()).unwrap();
    let raw = render(
        &ir,
        &ClientOptions {
            format: false,
            ..ClientOptions::default()
        },
    )
    .unwrap();
    assert_ne!(pretty, raw);
    assert!(raw.starts_with("// Generated by skyapi"));
    assert_eq!(method_names(&raw), method_names(&pretty));
}

#[test]
fn awkward_operation_ids_become_valid_idents() {
    let ir = from_yaml(
        r#"
openapi: 3.0.0
info: { title: Odd, version: "1" }
paths:
  /types:
    get:
      operationId: type
      responses: { "200": { description: ok } }
  /refresh:
    post:
      operationId: refresh
      responses: { "200": { description: ok } }
  /models:
    get:
      operationId: 3dModels
      description: |
        Returns models.
        ```
        not a doctest
        ```
      responses: { "200": { description: ok } }
"#,
    );
    let out = render(&ir, &ClientOptions::default()).unwrap();
    let names = method_names(&out);
    assert!(names.contains(&"r#type".to_string()));
    assert!(names.contains(&"refresh_operation".to_string()));
    assert!(names.contains(&"op_3d_models".to_string()));
    assert!(!out.contains("```"));
}

#[test]
fn generator_emits_client_file() {
    let ir = datasets();
    let options = ClientOptions::default();
    let files = RustClientGenerator.generate(&ir, &options).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "client.rs");
    assert_eq!(files[0].content, render(&ir, &options).unwrap());
}
