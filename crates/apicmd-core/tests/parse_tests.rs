use apicmd_core::error::ParseError;
use apicmd_core::parse;
use apicmd_core::parse::parameter::{ParameterLocation, ParameterOrRef};
use apicmd_core::parse::request_body::RequestBodyOrRef;
use apicmd_core::parse::schema::SchemaType;

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const QUERY_PARAMS: &str = include_str!("fixtures/query-params.yaml");

#[test]
fn parse_petstore_yaml() {
    let spec = parse::from_yaml(PETSTORE).expect("should parse petstore");
    assert_eq!(spec.openapi, "3.0.3");
    assert_eq!(spec.info.title, "Petstore");
    assert_eq!(spec.paths.len(), 7);
    assert_eq!(spec.servers.len(), 2);

    let tags: Vec<&str> = spec.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tags, vec!["store", "pets", "admin"]);

    let components = spec.components.as_ref().expect("should have components");
    assert_eq!(components.schemas.len(), 2);
    assert!(components.parameters.contains_key("Limit"));
    assert!(components.request_bodies.contains_key("PetBody"));
}

#[test]
fn parse_31_type_lists() {
    let spec = parse::from_yaml(QUERY_PARAMS).expect("should parse 3.1 spec");
    let get = spec.paths["/pets/search"].get.as_ref().unwrap();
    let ParameterOrRef::Parameter(ids) = &get.parameters[1] else {
        panic!("ids should be inline");
    };
    assert!(ids.is_array());
    assert_eq!(
        ids.inline_schema().unwrap().primary_type(),
        Some(SchemaType::Array)
    );

    let ParameterOrRef::Parameter(trace) = &get.parameters[5] else {
        panic!("trace should be inline");
    };
    assert_eq!(trace.location, ParameterLocation::Unknown);
}

#[test]
fn parse_json_detected() {
    let json = r#"{
        "openapi": "3.1.0",
        "info": {"title": "Tiny", "version": "0"},
        "paths": {"/ping": {"get": {"operationId": "ping"}}}
    }"#;
    let spec = parse::from_str_detect("https://example.com/spec", json).unwrap();
    assert_eq!(spec.info.title, "Tiny");

    let spec = parse::from_str_detect("api.yaml", PETSTORE).unwrap();
    assert_eq!(spec.info.title, "Petstore");
}

#[test]
fn parse_invalid_version() {
    let swagger = r#"
openapi: "2.0"
info:
  title: Old
  version: "1"
paths: {}
"#;
    let err = parse::from_yaml(swagger).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedVersion(ref v) if v == "2.0"));
    assert_eq!(err.to_string(), "unsupported OpenAPI version: 2.0");
}

#[test]
fn resolve_petstore_refs() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let resolved = parse::resolve(&spec).unwrap();
    let pets = &resolved.paths["/pets"];

    let ParameterOrRef::Parameter(limit) = &pets.parameters[0] else {
        panic!("limit should be inline");
    };
    assert_eq!(limit.name, "limit");
    assert!(limit.has_default());

    let post = pets.post.as_ref().unwrap();
    let Some(RequestBodyOrRef::RequestBody(body)) = &post.request_body else {
        panic!("body should be inline");
    };
    assert!(body.required);
    let schema = body.content["application/json"]
        .schema
        .as_ref()
        .and_then(|s| s.as_schema())
        .expect("schema should be inline");
    assert_eq!(schema.properties.len(), 3);
}
