use std::collections::HashSet;

use indexmap::IndexMap;

use super::components::Components;
use super::media_type::MediaType;
use super::operation::PathItem;
use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use super::schema::{AdditionalProperties, Schema, SchemaOrRef};
use super::spec::OpenApiSpec;
use crate::error::ResolveError;

/// Resolves the `$ref` pointers reachable from operations, producing a document
/// whose parameters, request bodies and schemas are inline.
///
/// Circular schema references cannot be expanded; the innermost occurrence is
/// left as a `$ref` node and consumers treat it as opaque.
pub struct RefResolver<'a> {
    components: Option<&'a Components>,
    visited: HashSet<String>,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
            visited: HashSet::new(),
        }
    }

    /// Resolve every path item of the spec, returning a new document.
    pub fn resolve_spec(&mut self, spec: &OpenApiSpec) -> Result<OpenApiSpec, ResolveError> {
        let mut resolved = spec.clone();
        for item in resolved.paths.values_mut() {
            self.resolve_path_item(item)?;
        }
        Ok(resolved)
    }

    fn resolve_path_item(&mut self, item: &mut PathItem) -> Result<(), ResolveError> {
        item.parameters = self.resolve_parameters(&item.parameters)?;
        for op in item.operations_mut() {
            op.parameters = self.resolve_parameters(&op.parameters)?;
            if let Some(ref body) = op.request_body {
                op.request_body = Some(self.resolve_request_body_or_ref(body)?);
            }
        }
        Ok(())
    }

    fn resolve_parameters(
        &mut self,
        params: &[ParameterOrRef],
    ) -> Result<Vec<ParameterOrRef>, ResolveError> {
        params
            .iter()
            .map(|p| self.resolve_parameter_or_ref(p))
            .collect()
    }

    pub fn resolve_schema_or_ref(
        &mut self,
        schema_or_ref: &SchemaOrRef,
    ) -> Result<SchemaOrRef, ResolveError> {
        match schema_or_ref {
            SchemaOrRef::Ref { ref_path } => {
                if self.visited.contains(ref_path) {
                    return Ok(schema_or_ref.clone());
                }
                self.visited.insert(ref_path.clone());
                let target = self.lookup_schema(ref_path)?;
                let result = self.resolve_schema_or_ref(target);
                self.visited.remove(ref_path);
                result
            }
            SchemaOrRef::Schema(schema) => {
                let resolved = self.resolve_schema(schema)?;
                Ok(SchemaOrRef::Schema(Box::new(resolved)))
            }
        }
    }

    fn resolve_schema(&mut self, schema: &Schema) -> Result<Schema, ResolveError> {
        let mut resolved = schema.clone();

        let mut resolved_props = IndexMap::new();
        for (name, prop) in &schema.properties {
            resolved_props.insert(name.clone(), self.resolve_schema_or_ref(prop)?);
        }
        resolved.properties = resolved_props;

        if let Some(ref items) = schema.items {
            resolved.items = Some(Box::new(self.resolve_schema_or_ref(items)?));
        }

        resolved.all_of = self.resolve_schema_list(&schema.all_of)?;
        resolved.one_of = self.resolve_schema_list(&schema.one_of)?;
        resolved.any_of = self.resolve_schema_list(&schema.any_of)?;

        if let Some(AdditionalProperties::Schema(ref s)) = schema.additional_properties {
            resolved.additional_properties = Some(AdditionalProperties::Schema(Box::new(
                self.resolve_schema_or_ref(s)?,
            )));
        }

        Ok(resolved)
    }

    fn resolve_schema_list(
        &mut self,
        schemas: &[SchemaOrRef],
    ) -> Result<Vec<SchemaOrRef>, ResolveError> {
        schemas
            .iter()
            .map(|s| self.resolve_schema_or_ref(s))
            .collect()
    }

    fn resolve_parameter_or_ref(
        &mut self,
        param: &ParameterOrRef,
    ) -> Result<ParameterOrRef, ResolveError> {
        match param {
            ParameterOrRef::Ref { ref_path } => {
                if !self.visited.insert(ref_path.clone()) {
                    return Err(ResolveError::InvalidRefFormat(format!(
                        "circular parameter reference {ref_path}"
                    )));
                }
                let name = parse_ref_name(ref_path, "parameters")?;
                let target = self
                    .components
                    .and_then(|c| c.parameters.get(name))
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))?;
                let result = self.resolve_parameter_or_ref(target);
                self.visited.remove(ref_path);
                result
            }
            ParameterOrRef::Parameter(p) => {
                let mut resolved = p.clone();
                if let Some(ref s) = p.schema {
                    resolved.schema = Some(self.resolve_schema_or_ref(s)?);
                }
                Ok(ParameterOrRef::Parameter(resolved))
            }
        }
    }

    fn resolve_request_body_or_ref(
        &mut self,
        body: &RequestBodyOrRef,
    ) -> Result<RequestBodyOrRef, ResolveError> {
        match body {
            RequestBodyOrRef::Ref { ref_path } => {
                if !self.visited.insert(ref_path.clone()) {
                    return Err(ResolveError::InvalidRefFormat(format!(
                        "circular request body reference {ref_path}"
                    )));
                }
                let name = parse_ref_name(ref_path, "requestBodies")?;
                let target = self
                    .components
                    .and_then(|c| c.request_bodies.get(name))
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))?;
                let result = self.resolve_request_body_or_ref(target);
                self.visited.remove(ref_path);
                result
            }
            RequestBodyOrRef::RequestBody(rb) => {
                let mut resolved = rb.clone();
                self.resolve_media_types(&mut resolved.content)?;
                Ok(RequestBodyOrRef::RequestBody(resolved))
            }
        }
    }

    fn resolve_media_types(
        &mut self,
        content: &mut IndexMap<String, MediaType>,
    ) -> Result<(), ResolveError> {
        for mt in content.values_mut() {
            if let Some(ref s) = mt.schema {
                mt.schema = Some(self.resolve_schema_or_ref(s)?);
            }
        }
        Ok(())
    }

    fn lookup_schema(&self, ref_path: &str) -> Result<&'a SchemaOrRef, ResolveError> {
        let name = parse_ref_name(ref_path, "schemas")?;
        self.components
            .and_then(|c| c.schemas.get(name))
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }
}

/// Parse a `$ref` path like `#/components/schemas/Foo` and extract the name.
fn parse_ref_name<'r>(ref_path: &'r str, expected_section: &str) -> Result<&'r str, ResolveError> {
    let stripped = ref_path
        .strip_prefix("#/components/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{expected_section}', got '{section}' in {ref_path}"
        )));
    }
    Ok(name)
}
