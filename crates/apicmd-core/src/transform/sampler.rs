use serde_json::{Map, Value, json};

use crate::parse::schema::{Schema, SchemaOrRef, SchemaType};

const MAX_DEPTH: usize = 8;

/// Build a representative value for a schema.
///
/// Explicit values win (`example`, `examples[0]`, `default`, `const`, the
/// first `enum` entry); otherwise the value is derived from the type.
/// Unresolved references and anything nested deeper than eight levels
/// sample as `null`.
pub fn sample(schema: &SchemaOrRef) -> Value {
    sample_at(schema, 0)
}

fn sample_at(schema: &SchemaOrRef, depth: usize) -> Value {
    if depth > MAX_DEPTH {
        return Value::Null;
    }
    match schema {
        SchemaOrRef::Schema(schema) => sample_schema(schema, depth),
        SchemaOrRef::Ref { .. } => Value::Null,
    }
}

fn sample_schema(schema: &Schema, depth: usize) -> Value {
    let explicit = schema
        .example
        .as_ref()
        .or(schema.examples.first())
        .or(schema.default_value.as_ref())
        .or(schema.const_value.as_ref())
        .or(schema.enum_values.first());
    if let Some(value) = explicit {
        return value.clone();
    }

    if let Some(first) = schema.one_of.first().or(schema.any_of.first()) {
        return sample_at(first, depth + 1);
    }

    match schema.primary_type() {
        Some(SchemaType::Object) => sample_object(schema, depth),
        None if !schema.properties.is_empty() || !schema.all_of.is_empty() => {
            sample_object(schema, depth)
        }
        Some(SchemaType::Array) => {
            let item = schema
                .items
                .as_deref()
                .map_or(Value::Null, |items| sample_at(items, depth + 1));
            Value::Array(vec![item])
        }
        Some(SchemaType::String) => Value::String(sample_string(schema.format.as_deref()).into()),
        Some(SchemaType::Integer) => json!(schema.minimum.map_or(0, |m| m.ceil() as i64)),
        Some(SchemaType::Number) => match schema.minimum {
            Some(m) => json!(m),
            None => json!(0),
        },
        Some(SchemaType::Boolean) => Value::Bool(true),
        Some(SchemaType::Null) | None => Value::Null,
    }
}

fn sample_object(schema: &Schema, depth: usize) -> Value {
    let mut object = Map::new();
    for part in &schema.all_of {
        if let Value::Object(fields) = sample_at(part, depth + 1) {
            object.extend(fields);
        }
    }
    for (name, property) in &schema.properties {
        if property.as_schema().is_some_and(Schema::is_read_only) {
            continue;
        }
        object.insert(name.clone(), sample_at(property, depth + 1));
    }
    Value::Object(object)
}

fn sample_string(format: Option<&str>) -> &'static str {
    match format {
        Some("date-time") => "2024-01-01T00:00:00Z",
        Some("date") => "2024-01-01",
        Some("email") => "user@example.com",
        Some("uuid") => "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        Some("uri") | Some("url") => "https://example.com",
        Some("hostname") => "example.com",
        Some("ipv4") => "192.0.2.1",
        Some("ipv6") => "2001:db8::1",
        Some("byte") => "U3dhZ2dlciByb2Nrcw==",
        Some("binary") => "<binary>",
        Some("password") => "********",
        _ => "string",
    }
}
