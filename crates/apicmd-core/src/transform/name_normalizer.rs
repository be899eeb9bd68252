use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase};

use crate::model::HttpMethod;

/// Fallback for names that normalize to nothing (empty or symbol-only input).
pub const PLACEHOLDER_NAME: &str = "unnamed";

/// `petId` → `pet-id`, `X-Request-ID` → `x-request-id`. ASCII only.
pub fn to_kebab(name: &str) -> String {
    let kebab: String = name
        .to_kebab_case()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    let collapsed = kebab
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    or_placeholder(collapsed)
}

/// `get_pet_by_id` → `getPetById`. ASCII only.
pub fn to_camel(name: &str) -> String {
    let camel: String = name
        .to_lower_camel_case()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    or_placeholder(camel)
}

/// A camelCase name that is also a valid JavaScript identifier.
pub fn to_identifier(name: &str) -> String {
    let camel = to_camel(name);
    if camel.starts_with(|c: char| c.is_ascii_digit()) {
        format!("var{camel}")
    } else {
        camel
    }
}

/// Environment variable prefix for a program name: `petStore` → `PET_STORE`.
pub fn to_env_prefix(program_name: &str) -> String {
    let shouty: String = program_name
        .to_shouty_snake_case()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if shouty.is_empty() {
        PLACEHOLDER_NAME.to_shouty_snake_case()
    } else {
        shouty
    }
}

/// Command name for an operation without an operationId: method and path folded
/// into one camelCase token. `GET /pets/{id}` → `getPetsId`.
pub fn route_to_name(method: HttpMethod, path: &str) -> String {
    to_camel(&format!(
        "{}={}",
        method.as_str().to_lowercase(),
        path.replace('/', "_")
    ))
}

/// First line of a description, with `...` appended when more lines follow.
pub fn trim_description(text: &str) -> String {
    let text = text.trim_end();
    match text.split_once('\n') {
        Some((first, _)) => format!("{}...", first.trim_end()),
        None => text.to_string(),
    }
}

fn or_placeholder(name: String) -> String {
    if name.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        name
    }
}
