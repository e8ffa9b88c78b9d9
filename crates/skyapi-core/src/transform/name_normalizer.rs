use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

use crate::ir::NormalizedName;

/// Compute the casing variants of an operation name.
pub fn normalize_name(name: &str) -> NormalizedName {
    let words = split_words(name);
    NormalizedName {
        original: name.to_string(),
        pascal_case: words.to_pascal_case(),
        camel_case: words.to_lower_camel_case(),
        snake_case: words.to_snake_case(),
    }
}

/// Name an operation that has no operationId after its method and route.
///
/// - `GET /datasets` → `listDatasets`
/// - `GET /datasets/{id}` → `getDataset`
/// - `POST /datasets` → `createDatasets`
/// - `POST /datasets/{id}/processes` → `createDatasetsProcesses`
pub fn route_to_name(method: &str, path: &str) -> String {
    let mut resources = Vec::new();
    let mut ends_with_param = false;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        ends_with_param = segment.starts_with('{') && segment.ends_with('}');
        if !ends_with_param {
            resources.push(segment);
        }
    }

    let verb = match method.to_ascii_lowercase().as_str() {
        "get" if ends_with_param => "get".to_string(),
        "get" => "list".to_string(),
        "post" => "create".to_string(),
        "put" => "update".to_string(),
        other => other.to_string(),
    };

    let last = resources.len().saturating_sub(1);
    let resource: String = resources
        .iter()
        .enumerate()
        .map(|(i, part)| {
            if i == last && ends_with_param {
                singularize(part).to_pascal_case()
            } else {
                part.to_pascal_case()
            }
        })
        .collect();

    format!("{verb}{resource}")
}

fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies").filter(|s| !s.is_empty()) {
        format!("{stem}y")
    } else if ["ses", "xes", "zes"].iter().any(|s| word.ends_with(s)) {
        word[..word.len() - 2].to_string()
    } else if word.len() > 1 && word.ends_with('s') && !word.ends_with("ss") {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Replace every run of non-alphanumeric characters with a single `_` so
/// heck sees word boundaries in names like `datasets.create` or `pet-store`.
fn split_words(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            out.push(ch);
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }
    if out.is_empty() {
        "unnamed".to_string()
    } else {
        out
    }
}
