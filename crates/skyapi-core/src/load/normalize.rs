use serde_json::Value;

use crate::parse::operation::HTTP_METHODS;

/// Unwrap operation objects that arrive keyed redundantly by their own
/// method, e.g. `paths./datasets.post.post: {...}`, which some loaders
/// produce when an operation is pulled in through a `$ref`.
///
/// The rule: if `paths[p][m]` is an object whose key `m` holds an object,
/// that inner object replaces the outer one. Returns how many operations
/// were unwrapped.
pub fn unwrap_method_nesting(document: &mut Value) -> usize {
    let Some(paths) = document.get_mut("paths").and_then(Value::as_object_mut) else {
        return 0;
    };

    let mut unwrapped = 0;
    for item in paths.values_mut() {
        let Some(item) = item.as_object_mut() else {
            continue;
        };
        for (method, operation) in item.iter_mut() {
            if !HTTP_METHODS.contains(&method.as_str()) {
                continue;
            }
            let nested = operation
                .get_mut(method.as_str())
                .filter(|inner| inner.is_object())
                .map(Value::take);
            if let Some(inner) = nested {
                *operation = inner;
                unwrapped += 1;
            }
        }
    }
    unwrapped
}
