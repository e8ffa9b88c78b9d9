use serde_json::Value;
use url::Url;

use crate::request::Params;

/// Append `query` to `url`, preserving insertion order.
///
/// Arrays repeat their key once per element (`ids=1&ids=2`), nested objects
/// use bracketed keys (`filter[status]=done`), `null` becomes an empty value
/// and strings are written without quotes.
pub fn append(url: &mut Url, query: &Params) {
    if query.is_empty() {
        return;
    }
    let mut pairs = Vec::new();
    for (key, value) in query {
        flatten(key.clone(), value, &mut pairs);
    }
    url.query_pairs_mut()
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
}

fn flatten(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten(key.clone(), item, out);
            }
        }
        Value::Object(fields) => {
            for (field, item) in fields {
                flatten(format!("{key}[{field}]"), item, out);
            }
        }
        Value::Null => out.push((key, String::new())),
        Value::String(s) => out.push((key, s.clone())),
        other => out.push((key, other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn encoded(query: Value) -> Option<String> {
        let mut url = Url::parse("http://localhost/v2/projections").unwrap();
        let Value::Object(query) = query else {
            panic!("query must be an object");
        };
        append(&mut url, &query);
        url.query().map(String::from)
    }

    #[test]
    fn test_scalars_in_order() {
        assert_eq!(
            encoded(json!({"lon": 1, "lat": 2, "name": "a b", "ok": true})).as_deref(),
            Some("lon=1&lat=2&name=a+b&ok=true")
        );
    }

    #[test]
    fn test_arrays_repeat_keys() {
        assert_eq!(
            encoded(json!({"ids": [1, "b"]})).as_deref(),
            Some("ids=1&ids=b")
        );
    }

    #[test]
    fn test_nested_and_null() {
        assert_eq!(
            encoded(json!({"filter": {"status": "done"}, "cursor": null})).as_deref(),
            Some("filter%5Bstatus%5D=done&cursor=")
        );
    }

    #[test]
    fn test_empty_query_adds_nothing() {
        assert_eq!(encoded(json!({})), None);
    }
}
