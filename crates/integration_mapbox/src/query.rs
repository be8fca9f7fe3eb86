//! Query-string marshaling for flat request option structs

use serde::Serialize;
use serde_json::Value;

use crate::error::MapboxError;

/// Ordered `(key, value)` query parameters
pub type QueryParams = Vec<(String, String)>;

/// Flatten a request options struct into query parameters
///
/// Fields serialized as `null` (unset `Option`s) are dropped, strings are
/// passed through verbatim, numbers and booleans use their display form.
/// Keys come out in alphabetical order.
///
/// # Errors
///
/// Returns [`MapboxError::InvalidRequest`] if `options` does not serialize to
/// a flat JSON object.
pub fn to_query_pairs<T: Serialize + ?Sized>(options: &T) -> Result<QueryParams, MapboxError> {
    let value = serde_json::to_value(options)
        .map_err(|e| MapboxError::InvalidRequest(e.to_string()))?;

    let Value::Object(map) = value else {
        return Err(MapboxError::InvalidRequest(
            "request options must be a struct".to_string(),
        ));
    };

    let mut params = Vec::with_capacity(map.len());
    for (key, value) in map {
        let rendered = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(MapboxError::InvalidRequest(format!(
                    "query parameter '{key}' must be a scalar"
                )));
            },
        };
        params.push((key, rendered));
    }
    Ok(params)
}

/// Set `key` to `value`, replacing an existing entry
pub fn set_param(params: &mut QueryParams, key: &str, value: impl Into<String>) {
    let value = value.into();
    if let Some(existing) = params.iter_mut().find(|(k, _)| k == key) {
        existing.1 = value;
    } else {
        params.push((key.to_string(), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Default)]
    struct Sample {
        #[serde(skip_serializing_if = "Option::is_none")]
        country: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        autocomplete: Option<bool>,
        maybe: Option<String>,
    }

    #[test]
    fn test_unset_fields_are_dropped() {
        let params = to_query_pairs(&Sample::default()).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_scalars_rendered() {
        let sample = Sample {
            country: Some("us".to_string()),
            limit: Some(5),
            autocomplete: Some(false),
            maybe: None,
        };
        let params = to_query_pairs(&sample).unwrap();
        assert!(params.contains(&("country".to_string(), "us".to_string())));
        assert!(params.contains(&("limit".to_string(), "5".to_string())));
        assert!(params.contains(&("autocomplete".to_string(), "false".to_string())));
        assert!(!params.iter().any(|(k, _)| k == "maybe"));
    }

    #[test]
    fn test_non_struct_rejected() {
        assert!(to_query_pairs(&vec![1, 2]).is_err());
        assert!(to_query_pairs("text").is_err());
    }

    #[test]
    fn test_nested_value_rejected() {
        #[derive(Serialize)]
        struct Nested {
            inner: Vec<u8>,
        }
        let err = to_query_pairs(&Nested { inner: vec![1] }).unwrap_err();
        assert!(err.to_string().contains("inner"));
    }

    #[test]
    fn test_set_param_replaces() {
        let mut params = vec![("q".to_string(), "old".to_string())];
        set_param(&mut params, "q", "new");
        set_param(&mut params, "longitude", "1.5");
        assert_eq!(
            params,
            vec![
                ("q".to_string(), "new".to_string()),
                ("longitude".to_string(), "1.5".to_string()),
            ]
        );
    }
}
