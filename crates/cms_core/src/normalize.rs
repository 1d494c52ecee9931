use serde_json::Value;
use crate::error::FetchError;
use crate::types::{NormalizedArticle, RawArticleRecord};

/// Name of the top-level field holding the record collection.
pub const DATA_FIELD: &str = "data";

/// Parses a CMS collection response body into normalized articles.
pub fn parse_collection(body: &[u8]) -> Result<Vec<NormalizedArticle>, FetchError> {
    let json: Value = serde_json::from_slice(body)
        .map_err(|e| FetchError::Decode(e.to_string()))?;
    normalize_collection(json)
}

/// Maps every entry of `data` to a `NormalizedArticle`, keeping order.
///
/// A single non-conforming entry fails the whole collection so that a
/// successful result always has exactly one article per record.
pub fn normalize_collection(json: Value) -> Result<Vec<NormalizedArticle>, FetchError> {
    let data = match json {
        Value::Object(mut body) => body.remove(DATA_FIELD),
        _ => None,
    };

    let entries = match data {
        None | Some(Value::Null) => return Err(FetchError::MissingData),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(FetchError::InvalidRecord {
                index: 0,
                reason: format!("`{}` is not an array (found {})", DATA_FIELD, json_type(&other)),
            })
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<RawArticleRecord>(entry)
                .map(NormalizedArticle::from)
                .map_err(|e| FetchError::InvalidRecord { index, reason: e.to_string() })
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_article_with_formats() {
        let body = br#"{"data": [{"id":1,"title":"T","description":"D","slug":"t","cover":{"url":"/a.jpg","alternativeText":"alt","formats":{"large":{"url":"/a-large.jpg"}}}}]}"#;
        let articles = parse_collection(body).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].id, 1);
        assert_eq!(articles[0].title, "T");
        assert_eq!(
            serde_json::to_value(articles[0].cover_image.as_ref().unwrap()).unwrap(),
            json!({ "url": "/a.jpg", "alternativeText": "alt", "formats": { "large": { "url": "/a-large.jpg" } } })
        );
    }

    #[test]
    fn test_order_preserved() {
        let data: Vec<Value> = (1..=5)
            .map(|i| json!({ "id": i, "title": format!("Article {}", i), "description": "", "slug": format!("a-{}", i) }))
            .collect();
        let articles = normalize_collection(json!({ "data": data })).unwrap();
        let ids: Vec<u64> = articles.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_null_cover_kept_in_output() {
        let articles = normalize_collection(json!({
            "data": [{ "id": 1, "title": "T", "description": "D", "slug": "t", "cover": null }]
        }))
        .unwrap();
        let value = serde_json::to_value(&articles[0]).unwrap();
        assert_eq!(value["cover"], Value::Null);
        assert!(value.as_object().unwrap().contains_key("cover"));
        assert!(value.get("coverImage").is_none());
    }

    #[test]
    fn test_empty_collection() {
        let articles = normalize_collection(json!({ "data": [] })).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_missing_data_field() {
        assert_eq!(parse_collection(b"{}"), Err(FetchError::MissingData));
        assert_eq!(parse_collection(br#"{"data": null}"#), Err(FetchError::MissingData));
        assert_eq!(parse_collection(b"[1, 2]"), Err(FetchError::MissingData));
    }

    #[test]
    fn test_malformed_body() {
        let err = parse_collection(b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_data_not_an_array() {
        let err = normalize_collection(json!({ "data": { "id": 1 } })).unwrap_err();
        assert!(matches!(err, FetchError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_invalid_record_reports_index() {
        let err = normalize_collection(json!({ "data": [
            { "id": 1, "title": "ok", "description": "D", "slug": "ok" },
            { "id": 2, "description": "no title", "slug": "broken" }
        ]}))
        .unwrap_err();
        match err {
            FetchError::InvalidRecord { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("title"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
