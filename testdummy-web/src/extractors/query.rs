//! Query extraction that never rejects a request
//!
//! Malformed values are the caller's business: handlers ask for a typed view
//! of a parameter and fall back to their own default when it is missing or
//! does not parse.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use std::str::FromStr;
use testdummy_config::parse_bool;

/// Raw query parameters in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LenientQuery {
    pairs: Vec<(String, String)>,
}

impl LenientQuery {
    /// Parse a raw query string, percent-decoding keys and values
    pub fn parse(query: &str) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value of `key`, treating an empty value as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// `key` parsed as `T`, `None` when missing or malformed
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(parse_bool)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get_parsed(key)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<S> FromRequestParts<S> for LenientQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.uri.query().map(Self::parse).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_first_value_wins() {
        let query = LenientQuery::parse("code=3&code=4");
        assert_eq!(query.get("code"), Some("3"));
        assert_eq!(query.get_i64("code"), Some(3));
    }

    #[test]
    fn test_missing_and_malformed_values() {
        let query = LenientQuery::parse("healthy=notabool&status=&tokens=ten");
        assert_eq!(query.get_bool("healthy"), None);
        assert_eq!(query.get("status"), None);
        assert_eq!(query.get_i64("tokens"), None);
        assert_eq!(query.get("absent"), None);
    }

    #[test]
    fn test_bool_spellings() {
        let spellings = [
            ("1", true),
            ("T", true),
            ("True", true),
            ("0", false),
            ("FALSE", false),
        ];
        for (raw, expected) in spellings {
            let query = LenientQuery::parse(&format!("healthy={}", raw));
            assert_eq!(query.get_bool("healthy"), Some(expected), "value {}", raw);
        }
    }

    #[test]
    fn test_percent_decoding() {
        let query = LenientQuery::parse("msg=hello%20world&plus=a+b");
        assert_eq!(query.get("msg"), Some("hello world"));
        assert_eq!(query.get("plus"), Some("a b"));
    }

    #[tokio::test]
    async fn test_extracts_from_request_parts() {
        let (mut parts, _) = Request::builder()
            .uri("/status?status=418")
            .body(())
            .unwrap()
            .into_parts();
        let query = LenientQuery::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(query.get_i64("status"), Some(418));

        let (mut parts, _) = Request::builder().uri("/ping").body(()).unwrap().into_parts();
        let query = LenientQuery::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(query.is_empty());
    }
}
