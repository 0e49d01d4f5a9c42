//! Per-call request options and header merging.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use std::collections::BTreeMap;

use super::ApiError;

/// Header applied to every request unless the caller overrides it.
pub const DEFAULT_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// Options for a single API call.
///
/// Everything is optional: the default is a `GET` with no body and only the
/// default `Content-Type` header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Method to send, `GET` when unset.
    pub fn effective_method(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }

    /// Default headers with the caller's headers merged on top.
    ///
    /// Names compare case-insensitively; a caller header replaces the default
    /// of the same name and every other default is kept.
    pub fn merged_headers(&self) -> Vec<(String, String)> {
        let mut merged = vec![(
            DEFAULT_CONTENT_TYPE.0.to_string(),
            DEFAULT_CONTENT_TYPE.1.to_string(),
        )];

        for (name, value) in &self.headers {
            match merged
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            {
                Some(slot) => *slot = (name.clone(), value.clone()),
                None => merged.push((name.clone(), value.clone())),
            }
        }

        merged
    }

    pub(crate) fn header_map(&self) -> Result<HeaderMap, ApiError> {
        let mut map = HeaderMap::new();
        for (name, value) in self.merged_headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(&value).map_err(|_| ApiError::InvalidHeader(name.clone()))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}
