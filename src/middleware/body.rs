use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Request body as JSON or `application/x-www-form-urlencoded`.
///
/// An empty body reads as `{}` so handlers can report which required fields
/// are missing instead of rejecting the request outright.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_argument(e.body_text()))?;

        parse_body(&bytes, is_form).map(JsonBody)
    }
}

fn parse_body<T: DeserializeOwned>(bytes: &[u8], is_form: bool) -> Result<T, ApiError> {
    let value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else if is_form {
        Value::Object(
            url::form_urlencoded::parse(bytes)
                .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
                .collect(),
        )
    } else {
        serde_json::from_slice(bytes).map_err(|e| ApiError::invalid_argument(format!("malformed JSON body: {}", e)))?
    };

    serde_json::from_value(value).map_err(|e| ApiError::invalid_argument(format!("invalid request body: {}", e)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

/// Accepts `5` or `"5"` for optional integer fields, so form posts and
/// stringly-typed JSON clients work alike. An empty string reads as absent.
pub fn lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = Option::<IntOrString>::deserialize(deserializer)?;
    let value = match raw {
        None => return Ok(None),
        Some(IntOrString::Int(i)) => i,
        Some(IntOrString::Str(s)) if s.trim().is_empty() => return Ok(None),
        Some(IntOrString::Str(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expected an integer, got '{}'", s)))?,
    };
    i32::try_from(value)
        .map(Some)
        .map_err(|_| D::Error::custom(format!("integer {} out of range", value)))
}
