use axum::{
    http::{header::LOCATION, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Wrapper for API responses that automatically adds the success envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: Option<StatusCode>,
    key: &'static str,
    count: Option<usize>,
    location: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// `{ success, data }` with default 200 status
    pub fn success(data: T) -> Self {
        Self { data, status_code: None, key: "data", count: None, location: None }
    }

    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self { status_code: Some(status_code), ..Self::success(data) }
    }

    pub fn created(data: T) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }

    pub fn status(mut self, status_code: StatusCode) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Adds `location` to the body and the `Location` header.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// `{ success, count, data }`, where `count` is the number of returned items.
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len();
        Self { count: Some(count), ..Self::success(data) }
    }
}

impl ApiResponse<String> {
    /// `{ success, token }`
    pub fn token(token: String) -> Self {
        Self { key: "token", ..Self::success(token) }
    }

    /// `{ success, message }`
    pub fn message(message: impl Into<String>) -> Self {
        Self { key: "message", ..Self::success(message.into()) }
    }
}

impl ApiResponse<()> {
    /// 204 No Content, no body
    pub fn no_content() -> Self {
        Self::with_status((), StatusCode::NO_CONTENT)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        if status == StatusCode::NO_CONTENT {
            return status.into_response();
        }

        let payload = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                return ApiError::internal_server_error(format!("failed to serialize response data: {}", e))
                    .into_response();
            }
        };

        let mut envelope = Map::new();
        envelope.insert("success".into(), Value::Bool(true));
        if let Some(count) = self.count {
            envelope.insert("count".into(), Value::from(count));
        }
        if let Some(location) = &self.location {
            envelope.insert("location".into(), Value::String(location.clone()));
        }
        envelope.insert(self.key.into(), payload);

        let mut response = (status, Json(Value::Object(envelope))).into_response();
        if let Some(location) = self.location.and_then(|l| HeaderValue::from_str(&l).ok()) {
            response.headers_mut().insert(LOCATION, location);
        }
        response
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::json;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn list_envelope_counts_items() {
        let response = ApiResponse::list(vec![json!({"id": 1}), json!({"id": 2})]).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "success": true, "count": 2, "data": [{"id": 1}, {"id": 2}] })
        );
    }

    #[tokio::test]
    async fn created_with_location_sets_header_and_body() {
        let response = ApiResponse::created(json!({"id": 5}))
            .with_location("http://localhost:5000/api/v1/categories/5")
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[LOCATION], "http://localhost:5000/api/v1/categories/5");
        let body = body_json(response).await;
        assert_eq!(body["location"], "http://localhost:5000/api/v1/categories/5");
        assert_eq!(body["data"]["id"], 5);
    }

    #[tokio::test]
    async fn token_and_message_use_their_own_keys() {
        assert_eq!(
            body_json(ApiResponse::token("abc".into()).into_response()).await,
            json!({ "success": true, "token": "abc" })
        );
        assert_eq!(
            body_json(ApiResponse::message("password has been updated").into_response()).await,
            json!({ "success": true, "message": "password has been updated" })
        );
    }

    #[tokio::test]
    async fn token_can_be_created() {
        let response = ApiResponse::token("abc".into()).status(StatusCode::CREATED).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["token"], "abc");
    }

    #[tokio::test]
    async fn no_content_has_empty_body() {
        let response = ApiResponse::no_content().into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
}
