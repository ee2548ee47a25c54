// Success envelope shared by every endpoint

use axum::http::StatusCode;
use serde::Serialize;

/// Wire format for successful responses
///
/// `statusCode` mirrors the HTTP status line; `success` is derived from it.
/// Endpoints without payload data set `data` to JSON null.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Build an envelope for the given status
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: status.as_u16() < 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_serializes_with_camel_case_status() {
        let envelope = ApiResponse::new(StatusCode::CREATED, json!({"id": 1}), "Created");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["statusCode"], 201);
        assert_eq!(value["data"]["id"], 1);
        assert_eq!(value["message"], "Created");
        assert_eq!(value["success"], true);
        assert!(value.get("status_code").is_none());
    }

    #[test]
    fn test_null_data_is_preserved() {
        let envelope = ApiResponse::new(StatusCode::OK, serde_json::Value::Null, "Post deleted successfully");
        let value = serde_json::to_value(&envelope).unwrap();

        assert!(value["data"].is_null());
        assert_eq!(value["success"], true);
    }
}
