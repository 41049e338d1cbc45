use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// JSON error envelope used by the partner handlers.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &str, detail: Option<String>) -> Self {
        Self { status, title: title.to_string(), detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.title, "detail": self.detail });
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn json_api_error_renders_status_and_envelope() {
        let resp = JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some("partner_id=9".into()))
            .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
        let v: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(v["error"], "Not Found");
        assert_eq!(v["detail"], "partner_id=9");
    }

    #[tokio::test]
    async fn json_api_error_detail_is_nullable() {
        let resp = JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", None).into_response();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
        let v: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert!(v["detail"].is_null());
    }
}
