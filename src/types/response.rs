use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Standard envelope for write responses, mirrored by error bodies
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// 201 response carrying an [`ApiResponse`]
pub struct Created<T: Serialize>(pub ApiResponse<T>);

impl<T: Serialize> Created<T> {
    pub fn new(data: T) -> Self {
        Self(ApiResponse::success(data))
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// No content response for DELETE endpoints
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> axum::response::Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert_eq!(body, serde_json::json!({ "success": true, "data": 1 }));
    }

    #[tokio::test]
    async fn test_created_status_and_body() {
        let response = Created::new("x").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"], "x");
    }
}
