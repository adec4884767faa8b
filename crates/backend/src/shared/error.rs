use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::domain::a001_category::aggregate::CategoryViolation;
use contracts::domain::a002_product::draft::FieldPathError;
use contracts::domain::a002_product::validation::ProductViolation;
use contracts::shared::store_error::ApiErrorBody;
use thiserror::Error;

/// Отказ сервиса, который показывается клиенту как 400
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Rejected(pub String);

/// Ошибка обработчика REST API.
///
/// Тело ответа всегда `{"message": "..."}`: фронтенд показывает сообщение
/// 4xx как есть, а для 5xx выводит общий текст.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    /// Ошибки правил домена становятся 400, остальное 500
    fn from(e: anyhow::Error) -> Self {
        if let Some(v) = e.downcast_ref::<CategoryViolation>() {
            return ApiError::BadRequest(v.to_string());
        }
        if let Some(v) = e.downcast_ref::<ProductViolation>() {
            return ApiError::BadRequest(v.to_string());
        }
        if let Some(v) = e.downcast_ref::<FieldPathError>() {
            return ApiError::BadRequest(v.to_string());
        }
        if let Some(v) = e.downcast_ref::<Rejected>() {
            return ApiError::BadRequest(v.to_string());
        }
        ApiError::Internal(e)
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(ref e) => {
                tracing::error!("Internal error: {:#}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ApiErrorBody { message })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(error: ApiError) -> (StatusCode, ApiErrorBody) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn bad_request_carries_message() {
        let (status, body) = body_of(ApiError::bad_request("HSN must be 2, 4, or 6 digits")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "HSN must be 2, 4, or 6 digits");
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let (status, body) = body_of(anyhow::anyhow!("disk I/O error").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal server error");
    }

    #[tokio::test]
    async fn domain_violations_become_bad_request() {
        let error: ApiError = anyhow::Error::new(ProductViolation::HsnCode).into();
        let (status, body) = body_of(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "HSN must be 2, 4, or 6 digits");

        let error: ApiError = anyhow::Error::new(CategoryViolation::ParentCycle).into();
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = anyhow::Error::new(Rejected("Image is empty".into())).into();
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn not_found_status() {
        let (status, body) = body_of(ApiError::not_found("Product not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Product not found");
    }
}
