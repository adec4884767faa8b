use axum::{extract::DefaultBodyLimit, routing::get, Router};
use contracts::shared::image_staging::{MAX_IMAGE_BYTES, MAX_STAGED_IMAGES};
use std::path::Path;
use tower_http::services::ServeDir;

use crate::handlers;
use crate::shared::uploads::UPLOADS_ROUTE;

/// Лимит тела multipart-запроса: все изображения плюс поля формы
const PRODUCT_BODY_LIMIT: usize = MAX_STAGED_IMAGES * MAX_IMAGE_BYTES as usize + 1024 * 1024;

/// Конфигурация всех роутов приложения
pub fn configure_routes(uploads_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A001 CATEGORY
        // ========================================
        .route(
            "/api/category",
            get(handlers::a001_category::list_all).post(handlers::a001_category::create),
        )
        .route(
            "/api/category/parent",
            get(handlers::a001_category::list_parents),
        )
        .route(
            "/api/category/:id",
            get(handlers::a001_category::get_by_id)
                .put(handlers::a001_category::update)
                .delete(handlers::a001_category::delete),
        )
        // ========================================
        // A002 PRODUCT
        // ========================================
        .route(
            "/api/products",
            get(handlers::a002_product::list)
                .post(handlers::a002_product::create)
                .layer(DefaultBodyLimit::max(PRODUCT_BODY_LIMIT)),
        )
        .route(
            "/api/products/:id",
            get(handlers::a002_product::get_by_id)
                .put(handlers::a002_product::update)
                .delete(handlers::a002_product::delete)
                .layer(DefaultBodyLimit::max(PRODUCT_BODY_LIMIT)),
        )
        // Загруженные изображения
        .nest_service(UPLOADS_ROUTE, ServeDir::new(uploads_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_responds_ok() {
        let app = configure_routes(Path::new("target/uploads"));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        let app = configure_routes(Path::new("target/uploads"));
        let response = app
            .oneshot(Request::get("/api/products/temp_1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
