use axum::{
    extract::{Multipart, Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_product::aggregate::{Product, ProductId, ProductListFilter};
use contracts::domain::common::AggregateId;

use crate::domain::a002_product;
use crate::domain::a002_product::multipart::read_product_upload;
use crate::shared::error::{ApiError, ApiResult};

fn parse_id(id: &str) -> ApiResult<ProductId> {
    ProductId::from_string(id).map_err(|_| ApiError::bad_request("Invalid product ID"))
}

/// GET /api/products?category=&stockStatus=&search=
pub async fn list(Query(filter): Query<ProductListFilter>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(a002_product::service::list(&filter).await?))
}

/// GET /api/products/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<Product>> {
    let id = parse_id(&id)?;
    a002_product::service::get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product not found"))
}

/// POST /api/products (multipart/form-data)
pub async fn create(mut multipart: Multipart) -> ApiResult<(StatusCode, Json<Product>)> {
    let upload = read_product_upload(&mut multipart).await?;
    let product = a002_product::service::create(upload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/:id (multipart/form-data)
pub async fn update(Path(id): Path<String>, mut multipart: Multipart) -> ApiResult<Json<Product>> {
    let id = parse_id(&id)?;
    let upload = read_product_upload(&mut multipart).await?;
    a002_product::service::update(id, upload)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product not found"))
}

/// DELETE /api/products/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    if a002_product::service::delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Product not found"))
    }
}
