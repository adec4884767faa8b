use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_category::aggregate::{Category, CategoryDto, CategoryId};
use contracts::domain::common::AggregateId;

use crate::domain::a001_category;
use crate::shared::error::{ApiError, ApiResult};

fn parse_id(id: &str) -> ApiResult<CategoryId> {
    CategoryId::from_string(id).map_err(|_| ApiError::bad_request("Invalid category ID"))
}

/// GET /api/category
pub async fn list_all() -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(a001_category::service::list_all().await?))
}

/// GET /api/category/parent
pub async fn list_parents() -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(a001_category::service::list_parents().await?))
}

/// GET /api/category/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<Category>> {
    let id = parse_id(&id)?;
    a001_category::service::get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Category not found"))
}

/// POST /api/category
pub async fn create(Json(dto): Json<CategoryDto>) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = a001_category::service::create(dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/category/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<CategoryDto>,
) -> ApiResult<Json<Category>> {
    let id = parse_id(&id)?;
    a001_category::service::update(id, dto)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Category not found"))
}

/// DELETE /api/category/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    if a001_category::service::delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Category not found"))
    }
}
