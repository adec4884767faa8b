//! Хранилище категорий: REST `/api/category`

use crate::shared::api::{fetch_json, send_empty, send_json};
use crate::shared::api_utils::api_url;
use crate::shared::fixtures::{sample_categories, sample_parent_categories};
use contracts::domain::a001_category::aggregate::{Category, CategoryDto};
use contracts::domain::a001_category::form::CategorySubmission;
use contracts::domain::common::AggregateId;
use contracts::shared::listing::{resolve_listing, FallbackPolicy, Listing};
use contracts::shared::store_error::StoreError;
use gloo_net::http::Request;

const API_PATH: &str = "/api/category";

pub async fn list_categories() -> Result<Vec<Category>, StoreError> {
    fetch_json(Request::get(&api_url(API_PATH))).await
}

pub async fn list_parent_categories() -> Result<Vec<Category>, StoreError> {
    fetch_json(Request::get(&api_url(&format!("{}/parent", API_PATH)))).await
}

/// Все категории; при недоступном сервере демонстрационные
pub async fn load_categories() -> Result<Listing<Category>, StoreError> {
    resolve_listing(
        list_categories().await,
        FallbackPolicy::Fixtures(sample_categories()),
    )
}

/// Категории верхнего уровня; при недоступном сервере демонстрационные
pub async fn load_parent_categories() -> Result<Listing<Category>, StoreError> {
    resolve_listing(
        list_parent_categories().await,
        FallbackPolicy::Fixtures(sample_parent_categories()),
    )
}

pub async fn get_category(id: &str) -> Result<Category, StoreError> {
    fetch_json(Request::get(&api_url(&format!("{}/{}", API_PATH, id)))).await
}

async fn create_category(dto: &CategoryDto) -> Result<Category, StoreError> {
    send_json(Request::post(&api_url(API_PATH)).json(dto)).await
}

async fn update_category(id: &str, dto: &CategoryDto) -> Result<Category, StoreError> {
    send_json(Request::put(&api_url(&format!("{}/{}", API_PATH, id))).json(dto)).await
}

/// Выполнить запрос, подготовленный формой
pub async fn submit(submission: CategorySubmission) -> Result<Category, StoreError> {
    match submission {
        CategorySubmission::Create(dto) => create_category(&dto).await,
        CategorySubmission::Update(id, dto) => update_category(&id.as_string(), &dto).await,
    }
}

pub async fn delete_category(id: &str) -> Result<(), StoreError> {
    send_empty(Request::delete(&api_url(&format!("{}/{}", API_PATH, id)))).await
}
