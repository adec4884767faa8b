//! Хранилище товаров: REST `/api/products`, запись через multipart/form-data

use crate::shared::api::{fetch_json, send_empty, send_json};
use crate::shared::api_utils::api_url;
use crate::shared::fixtures::sample_products;
use contracts::domain::a002_product::aggregate::{Product, ProductListFilter};
use contracts::domain::a002_product::draft::{IMAGES_WIRE_KEY, REMOVED_IMAGES_WIRE_KEY};
use contracts::domain::a002_product::form::{ProductSubmission, SubmitTarget};
use contracts::domain::common::AggregateId;
use contracts::shared::listing::{resolve_listing, FallbackPolicy, Listing};
use contracts::shared::store_error::StoreError;
use gloo_net::http::Request;
use web_sys::{File, FormData};

const API_PATH: &str = "/api/products";

fn js_error(e: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Decode(format!("{e:?}"))
}

fn list_url(filter: &ProductListFilter) -> Result<String, StoreError> {
    let query = serde_qs::to_string(filter).map_err(|e| StoreError::Decode(e.to_string()))?;
    Ok(if query.is_empty() {
        api_url(API_PATH)
    } else {
        format!("{}?{}", api_url(API_PATH), query)
    })
}

pub async fn list_products(filter: &ProductListFilter) -> Result<Vec<Product>, StoreError> {
    fetch_json(Request::get(&list_url(filter)?)).await
}

/// Товары по фильтру; при недоступном сервере демонстрационные
pub async fn load_products(filter: &ProductListFilter) -> Result<Listing<Product>, StoreError> {
    let fixtures = sample_products()
        .into_iter()
        .filter(|p| filter.matches(p))
        .collect();
    resolve_listing(
        list_products(filter).await,
        FallbackPolicy::Fixtures(fixtures),
    )
}

pub async fn get_product(id: &str) -> Result<Product, StoreError> {
    fetch_json(Request::get(&api_url(&format!("{}/{}", API_PATH, id)))).await
}

/// Тело запроса: текстовые поля в порядке формы, затем файлы под ключом `images`
fn build_form_data(submission: &ProductSubmission<File>) -> Result<FormData, StoreError> {
    let form_data = FormData::new().map_err(js_error)?;
    for (key, value) in &submission.fields {
        form_data.append_with_str(key, value).map_err(js_error)?;
    }
    for file in &submission.images {
        form_data
            .append_with_blob_and_filename(IMAGES_WIRE_KEY, file, &file.name())
            .map_err(js_error)?;
    }
    for file_name in &submission.removed_images {
        form_data
            .append_with_str(REMOVED_IMAGES_WIRE_KEY, file_name)
            .map_err(js_error)?;
    }
    Ok(form_data)
}

/// Выполнить запрос, подготовленный формой
pub async fn submit(submission: ProductSubmission<File>) -> Result<Product, StoreError> {
    let form_data = build_form_data(&submission)?;
    let builder = match submission.target {
        SubmitTarget::Create => Request::post(&api_url(API_PATH)),
        SubmitTarget::Update(id) => {
            Request::put(&api_url(&format!("{}/{}", API_PATH, id.as_string())))
        }
    };
    log::debug!(
        "Submitting product {} with {} new and {} removed images",
        submission.dto.sku,
        submission.images.len(),
        submission.removed_images.len()
    );
    send_json(builder.body(form_data)).await
}

pub async fn delete_product(id: &str) -> Result<(), StoreError> {
    send_empty(Request::delete(&api_url(&format!("{}/{}", API_PATH, id)))).await
}
