//! Общие функции запросов к хранилищу.
//!
//! Сбой сети превращается в `StoreError::Network`, ответ с ошибкой в
//! `StoreError::from_status` с сообщением из тела `{ "message": ... }`.

use contracts::shared::store_error::{ApiErrorBody, StoreError};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

fn network_error(e: gloo_net::Error) -> StoreError {
    log::error!("Request failed: {}", e);
    StoreError::Network
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .map(|body| body.message);
    log::warn!("{} {} -> HTTP {}", response.url(), status, message.as_deref().unwrap_or("-"));
    Err(StoreError::from_status(status, message))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let response = check_status(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// GET/DELETE без тела с JSON-ответом
pub async fn fetch_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, StoreError> {
    let response = builder.send().await.map_err(network_error)?;
    read_json(response).await
}

/// Запрос с уже собранным телом
pub async fn send_json<T: DeserializeOwned>(
    request: Result<Request, gloo_net::Error>,
) -> Result<T, StoreError> {
    let request = request.map_err(|e| StoreError::Decode(e.to_string()))?;
    let response = request.send().await.map_err(network_error)?;
    read_json(response).await
}

/// Запрос без тела ответа (DELETE)
pub async fn send_empty(builder: RequestBuilder) -> Result<(), StoreError> {
    let response = builder.send().await.map_err(network_error)?;
    check_status(response).await.map(|_| ())
}
