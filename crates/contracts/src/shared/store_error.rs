//! Ошибки обращения к хранилищам (REST API) и их перевод в текст для UI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Cannot connect to server. Please check if the backend is running.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";

/// Тело ответа с ошибкой, которое отдаёт бэкенд
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Ошибка вызова хранилища
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Сервер отклонил данные (400)
    #[error("{0}")]
    Validation(String),

    /// Запись не найдена (404)
    #[error("Not found")]
    NotFound,

    /// Сервер недоступен
    #[error("Cannot connect to server. Please check if the backend is running.")]
    Network,

    /// Прочие ответы сервера с ошибкой
    #[error("HTTP {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// Ответ не удалось разобрать
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Классифицировать ответ по HTTP-статусу и сообщению из тела
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty());
        match status {
            400 | 422 => StoreError::Validation(
                message.unwrap_or_else(|| "Invalid data".to_string()),
            ),
            404 => StoreError::NotFound,
            _ => StoreError::Server { status, message },
        }
    }

    /// Ошибка сервера (5xx)
    pub fn is_server_fault(&self) -> bool {
        matches!(self, StoreError::Server { status, .. } if *status >= 500)
    }

    /// Единственная строка, которую форма показывает пользователю.
    ///
    /// 5xx никогда не показывают сырое сообщение, 4xx показывают сообщение
    /// сервера, если оно есть, иначе `fallback`.
    pub fn surface(&self, fallback: &str) -> String {
        match self {
            StoreError::Validation(message) => message.clone(),
            StoreError::Network => NETWORK_ERROR_MESSAGE.to_string(),
            StoreError::Server { status, .. } if *status >= 500 => {
                SERVER_ERROR_MESSAGE.to_string()
            }
            StoreError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            StoreError::NotFound | StoreError::Server { .. } | StoreError::Decode(_) => {
                fallback.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_500_surfaces_generic_message() {
        let err = StoreError::from_status(500, Some("panicked at db.rs:42".into()));
        assert!(err.is_server_fault());
        assert_eq!(err.surface("Failed to create product"), SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn bad_request_surfaces_server_message() {
        let err = StoreError::from_status(400, Some("SKU already exists".into()));
        assert_eq!(err, StoreError::Validation("SKU already exists".into()));
        assert_eq!(err.surface("Failed to create product"), "SKU already exists");
    }

    #[test]
    fn other_client_errors_fall_back() {
        assert_eq!(
            StoreError::from_status(409, None).surface("Failed to create product"),
            "Failed to create product"
        );
        assert_eq!(
            StoreError::from_status(409, Some("Duplicate slug".into())).surface("x"),
            "Duplicate slug"
        );
        assert_eq!(StoreError::from_status(404, None), StoreError::NotFound);
    }

    #[test]
    fn network_failure_is_shown_verbatim() {
        assert_eq!(StoreError::Network.surface("ignored"), NETWORK_ERROR_MESSAGE);
        assert_eq!(StoreError::Network.to_string(), NETWORK_ERROR_MESSAGE);
    }
}
