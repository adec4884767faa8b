//! Политика подстановки демонстрационных данных, когда сервер недоступен.

use super::store_error::StoreError;

pub const FIXTURE_ADVISORY: &str = "Unable to connect to backend. Showing sample data.";

/// Что делать со списком, если запрос не удался
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackPolicy<T> {
    /// Вернуть ошибку вызывающему коду
    Propagate,
    /// При сетевой ошибке показать эти записи
    Fixtures(Vec<T>),
}

/// Список для отображения и необязательное предупреждение
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub advisory: Option<String>,
}

impl<T> Listing<T> {
    pub fn live(items: Vec<T>) -> Self {
        Self {
            items,
            advisory: None,
        }
    }

    pub fn is_fixture(&self) -> bool {
        self.advisory.is_some()
    }
}

/// Применить политику к результату запроса списка.
///
/// Подстановка происходит только при `StoreError::Network`; ответы сервера
/// с ошибкой пробрасываются как есть.
pub fn resolve_listing<T>(
    result: Result<Vec<T>, StoreError>,
    policy: FallbackPolicy<T>,
) -> Result<Listing<T>, StoreError> {
    match (result, policy) {
        (Ok(items), _) => Ok(Listing::live(items)),
        (Err(StoreError::Network), FallbackPolicy::Fixtures(items)) => Ok(Listing {
            items,
            advisory: Some(FIXTURE_ADVISORY.to_string()),
        }),
        (Err(e), _) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_data_wins() {
        let listing = resolve_listing(Ok(vec![1, 2]), FallbackPolicy::Fixtures(vec![9])).unwrap();
        assert_eq!(listing.items, vec![1, 2]);
        assert!(!listing.is_fixture());
    }

    #[test]
    fn network_failure_uses_fixtures_with_advisory() {
        let listing =
            resolve_listing(Err(StoreError::Network), FallbackPolicy::Fixtures(vec![9])).unwrap();
        assert_eq!(listing.items, vec![9]);
        assert_eq!(listing.advisory.as_deref(), Some(FIXTURE_ADVISORY));
    }

    #[test]
    fn server_errors_are_not_masked() {
        let err = resolve_listing::<i32>(
            Err(StoreError::from_status(500, None)),
            FallbackPolicy::Fixtures(vec![9]),
        )
        .unwrap_err();
        assert!(err.is_server_fault());
    }

    #[test]
    fn propagate_policy_keeps_network_error() {
        let err = resolve_listing::<i32>(Err(StoreError::Network), FallbackPolicy::Propagate)
            .unwrap_err();
        assert_eq!(err, StoreError::Network);
    }
}
