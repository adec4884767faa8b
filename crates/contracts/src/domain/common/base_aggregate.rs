use super::EntityMetadata;
use serde::{Deserialize, Serialize};

/// Базовый агрегат с обязательными полями для всех агрегатов каталога
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    /// Уникальный идентификатор записи (назначается хранилищем)
    pub id: Id,
    /// Метаданные жизненного цикла
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    pub fn new(id: Id, created_by: impl Into<String>) -> Self {
        Self {
            id,
            metadata: EntityMetadata::new(created_by),
        }
    }

    /// Создать агрегат с существующими метаданными (для загрузки из БД)
    pub fn with_metadata(id: Id, metadata: EntityMetadata) -> Self {
        Self { id, metadata }
    }

    /// Обновить timestamp и версию перед записью
    pub fn touch(&mut self) {
        self.metadata.touch();
        self.metadata.increment_version();
    }
}
