use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор категории
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s.trim())
            .map(CategoryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryStatus {
    #[default]
    Active,
    Inactive,
}

impl CategoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryStatus::Active => "Active",
            CategoryStatus::Inactive => "Inactive",
        }
    }

    pub fn all() -> [CategoryStatus; 2] {
        [CategoryStatus::Active, CategoryStatus::Inactive]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Active" => Some(CategoryStatus::Active),
            "Inactive" => Some(CategoryStatus::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryViolation {
    #[error("Please fill in the Category Name.")]
    MissingTitle,
    #[error("Invalid parent category reference")]
    InvalidParent,
    #[error("A category cannot be its own parent")]
    SelfParent,
    #[error("Selected parent category does not exist")]
    UnknownParent,
    #[error("Selected parent is a sub-category of this category")]
    ParentCycle,
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Категория товаров (верхнего уровня или подкатегория)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub base: BaseAggregate<CategoryId>,

    pub title: String,
    pub description: Option<String>,
    pub status: CategoryStatus,
    /// Ссылка на родителя; `None` для категории верхнего уровня
    pub parent: Option<CategoryId>,
}

impl Category {
    /// Создать новую категорию для вставки в БД
    pub fn new_for_insert(dto: &CategoryDto, created_by: &str) -> Result<Self, CategoryViolation> {
        let mut category = Self {
            base: BaseAggregate::new(CategoryId::new_v4(), created_by),
            title: String::new(),
            description: None,
            status: CategoryStatus::Active,
            parent: None,
        };
        category.update(dto)?;
        Ok(category)
    }

    /// Создать категорию с заданными метаданными (загрузка из БД, демо-данные)
    pub fn with_metadata(
        id: CategoryId,
        title: impl Into<String>,
        description: Option<String>,
        status: CategoryStatus,
        parent: Option<CategoryId>,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            base: BaseAggregate::with_metadata(id, metadata),
            title: title.into(),
            description,
            status,
            parent,
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &CategoryDto) -> Result<(), CategoryViolation> {
        self.title = dto.title.trim().to_string();
        self.description = dto
            .description
            .as_ref()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self.status = dto.status;
        self.parent = dto.parent_id()?;
        Ok(())
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), CategoryViolation> {
        if self.title.trim().is_empty() {
            return Err(CategoryViolation::MissingTitle);
        }
        if self.parent == Some(self.base.id) {
            return Err(CategoryViolation::SelfParent);
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Category {
    type Id = CategoryId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "category"
    }

    fn element_name() -> &'static str {
        "Category"
    }

    fn list_name() -> &'static str {
        "Categories"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления категории
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryDto {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: CategoryStatus,
    /// ID родителя строкой; пустая строка означает "без родителя"
    pub parent: Option<String>,
}

impl CategoryDto {
    pub fn from_category(category: &Category) -> Self {
        Self {
            title: category.title.clone(),
            description: category.description.clone(),
            status: category.status,
            parent: category.parent.map(|p| p.as_string()),
        }
    }

    /// Разобрать ссылку на родителя
    pub fn parent_id(&self) -> Result<Option<CategoryId>, CategoryViolation> {
        match self.parent.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => CategoryId::from_string(raw)
                .map(Some)
                .map_err(|_| CategoryViolation::InvalidParent),
        }
    }

    /// Проверка перед отправкой: обязателен только заголовок
    pub fn validate(&self) -> Result<(), CategoryViolation> {
        if self.title.trim().is_empty() {
            return Err(CategoryViolation::MissingTitle);
        }
        self.parent_id()?;
        Ok(())
    }
}
