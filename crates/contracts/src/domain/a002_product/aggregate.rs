use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор товара
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub Uuid);

impl ProductId {
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

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s.trim())
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Value objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StockStatus {
    #[default]
    InStock,
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "InStock",
            StockStatus::OutOfStock => "OutOfStock",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }

    pub fn all() -> [StockStatus; 2] {
        [StockStatus::InStock, StockStatus::OutOfStock]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "InStock" => Some(StockStatus::InStock),
            "OutOfStock" => Some(StockStatus::OutOfStock),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    pub contact: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipping {
    pub charges: f64,
    #[serde(rename = "deliveryTime")]
    pub delivery_time: String,
    pub restrictions: String,
}

/// Сохранённое изображение товара
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub url: String,
    pub mime: String,
    pub size: u64,
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Товар каталога
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductId>,

    #[serde(flatten)]
    pub data: ProductDto,

    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    pub fn new_for_insert(data: ProductDto, images: Vec<ProductImage>, created_by: &str) -> Self {
        Self {
            base: BaseAggregate::new(ProductId::new_v4(), created_by),
            data,
            images,
        }
    }

    pub fn with_metadata(
        id: ProductId,
        data: ProductDto,
        images: Vec<ProductImage>,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            base: BaseAggregate::with_metadata(id, metadata),
            data,
            images,
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Сколько сохранённых изображений останется после удаления `removed`
    pub fn retained_image_count(&self, removed: &[String]) -> usize {
        self.images
            .iter()
            .filter(|image| !removed.contains(&image.file_name))
            .count()
    }

    /// Обновить данные: убрать изображения из `removed`, добавить новые.
    /// Возвращает убранные изображения.
    pub fn update(
        &mut self,
        data: ProductDto,
        removed: &[String],
        new_images: Vec<ProductImage>,
    ) -> Vec<ProductImage> {
        self.data = data;
        let (dropped, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.images)
            .into_iter()
            .partition(|image| removed.contains(&image.file_name));
        self.images = kept;
        self.images.extend(new_images);
        dropped
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn display_name(&self) -> &str {
        &self.data.name
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Нормализованные данные товара (результат `ProductDraft::normalize`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub name: String,
    pub slug: String,
    pub sku: String,
    /// ID категории
    pub category: String,
    pub price: f64,
    pub mrp: Option<f64>,
    #[serde(rename = "discountPrice")]
    pub discount_price: Option<f64>,
    #[serde(rename = "stockQuantity")]
    pub stock_quantity: i64,
    #[serde(rename = "stockStatus")]
    pub stock_status: StockStatus,
    pub description: String,
    pub specification: String,
    pub colour: String,
    pub size: String,
    pub variants: Vec<String>,
    pub brand: String,
    pub weight: String,
    pub dimensions: String,
    pub tags: Vec<String>,
    pub warranty: String,
    #[serde(rename = "returnPolicy")]
    pub return_policy: String,
    pub barcode: String,
    #[serde(rename = "hsnCode")]
    pub hsn_code: String,
    pub supplier: Option<Supplier>,
    pub shipping: Option<Shipping>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

/// Фильтр списка товаров (query string)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "stockStatus", skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<StockStatus>,
    /// Поиск по названию или SKU
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ProductListFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.stock_status.is_none() && self.search.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if &product.data.category != category {
                return false;
            }
        }
        if let Some(status) = self.stock_status {
            if product.data.stock_status != status {
                return false;
            }
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            if !product.data.name.to_lowercase().contains(&needle)
                && !product.data.sku.contains(search)
            {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_product::draft::ProductDraft;

    fn product(name: &str, sku: &str, category: &str, status: StockStatus) -> Product {
        let mut data = ProductDraft {
            name: name.into(),
            sku: sku.into(),
            category: category.into(),
            ..ProductDraft::default()
        }
        .normalize();
        data.stock_status = status;
        Product::new_for_insert(data, Vec::new(), "test")
    }

    fn image(file_name: &str) -> ProductImage {
        ProductImage {
            file_name: file_name.into(),
            url: format!("/uploads/{file_name}"),
            mime: "image/png".into(),
            size: 10,
        }
    }

    #[test]
    fn update_replaces_removed_images() {
        let mut lamp = product("Lamp", "55501", "c1", StockStatus::InStock);
        lamp.images = vec![image("a.png"), image("b.png"), image("c.png")];
        let removed = vec!["b.png".to_string(), "missing.png".to_string()];
        assert_eq!(lamp.retained_image_count(&removed), 2);

        let data = lamp.data.clone();
        let dropped = lamp.update(data, &removed, vec![image("d.png")]);

        assert_eq!(dropped, [image("b.png")]);
        let names: Vec<_> = lamp.images.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, ["a.png", "c.png", "d.png"]);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ProductListFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&product("Desk", "10001", "c1", StockStatus::OutOfStock)));
    }

    #[test]
    fn search_by_name_ignores_case_and_sku_is_exact() {
        let lamp = product("Reading Lamp", "55501", "c1", StockStatus::InStock);
        let by_name = ProductListFilter {
            search: Some("  lamp ".into()),
            ..Default::default()
        };
        let by_sku = ProductListFilter {
            search: Some("555".into()),
            ..Default::default()
        };
        let miss = ProductListFilter {
            search: Some("chair".into()),
            ..Default::default()
        };
        assert!(by_name.matches(&lamp));
        assert!(by_sku.matches(&lamp));
        assert!(!miss.matches(&lamp));
    }

    #[test]
    fn category_and_stock_status_narrow_the_list() {
        let lamp = product("Lamp", "55501", "c1", StockStatus::InStock);
        let filter = ProductListFilter {
            category: Some("c1".into()),
            stock_status: Some(StockStatus::OutOfStock),
            search: None,
        };
        assert!(!filter.matches(&lamp));
        let filter = ProductListFilter {
            stock_status: Some(StockStatus::InStock),
            ..filter
        };
        assert!(filter.matches(&lamp));
    }
}
