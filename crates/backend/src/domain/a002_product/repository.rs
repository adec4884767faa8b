use chrono::Utc;
use contracts::domain::a002_product::aggregate::{
    Product, ProductDto, ProductId, ProductImage, ProductListFilter, Shipping, StockStatus,
    Supplier,
};
use contracts::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub category_id: String,
    pub price: f64,
    pub mrp: Option<f64>,
    pub discount_price: Option<f64>,
    pub stock_quantity: i64,
    pub stock_status: String,
    pub description: String,
    pub specification: String,
    pub colour: String,
    pub size: String,
    pub variants_json: String,
    pub brand: String,
    pub weight: String,
    pub dimensions: String,
    pub tags_json: String,
    pub warranty: String,
    pub return_policy: String,
    pub barcode: String,
    pub hsn_code: String,
    pub supplier_json: Option<String>,
    pub shipping_json: Option<String>,
    pub images_json: String,
    pub is_active: bool,
    pub created_by: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// JSON-колонка; повреждённое значение читается как пустое
fn from_json<T: DeserializeOwned + Default>(raw: &str, column: &str, id: &str) -> T {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!("Bad {} in product {}: {}", column, id, e);
        T::default()
    })
}

fn from_json_opt<T: DeserializeOwned>(raw: Option<&str>, column: &str, id: &str) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str::<T>(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Bad {} in product {}: {}", column, id, e);
            None
        }
    }
}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        let variants: Vec<String> = from_json(&m.variants_json, "variants", &m.id);
        let tags: Vec<String> = from_json(&m.tags_json, "tags", &m.id);
        let images: Vec<ProductImage> = from_json(&m.images_json, "images", &m.id);
        let supplier: Option<Supplier> = from_json_opt(m.supplier_json.as_deref(), "supplier", &m.id);
        let shipping: Option<Shipping> = from_json_opt(m.shipping_json.as_deref(), "shipping", &m.id);

        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            created_by: m.created_by,
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        let data = ProductDto {
            name: m.name,
            slug: m.slug,
            sku: m.sku,
            category: m.category_id,
            price: m.price,
            mrp: m.mrp,
            discount_price: m.discount_price,
            stock_quantity: m.stock_quantity,
            stock_status: StockStatus::from_code(&m.stock_status).unwrap_or_default(),
            description: m.description,
            specification: m.specification,
            colour: m.colour,
            size: m.size,
            variants,
            brand: m.brand,
            weight: m.weight,
            dimensions: m.dimensions,
            tags,
            warranty: m.warranty,
            return_policy: m.return_policy,
            barcode: m.barcode,
            hsn_code: m.hsn_code,
            supplier,
            shipping,
            is_active: m.is_active,
        };

        Product::with_metadata(ProductId(uuid), data, images, metadata)
    }
}

fn to_active(aggregate: &Product) -> anyhow::Result<ActiveModel> {
    let data = &aggregate.data;
    let metadata = aggregate.metadata();
    Ok(ActiveModel {
        id: Set(aggregate.to_string_id()),
        name: Set(data.name.clone()),
        slug: Set(data.slug.clone()),
        sku: Set(data.sku.clone()),
        category_id: Set(data.category.clone()),
        price: Set(data.price),
        mrp: Set(data.mrp),
        discount_price: Set(data.discount_price),
        stock_quantity: Set(data.stock_quantity),
        stock_status: Set(data.stock_status.as_str().to_string()),
        description: Set(data.description.clone()),
        specification: Set(data.specification.clone()),
        colour: Set(data.colour.clone()),
        size: Set(data.size.clone()),
        variants_json: Set(serde_json::to_string(&data.variants)?),
        brand: Set(data.brand.clone()),
        weight: Set(data.weight.clone()),
        dimensions: Set(data.dimensions.clone()),
        tags_json: Set(serde_json::to_string(&data.tags)?),
        warranty: Set(data.warranty.clone()),
        return_policy: Set(data.return_policy.clone()),
        barcode: Set(data.barcode.clone()),
        hsn_code: Set(data.hsn_code.clone()),
        supplier_json: Set(data.supplier.as_ref().map(serde_json::to_string).transpose()?),
        shipping_json: Set(data.shipping.as_ref().map(serde_json::to_string).transpose()?),
        images_json: Set(serde_json::to_string(&aggregate.images)?),
        is_active: Set(data.is_active),
        created_by: Set(metadata.created_by.clone()),
        is_deleted: Set(metadata.is_deleted),
        created_at: Set(Some(metadata.created_at)),
        updated_at: Set(Some(metadata.updated_at)),
        version: Set(metadata.version),
    })
}

/// Список товаров, новые сверху
pub async fn list(filter: &ProductListFilter) -> anyhow::Result<Vec<Product>> {
    let mut query = Entity::find().filter(Column::IsDeleted.eq(false));
    if let Some(category) = &filter.category {
        query = query.filter(Column::CategoryId.eq(category.clone()));
    }
    if let Some(status) = filter.stock_status {
        query = query.filter(Column::StockStatus.eq(status.as_str()));
    }

    let items = query
        .order_by_desc(Column::CreatedAt)
        .all(get_connection()?)
        .await?
        .into_iter()
        .map(Product::from)
        // Поиск по названию без учёта регистра выполняется в домене
        .filter(|p| filter.matches(p))
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: ProductId) -> anyhow::Result<Option<Product>> {
    let result = Entity::find_by_id(id.as_string())
        .filter(Column::IsDeleted.eq(false))
        .one(get_connection()?)
        .await?;
    Ok(result.map(Into::into))
}

/// Существует ли другой товар с таким SKU
pub async fn sku_taken(sku: &str, except: Option<ProductId>) -> anyhow::Result<bool> {
    let mut query = Entity::find()
        .filter(Column::Sku.eq(sku))
        .filter(Column::IsDeleted.eq(false));
    if let Some(id) = except {
        query = query.filter(Column::Id.ne(id.as_string()));
    }
    Ok(query.one(get_connection()?).await?.is_some())
}

pub async fn insert(aggregate: &Product) -> anyhow::Result<()> {
    to_active(aggregate)?.insert(get_connection()?).await?;
    Ok(())
}

pub async fn update(aggregate: &Product) -> anyhow::Result<()> {
    let mut active = to_active(aggregate)?;
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.created_by = sea_orm::ActiveValue::NotSet;
    active.update(get_connection()?).await?;
    Ok(())
}

pub async fn soft_delete(id: ProductId) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.as_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(get_connection()?)
        .await?;
    Ok(result.rows_affected > 0)
}
