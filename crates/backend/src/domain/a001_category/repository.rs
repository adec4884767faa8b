use chrono::Utc;
use contracts::domain::a001_category::aggregate::{Category, CategoryId, CategoryStatus};
use contracts::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub parent_id: Option<String>,
    pub created_by: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            created_by: m.created_by,
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        // Битая ссылка на родителя превращает категорию в корневую
        let parent = m
            .parent_id
            .as_deref()
            .and_then(|p| CategoryId::from_string(p).ok());

        Category::with_metadata(
            CategoryId(uuid),
            m.title,
            m.description,
            CategoryStatus::from_code(&m.status).unwrap_or_default(),
            parent,
            metadata,
        )
    }
}

fn to_active(aggregate: &Category) -> ActiveModel {
    let metadata = aggregate.metadata();
    ActiveModel {
        id: Set(aggregate.to_string_id()),
        title: Set(aggregate.title.clone()),
        description: Set(aggregate.description.clone()),
        status: Set(aggregate.status.as_str().to_string()),
        parent_id: Set(aggregate.parent.map(|p| p.as_string())),
        created_by: Set(metadata.created_by.clone()),
        is_deleted: Set(metadata.is_deleted),
        created_at: Set(Some(metadata.created_at)),
        updated_at: Set(Some(metadata.updated_at)),
        version: Set(metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Category>> {
    let mut items: Vec<Category> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(get_connection()?)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    Ok(items)
}

pub async fn get_by_id(id: CategoryId) -> anyhow::Result<Option<Category>> {
    let result = Entity::find_by_id(id.as_string())
        .filter(Column::IsDeleted.eq(false))
        .one(get_connection()?)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Category) -> anyhow::Result<()> {
    to_active(aggregate).insert(get_connection()?).await?;
    Ok(())
}

pub async fn update(aggregate: &Category) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.created_by = sea_orm::ActiveValue::NotSet;
    active.update(get_connection()?).await?;
    Ok(())
}

pub async fn soft_delete(id: CategoryId) -> anyhow::Result<bool> {
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
