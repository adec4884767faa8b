use super::repository;
use crate::shared::config;
use contracts::domain::a001_category::aggregate::{Category, CategoryDto, CategoryId};
use contracts::domain::a001_category::tree::CategoryTree;
use contracts::domain::common::{AggregateId, AggregateRoot};

/// Все категории, отсортированные по названию
pub async fn list_all() -> anyhow::Result<Vec<Category>> {
    repository::list_all().await
}

/// Только категории верхнего уровня (варианты родителя для новой категории)
pub async fn list_parents() -> anyhow::Result<Vec<Category>> {
    let all = repository::list_all().await?;
    Ok(all.into_iter().filter(Category::is_top_level).collect())
}

pub async fn get_by_id(id: CategoryId) -> anyhow::Result<Option<Category>> {
    repository::get_by_id(id).await
}

/// Создание новой категории
pub async fn create(dto: CategoryDto) -> anyhow::Result<Category> {
    dto.validate()?;
    let mut aggregate = Category::new_for_insert(&dto, &config::created_by())?;

    let tree = CategoryTree::new(repository::list_all().await?);
    tree.check_parent(None, aggregate.parent)?;
    aggregate.validate()?;

    aggregate.before_write();
    repository::insert(&aggregate).await?;
    tracing::info!(
        "Created {} '{}' ({})",
        Category::element_name(),
        aggregate.display_name(),
        aggregate.id().as_string()
    );
    Ok(aggregate)
}

/// Обновление категории; `None`, если категория не найдена
pub async fn update(id: CategoryId, dto: CategoryDto) -> anyhow::Result<Option<Category>> {
    dto.validate()?;
    let Some(mut aggregate) = repository::get_by_id(id).await? else {
        return Ok(None);
    };

    aggregate.update(&dto)?;
    let tree = CategoryTree::new(repository::list_all().await?);
    tree.check_parent(Some(id), aggregate.parent)?;
    aggregate.validate()?;

    aggregate.before_write();
    repository::update(&aggregate).await?;
    tracing::info!(
        "Updated {} '{}' ({})",
        Category::element_name(),
        aggregate.display_name(),
        aggregate.id().as_string()
    );
    Ok(Some(aggregate))
}

/// Мягкое удаление; подкатегории остаются и показываются в корне
pub async fn delete(id: CategoryId) -> anyhow::Result<bool> {
    let deleted = repository::soft_delete(id).await?;
    if deleted {
        tracing::info!("Deleted {} {}", Category::element_name(), id.as_string());
    }
    Ok(deleted)
}
