use super::multipart::ProductUpload;
use super::repository;
use crate::domain::a001_category;
use crate::shared::config;
use crate::shared::error::Rejected;
use crate::shared::uploads::{self, check_batch};
use contracts::domain::a001_category::aggregate::CategoryId;
use contracts::domain::a002_product::aggregate::{Product, ProductId, ProductListFilter};
use contracts::domain::a002_product::validation::validate_product;
use contracts::domain::common::{AggregateId, AggregateRoot};

pub async fn list(filter: &ProductListFilter) -> anyhow::Result<Vec<Product>> {
    repository::list(filter).await
}

pub async fn get_by_id(id: ProductId) -> anyhow::Result<Option<Product>> {
    repository::get_by_id(id).await
}

/// Проверки, требующие данных из БД
async fn check_references(upload: &ProductUpload, editing: Option<ProductId>) -> anyhow::Result<()> {
    let category = CategoryId::from_string(&upload.draft.category)
        .map_err(|_| Rejected("Please select a valid category or create categories first".into()))?;
    if a001_category::service::get_by_id(category).await?.is_none() {
        return Err(Rejected("Selected category does not exist".into()).into());
    }

    if repository::sku_taken(upload.draft.sku.trim(), editing).await? {
        return Err(Rejected("A product with this SKU already exists".into()).into());
    }
    Ok(())
}

/// Создание товара из multipart-запроса
pub async fn create(upload: ProductUpload) -> anyhow::Result<Product> {
    check_batch(&upload.images, 0).map_err(Rejected)?;
    validate_product(&upload.draft, upload.images.len())?;
    check_references(&upload, None).await?;

    let dto = upload.draft.normalize();
    let dir = uploads::uploads_dir()?;
    let images = uploads::save_images(dir, upload.images).await?;

    let mut aggregate = Product::new_for_insert(dto, images, &config::created_by());
    aggregate.before_write();
    if let Err(e) = repository::insert(&aggregate).await {
        uploads::remove_images(dir, &aggregate.images).await;
        return Err(e);
    }

    tracing::info!(
        "Created {} '{}' ({}) with {} image(s)",
        Product::element_name(),
        aggregate.display_name(),
        aggregate.id().as_string(),
        aggregate.images.len()
    );
    Ok(aggregate)
}

/// Обновление товара: отмеченные изображения удаляются вместе с файлами,
/// новые добавляются к сохранённым. `None`, если товар не найден.
pub async fn update(id: ProductId, upload: ProductUpload) -> anyhow::Result<Option<Product>> {
    let Some(mut aggregate) = repository::get_by_id(id).await? else {
        return Ok(None);
    };

    let existing = aggregate.retained_image_count(&upload.removed_images);
    check_batch(&upload.images, existing).map_err(Rejected)?;
    validate_product(&upload.draft, existing + upload.images.len())?;
    check_references(&upload, Some(id)).await?;

    let dto = upload.draft.normalize();
    let dir = uploads::uploads_dir()?;
    let added = uploads::save_images(dir, upload.images).await?;

    let dropped = aggregate.update(dto, &upload.removed_images, added.clone());
    aggregate.before_write();
    if let Err(e) = repository::update(&aggregate).await {
        uploads::remove_images(dir, &added).await;
        return Err(e);
    }
    uploads::remove_images(dir, &dropped).await;

    tracing::info!(
        "Updated {} '{}' ({})",
        Product::element_name(),
        aggregate.display_name(),
        aggregate.id().as_string()
    );
    Ok(Some(aggregate))
}

/// Мягкое удаление; файлы изображений остаются на диске
pub async fn delete(id: ProductId) -> anyhow::Result<bool> {
    let deleted = repository::soft_delete(id).await?;
    if deleted {
        tracing::info!("Deleted {} {}", Product::element_name(), id.as_string());
    }
    Ok(deleted)
}
