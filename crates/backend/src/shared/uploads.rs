//! Хранение загруженных изображений товаров на диске.
//!
//! Файлы раздаются статически по `/uploads/<имя>`, имя файла генерируется
//! заново, исходное имя пользователя на диск не попадает.

use contracts::domain::a002_product::aggregate::ProductImage;
use contracts::shared::image_staging::{check_image_file, MAX_STAGED_IMAGES};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::shared::format::format_size;

pub const UPLOADS_ROUTE: &str = "/uploads";

static UPLOADS_DIR: OnceCell<PathBuf> = OnceCell::new();

/// Файл из multipart-запроса
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub original_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Проверка типа и размера теми же правилами, что и на клиенте
    pub fn check(&self) -> Result<(), String> {
        check_image_file(&self.original_name, &self.mime, self.size())
    }
}

pub async fn initialize_uploads(dir: PathBuf) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&dir).await?;
    tracing::info!("Uploads directory: {}", dir.display());
    UPLOADS_DIR
        .set(dir)
        .map_err(|_| anyhow::anyhow!("Uploads directory is already initialized"))
}

pub fn uploads_dir() -> anyhow::Result<&'static Path> {
    UPLOADS_DIR
        .get()
        .map(PathBuf::as_path)
        .ok_or_else(|| anyhow::anyhow!("Uploads directory has not been initialized"))
}

pub fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}

pub fn stored_file_name(mime: &str) -> String {
    format!("{}.{}", Uuid::new_v4(), extension_for(mime))
}

pub fn public_url(file_name: &str) -> String {
    format!("{}/{}", UPLOADS_ROUTE, file_name)
}

/// Проверить пачку файлов; `existing`: число уже сохранённых изображений товара
pub fn check_batch(images: &[UploadedImage], existing: usize) -> Result<(), String> {
    if existing + images.len() > MAX_STAGED_IMAGES {
        return Err(format!(
            "Maximum {} images allowed. Please remove some images first.",
            MAX_STAGED_IMAGES
        ));
    }
    images.iter().try_for_each(UploadedImage::check)
}

/// Записать файлы в каталог и вернуть описания для агрегата
pub async fn save_images(dir: &Path, images: Vec<UploadedImage>) -> anyhow::Result<Vec<ProductImage>> {
    let mut saved = Vec::with_capacity(images.len());
    for image in images {
        let file_name = stored_file_name(&image.mime);
        let size = image.size();
        tokio::fs::write(dir.join(&file_name), &image.bytes).await?;
        tracing::info!(
            "Saved image {} as {} ({})",
            image.original_name,
            file_name,
            format_size(size)
        );
        saved.push(ProductImage {
            url: public_url(&file_name),
            file_name,
            mime: image.mime,
            size,
        });
    }
    Ok(saved)
}

/// Удалить файлы товара; отсутствующие файлы пропускаются
pub async fn remove_images(dir: &Path, images: &[ProductImage]) {
    for image in images {
        // Имя генерирует сервер, но ссылка на чужой каталог всё равно не допускается
        if image.file_name.contains(['/', '\\']) || image.file_name.contains("..") {
            tracing::warn!("Skipping suspicious image path {}", image.file_name);
            continue;
        }
        if let Err(e) = tokio::fs::remove_file(dir.join(&image.file_name)).await {
            tracing::warn!("Failed to remove image {}: {}", image.file_name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, mime: &str, size: usize) -> UploadedImage {
        UploadedImage {
            original_name: name.to_string(),
            mime: mime.to_string(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn stored_names_are_unique_with_extension() {
        let a = stored_file_name("image/jpeg");
        let b = stored_file_name("image/jpeg");
        assert_ne!(a, b);
        assert!(a.ends_with(".jpg"));
        assert_eq!(public_url("x.png"), "/uploads/x.png");
    }

    #[test]
    fn batch_check_uses_client_messages() {
        let batch = vec![upload("a.png", "image/png", 10), upload("doc.pdf", "application/pdf", 10)];
        assert_eq!(
            check_batch(&batch, 0),
            Err("Invalid file type: doc.pdf. Please upload only JPG, PNG, GIF, or WebP images.".into())
        );
        let batch = vec![upload("a.png", "image/png", 10)];
        assert!(check_batch(&batch, 5).is_ok());
        assert!(check_batch(&batch, 6).is_err());
    }

    #[tokio::test]
    async fn save_and_remove_round_trip_on_disk() {
        let dir = std::env::temp_dir().join(format!("catalog-uploads-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let saved = save_images(&dir, vec![upload("front.webp", "image/webp", 64)])
            .await
            .unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].size, 64);
        assert!(saved[0].file_name.ends_with(".webp"));
        assert!(dir.join(&saved[0].file_name).exists());

        remove_images(&dir, &saved).await;
        assert!(!dir.join(&saved[0].file_name).exists());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
