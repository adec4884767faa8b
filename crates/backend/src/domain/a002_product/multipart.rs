//! Разбор multipart-запроса создания/обновления товара.
//!
//! Текстовые части адресуют поля черновика (`name`, `supplier[name]`, ...),
//! части `images` содержат файлы, `removeImages` называют сохранённые
//! изображения, которые надо убрать.

use axum::extract::Multipart;
use contracts::domain::a002_product::draft::{ProductDraft, IMAGES_WIRE_KEY, REMOVED_IMAGES_WIRE_KEY};

use crate::shared::error::Rejected;
use crate::shared::uploads::UploadedImage;

#[derive(Debug, Default)]
pub struct ProductUpload {
    pub draft: ProductDraft,
    pub images: Vec<UploadedImage>,
    /// Имена сохранённых файлов на удаление (только при обновлении)
    pub removed_images: Vec<String>,
}

/// Применить текстовое поле; неизвестные ключи пропускаются
pub fn apply_text_field(draft: ProductDraft, key: &str, value: String) -> ProductDraft {
    match draft.with_path(key, value) {
        Ok(next) => next,
        Err(e) => {
            tracing::warn!("Ignoring multipart field: {}", e);
            draft
        }
    }
}

pub async fn read_product_upload(multipart: &mut Multipart) -> anyhow::Result<ProductUpload> {
    let mut upload = ProductUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Rejected(format!("Invalid multipart request: {}", e)))?
    {
        let key = field.name().unwrap_or_default().to_string();

        if key == IMAGES_WIRE_KEY || key == "images[]" {
            let original_name = field.file_name().unwrap_or("image").to_string();
            let mime = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| Rejected(format!("Failed to read {}: {}", original_name, e)))?;
            if bytes.is_empty() {
                continue;
            }
            upload.images.push(UploadedImage {
                original_name,
                mime,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| Rejected(format!("Invalid value for {}: {}", key, e)))?;
        // Пустое значение означает "поле не заполнено", как в черновике по умолчанию
        if value.is_empty() && key != "isActive" {
            continue;
        }
        if key == REMOVED_IMAGES_WIRE_KEY || key == "removeImages[]" {
            upload.removed_images.push(value);
            continue;
        }
        upload.draft = apply_text_field(upload.draft, &key, value);
    }

    Ok(upload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;

    const BOUNDARY: &str = "catalogboundary";

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn file_part(name: &str, file_name: &str, mime: &str, content: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n{content}\r\n"
        )
    }

    async fn parse(parts: &[String]) -> ProductUpload {
        let body = format!("{}--{BOUNDARY}--\r\n", parts.concat());
        let request = Request::builder()
            .method("POST")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let mut multipart = Multipart::from_request(request, &()).await.unwrap();
        read_product_upload(&mut multipart).await.unwrap()
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let draft = apply_text_field(ProductDraft::default(), "supplier[phone]", "1".into());
        assert_eq!(draft, ProductDraft::default());
    }

    #[tokio::test]
    async fn nested_keys_and_files_are_mapped() {
        let upload = parse(&[
            text_part("name", "Desk Lamp"),
            text_part("supplier[name]", "Acme Lights"),
            text_part("shipping[deliveryTime]", "3-5 days"),
            text_part("tags", "lamp, office"),
            text_part("mrp", ""),
            file_part("images", "front.png", "image/png", "PNGDATA"),
            file_part("images", "empty.png", "image/png", ""),
        ])
        .await;

        assert_eq!(upload.draft.name, "Desk Lamp");
        assert_eq!(upload.draft.slug, "desk-lamp");
        assert_eq!(upload.draft.supplier.name, "Acme Lights");
        assert_eq!(upload.draft.shipping.delivery_time, "3-5 days");
        assert_eq!(upload.draft.normalize().tags, ["lamp", "office"]);
        assert_eq!(upload.draft.mrp, "");

        assert_eq!(upload.images.len(), 1);
        assert_eq!(upload.images[0].original_name, "front.png");
        assert_eq!(upload.images[0].mime, "image/png");
        assert_eq!(upload.images[0].bytes, b"PNGDATA");
    }

    #[tokio::test]
    async fn explicit_slug_after_name_wins() {
        let upload = parse(&[
            text_part("name", "Desk Lamp"),
            text_part("slug", "lamp-2024"),
            text_part("isActive", "false"),
        ])
        .await;
        assert_eq!(upload.draft.slug, "lamp-2024");
        assert!(!upload.draft.is_active);
    }

    #[tokio::test]
    async fn removed_images_are_collected() {
        let upload = parse(&[
            text_part("removeImages", "a.png"),
            text_part("removeImages[]", "b.png"),
            text_part("removeImages", ""),
        ])
        .await;
        assert_eq!(upload.removed_images, ["a.png", "b.png"]);
        assert_eq!(upload.draft, ProductDraft::default());
    }
}
