//! Превью выбранных файлов через object URL

use contracts::shared::image_staging::{ImageCandidate, PreviewHandles};
use web_sys::{File, FileList, Url};

/// Выдаёт `blob:` URL для файла и отзывает его при освобождении
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUrlPreviews;

impl PreviewHandles<File> for ObjectUrlPreviews {
    fn create(&self, file: &File) -> String {
        Url::create_object_url_with_blob(file).unwrap_or_else(|e| {
            log::warn!("Failed to create preview for {}: {:?}", file.name(), e);
            String::new()
        })
    }

    fn release(&self, handle: &str) {
        if handle.is_empty() {
            return;
        }
        if let Err(e) = Url::revoke_object_url(handle) {
            log::warn!("Failed to revoke {}: {:?}", handle, e);
        }
    }
}

/// Файлы из `<input type="file">` или drag-and-drop в порядке выбора
pub fn candidates_from(files: Option<FileList>) -> Vec<ImageCandidate<File>> {
    let Some(files) = files else {
        return Vec::new();
    };
    (0..files.length())
        .filter_map(|i| files.get(i))
        .map(|file| ImageCandidate {
            name: file.name(),
            mime: file.type_(),
            size: file.size() as u64,
            file,
        })
        .collect()
}
