//! Подготовка изображений товара до загрузки на сервер.
//!
//! Файл остаётся у клиента, для превью выдаётся дескриптор
//! (в браузере это object URL). Дескриптор нужно освободить при удалении
//! изображения, после успешной отправки и при уничтожении формы.

pub const MAX_STAGED_IMAGES: usize = 6;
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
pub const ACCEPTED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Допустимый ли MIME-тип изображения
pub fn is_accepted_image_type(mime: &str) -> bool {
    ACCEPTED_IMAGE_TYPES.contains(&mime)
}

/// Проверить тип и размер одного файла; текст ошибки показывается пользователю
pub fn check_image_file(name: &str, mime: &str, size: u64) -> Result<(), String> {
    if !is_accepted_image_type(mime) {
        return Err(format!(
            "Invalid file type: {}. Please upload only JPG, PNG, GIF, or WebP images.",
            name
        ));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(format!(
            "File too large: {}. Please upload images smaller than 5MB.",
            name
        ));
    }
    Ok(())
}

/// Файл, выбранный пользователем (ещё не принятый)
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCandidate<F> {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub file: F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StagedImageId(pub u64);

/// Принятый файл с дескриптором превью
#[derive(Debug, Clone, PartialEq)]
pub struct StagedImage<F> {
    pub id: StagedImageId,
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub preview: String,
    pub file: F,
}

/// Источник дескрипторов превью
pub trait PreviewHandles<F> {
    fn create(&self, file: &F) -> String;
    fn release(&self, handle: &str);
}

/// Итог приёма пачки файлов
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingReport {
    pub accepted: usize,
    pub rejected: usize,
    /// Первое сообщение об отказе в этой пачке
    pub error: Option<String>,
}

impl StagingReport {
    fn reject(&mut self, message: String) {
        self.rejected += 1;
        if self.error.is_none() {
            self.error = Some(message);
        }
    }
}

pub struct ImageStaging<F, P: PreviewHandles<F>> {
    images: Vec<StagedImage<F>>,
    previews: P,
    capacity: usize,
    next_id: u64,
}

impl<F, P: PreviewHandles<F>> ImageStaging<F, P> {
    pub fn new(previews: P) -> Self {
        Self::with_capacity(previews, MAX_STAGED_IMAGES)
    }

    /// Ёмкость меньше шести, когда у товара уже есть сохранённые изображения
    pub fn with_capacity(previews: P, capacity: usize) -> Self {
        Self {
            images: Vec::new(),
            previews,
            capacity: capacity.min(MAX_STAGED_IMAGES),
            next_id: 1,
        }
    }

    pub fn images(&self) -> &[StagedImage<F>] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.min(MAX_STAGED_IMAGES);
    }

    pub fn previews(&self) -> &P {
        &self.previews
    }

    /// Принять пачку файлов
    pub fn stage(&mut self, batch: Vec<ImageCandidate<F>>) -> StagingReport {
        let mut report = StagingReport::default();
        if batch.is_empty() {
            return report;
        }

        if self.images.len() >= self.capacity {
            report.rejected = batch.len();
            report.error = Some(format!(
                "Maximum {} images allowed. Please remove some images first.",
                MAX_STAGED_IMAGES
            ));
            return report;
        }

        let remaining = self.capacity - self.images.len();
        if batch.len() > remaining {
            report.rejected += batch.len() - remaining;
            report.error = Some(format!(
                "Only {} more images can be added ({} total allowed).",
                remaining, MAX_STAGED_IMAGES
            ));
        }

        for candidate in batch.into_iter().take(remaining) {
            if let Err(message) = check_image_file(&candidate.name, &candidate.mime, candidate.size) {
                report.reject(message);
                continue;
            }

            let preview = self.previews.create(&candidate.file);
            let id = StagedImageId(self.next_id);
            self.next_id += 1;
            self.images.push(StagedImage {
                id,
                name: candidate.name,
                mime: candidate.mime,
                size: candidate.size,
                preview,
                file: candidate.file,
            });
            report.accepted += 1;
        }

        report
    }

    /// Удалить изображение и освободить его превью
    pub fn remove(&mut self, id: StagedImageId) -> bool {
        match self.images.iter().position(|img| img.id == id) {
            Some(index) => {
                let removed = self.images.remove(index);
                self.previews.release(&removed.preview);
                true
            }
            None => false,
        }
    }

    /// Освободить все превью и очистить список
    pub fn release_all(&mut self) {
        for image in self.images.drain(..) {
            self.previews.release(&image.preview);
        }
    }
}

impl<F: Clone, P: PreviewHandles<F>> ImageStaging<F, P> {
    /// Файлы в порядке добавления
    pub fn files(&self) -> Vec<F> {
        self.images.iter().map(|img| img.file.clone()).collect()
    }
}

impl<F, P: PreviewHandles<F>> Drop for ImageStaging<F, P> {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Счётчик выданных и освобождённых дескрипторов
    #[derive(Clone, Default)]
    pub struct CountingPreviews {
        pub live: Rc<RefCell<Vec<String>>>,
        pub released: Rc<RefCell<Vec<String>>>,
        issued: Rc<RefCell<u32>>,
    }

    impl PreviewHandles<String> for CountingPreviews {
        fn create(&self, file: &String) -> String {
            let mut issued = self.issued.borrow_mut();
            *issued += 1;
            let handle = format!("blob:{}#{}", file, issued);
            self.live.borrow_mut().push(handle.clone());
            handle
        }

        fn release(&self, handle: &str) {
            self.live.borrow_mut().retain(|h| h != handle);
            self.released.borrow_mut().push(handle.to_string());
        }
    }

    pub fn png(name: &str, size: u64) -> ImageCandidate<String> {
        ImageCandidate {
            name: name.to_string(),
            mime: "image/png".to_string(),
            size,
            file: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{png, CountingPreviews};
    use super::*;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn seven_files_into_empty_list_keeps_six() {
        let previews = CountingPreviews::default();
        let mut staging = ImageStaging::new(previews.clone());
        let batch = (1..=7).map(|i| png(&format!("p{i}.png"), MB)).collect();

        let report = staging.stage(batch);

        assert_eq!(staging.len(), 6);
        assert_eq!(report.accepted, 6);
        assert_eq!(report.rejected, 1);
        assert_eq!(
            report.error.as_deref(),
            Some("Only 6 more images can be added (6 total allowed).")
        );
        assert_eq!(previews.live.borrow().len(), 6);
    }

    #[test]
    fn full_list_rejects_whole_batch() {
        let mut staging = ImageStaging::new(CountingPreviews::default());
        staging.stage((0..6).map(|i| png(&format!("{i}.png"), MB)).collect());

        let report = staging.stage(vec![png("extra.png", MB)]);

        assert_eq!(staging.len(), 6);
        assert_eq!(report.accepted, 0);
        assert_eq!(
            report.error.as_deref(),
            Some("Maximum 6 images allowed. Please remove some images first.")
        );
    }

    #[test]
    fn oversized_file_is_named_in_error() {
        let mut staging = ImageStaging::new(CountingPreviews::default());

        let report = staging.stage(vec![png("huge.png", 6 * MB), png("small.png", 2 * MB)]);

        assert_eq!(staging.len(), 1);
        assert_eq!(staging.images()[0].name, "small.png");
        assert_eq!(
            report.error.as_deref(),
            Some("File too large: huge.png. Please upload images smaller than 5MB.")
        );
    }

    #[test]
    fn exactly_five_megabytes_is_accepted() {
        let mut staging = ImageStaging::new(CountingPreviews::default());
        let report = staging.stage(vec![png("edge.png", MAX_IMAGE_BYTES)]);
        assert_eq!(report.accepted, 1);
        assert!(report.error.is_none());
    }

    #[test]
    fn first_offending_file_wins() {
        let mut staging = ImageStaging::new(CountingPreviews::default());
        let mut doc = png("notes.pdf", MB);
        doc.mime = "application/pdf".into();

        let report = staging.stage(vec![doc, png("huge.png", 9 * MB)]);

        assert_eq!(report.rejected, 2);
        assert_eq!(
            report.error.as_deref(),
            Some("Invalid file type: notes.pdf. Please upload only JPG, PNG, GIF, or WebP images.")
        );
    }

    #[test]
    fn remove_releases_preview_and_keeps_order() {
        let previews = CountingPreviews::default();
        let mut staging = ImageStaging::new(previews.clone());
        staging.stage(vec![png("a.png", MB), png("b.png", MB), png("c.png", MB)]);
        let middle = staging.images()[1].id;
        let middle_preview = staging.images()[1].preview.clone();

        assert!(staging.remove(middle));
        assert!(!staging.remove(middle));

        let names: Vec<_> = staging.images().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a.png", "c.png"]);
        assert_eq!(*previews.released.borrow(), vec![middle_preview]);
    }

    #[test]
    fn ids_stay_unique_after_removal() {
        let mut staging = ImageStaging::new(CountingPreviews::default());
        staging.stage(vec![png("a.png", MB)]);
        let first = staging.images()[0].id;
        staging.remove(first);
        staging.stage(vec![png("b.png", MB)]);
        assert_ne!(staging.images()[0].id, first);
    }

    #[test]
    fn drop_releases_everything() {
        let previews = CountingPreviews::default();
        {
            let mut staging = ImageStaging::new(previews.clone());
            staging.stage(vec![png("a.png", MB), png("b.png", MB)]);
            assert_eq!(previews.live.borrow().len(), 2);
        }
        assert!(previews.live.borrow().is_empty());
        assert_eq!(previews.released.borrow().len(), 2);
    }

    #[test]
    fn reduced_capacity_counts_persisted_images() {
        let mut staging = ImageStaging::with_capacity(CountingPreviews::default(), 2);
        let report = staging.stage(vec![png("a.png", MB), png("b.png", MB), png("c.png", MB)]);
        assert_eq!(staging.len(), 2);
        assert_eq!(
            report.error.as_deref(),
            Some("Only 2 more images can be added (6 total allowed).")
        );
    }
}
