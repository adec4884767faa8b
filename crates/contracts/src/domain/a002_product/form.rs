//! Контроллер формы товара: черновик, изображения, отправка.
//!
//! Как и форма категории, контроллер не ходит в сеть. `begin_submit`
//! возвращает `ProductSubmission`, результат запроса передаётся в
//! `finish_submit`.

use super::aggregate::{Product, ProductDto, ProductId, ProductImage};
use super::draft::{FieldPathError, ProductDraft, ProductField};
use super::validation::{validate_product, PLACEHOLDER_CATEGORY_PREFIX};
use crate::domain::a001_category::aggregate::Category;
use crate::domain::a001_category::tree::{CategoryNode, CategoryTree};
use crate::shared::listing::Listing;
use crate::shared::form_state::{FormPhase, FormStatus, SubmitOutcome};
use crate::shared::image_staging::{
    ImageCandidate, ImageStaging, PreviewHandles, StagedImage, StagedImageId, StagingReport,
    MAX_STAGED_IMAGES,
};
use crate::shared::store_error::StoreError;
use std::time::Duration;

pub const PRODUCT_GRID_ROUTE: &str = "/products/grid";
pub const PRODUCT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(ProductId),
}

/// Готовый запрос к хранилищу товаров
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSubmission<F> {
    pub target: SubmitTarget,
    /// Нормализованные данные
    pub dto: ProductDto,
    /// Пары ключ/значение для multipart (`supplier[name]` и т.п.)
    pub fields: Vec<(&'static str, String)>,
    /// Новые файлы в порядке добавления
    pub images: Vec<F>,
    /// Имена сохранённых изображений, которые надо убрать
    pub removed_images: Vec<String>,
}

pub struct ProductForm<F, P: PreviewHandles<F>> {
    draft: ProductDraft,
    editing: Option<ProductId>,
    existing_images: Vec<ProductImage>,
    removed_images: Vec<String>,
    staging: ImageStaging<F, P>,
    advisory: Option<&'static str>,
    status: FormStatus,
}

impl<F, P: PreviewHandles<F>> ProductForm<F, P> {
    pub fn new(previews: P) -> Self {
        Self {
            draft: ProductDraft::default(),
            editing: None,
            existing_images: Vec::new(),
            removed_images: Vec::new(),
            staging: ImageStaging::new(previews),
            advisory: None,
            status: FormStatus::default(),
        }
    }

    /// Форма редактирования; сохранённые изображения занимают часть лимита
    pub fn for_edit(product: &Product, previews: P) -> Self {
        let draft = ProductDraft::from_product(product);
        let capacity = MAX_STAGED_IMAGES.saturating_sub(product.images.len());
        Self {
            advisory: draft.price_advisory(),
            draft,
            editing: Some(product.base.id),
            existing_images: product.images.clone(),
            removed_images: Vec::new(),
            staging: ImageStaging::with_capacity(previews, capacity),
            status: FormStatus::default(),
        }
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn editing(&self) -> Option<ProductId> {
        self.editing
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.is_some()
    }

    pub fn existing_images(&self) -> &[ProductImage] {
        &self.existing_images
    }

    /// Сохранённые изображения, отмеченные на удаление
    pub fn removed_images(&self) -> &[String] {
        &self.removed_images
    }

    pub fn images(&self) -> &[StagedImage<F>] {
        self.staging.images()
    }

    /// Сколько ещё файлов можно добавить
    pub fn remaining_slots(&self) -> usize {
        self.staging.capacity().saturating_sub(self.staging.len())
    }

    /// Предупреждение о цене выше MRP
    pub fn advisory(&self) -> Option<&'static str> {
        self.advisory
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn edit(&mut self, field: ProductField, value: impl Into<String>) {
        self.draft = self.draft.with_field(field, value);
        if matches!(field, ProductField::Price | ProductField::Mrp) {
            self.advisory = self.draft.price_advisory();
        }
        self.status.resume_editing();
    }

    /// Изменить поле по пути вида `supplier.name`
    pub fn edit_path(&mut self, path: &str, value: impl Into<String>) -> Result<(), FieldPathError> {
        let field: ProductField = path.parse()?;
        self.edit(field, value);
        Ok(())
    }

    /// Добавить выбранные файлы; первое сообщение об отказе становится ошибкой формы.
    ///
    /// Во время отправки список файлов заморожен: пачка отклоняется целиком.
    pub fn stage_images(&mut self, batch: Vec<ImageCandidate<F>>) -> StagingReport {
        if self.is_loading() {
            return StagingReport {
                accepted: 0,
                rejected: batch.len(),
                error: None,
            };
        }
        let report = self.staging.stage(batch);
        match &report.error {
            Some(message) => self.status.set_error(message.clone()),
            None if report.accepted > 0 => self.status.clear_error(),
            None => {}
        }
        report
    }

    pub fn remove_image(&mut self, id: StagedImageId) -> bool {
        !self.is_loading() && self.staging.remove(id)
    }

    /// Убрать сохранённое изображение; освободившееся место доступно для новых файлов
    pub fn remove_existing_image(&mut self, file_name: &str) -> bool {
        if self.is_loading() {
            return false;
        }
        let Some(index) = self
            .existing_images
            .iter()
            .position(|image| image.file_name == file_name)
        else {
            return false;
        };
        let image = self.existing_images.remove(index);
        self.removed_images.push(image.file_name);
        self.staging
            .set_capacity(MAX_STAGED_IMAGES.saturating_sub(self.existing_images.len()));
        true
    }

    pub fn finish_submit(&mut self, result: Result<Product, StoreError>) -> SubmitOutcome {
        if self.status.phase() != FormPhase::Submitting {
            return SubmitOutcome::Ignored;
        }
        let (done, failed) = if self.is_edit_mode() {
            ("Product updated successfully!", "Failed to update product")
        } else {
            ("Product created successfully!", "Failed to create product")
        };

        match result {
            Ok(saved) => {
                self.staging.release_all();
                if self.is_edit_mode() {
                    self.draft = ProductDraft::from_product(&saved);
                    self.existing_images = saved.images;
                    self.removed_images.clear();
                    self.staging
                        .set_capacity(MAX_STAGED_IMAGES.saturating_sub(self.existing_images.len()));
                } else {
                    self.draft = ProductDraft::default();
                }
                self.advisory = None;
                self.status.succeed(done);
                SubmitOutcome::Saved {
                    message: done.to_string(),
                    redirect_to: PRODUCT_GRID_ROUTE,
                    delay: PRODUCT_REDIRECT_DELAY,
                }
            }
            Err(e) => {
                let message = e.surface(failed);
                self.status.fail(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}

impl<F: Clone, P: PreviewHandles<F>> ProductForm<F, P> {
    /// Проверить черновик и перейти в `Submitting`.
    ///
    /// При нарушении правила ошибка показывается в форме, запрос не создаётся.
    pub fn begin_submit(&mut self) -> Option<ProductSubmission<F>> {
        if !self.status.start_validation() {
            return None;
        }

        let image_count = self.existing_images.len() + self.staging.len();
        if let Err(violation) = validate_product(&self.draft, image_count) {
            self.status.reject(violation.to_string());
            return None;
        }

        let submission = ProductSubmission {
            target: match self.editing {
                Some(id) => SubmitTarget::Update(id),
                None => SubmitTarget::Create,
            },
            dto: self.draft.normalize(),
            fields: self.draft.multipart_fields(),
            images: self.staging.files(),
            removed_images: self.removed_images.clone(),
        };
        self.status.start_submission();
        Some(submission)
    }
}

/// Вариант в списке выбора категории
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChoice {
    pub value: String,
    pub label: String,
}

/// Варианты категории для формы товара в порядке дерева.
///
/// Для демонстрационных данных значения заменяются на `temp_N`, и такую
/// категорию форма не даст сохранить.
pub fn category_choices(listing: &Listing<Category>) -> Vec<CategoryChoice> {
    fn walk(node: &CategoryNode<'_>, depth: usize, out: &mut Vec<(String, String)>) {
        let label = format!("{}{}", "— ".repeat(depth), node.category.title);
        out.push((node.category.to_string_id(), label));
        for child in &node.children {
            walk(child, depth + 1, out);
        }
    }

    let tree = CategoryTree::new(listing.items.clone());
    let mut ordered = Vec::with_capacity(tree.len());
    for node in tree.nodes() {
        walk(&node, 0, &mut ordered);
    }

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, (id, label))| CategoryChoice {
            value: if listing.is_fixture() {
                format!("{}{}", PLACEHOLDER_CATEGORY_PREFIX, i + 1)
            } else {
                id
            },
            label,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_product::validation::test_support::valid_draft;
    use crate::domain::common::EntityMetadata;
    use crate::shared::image_staging::test_support::{png, CountingPreviews};
    use crate::shared::store_error::{NETWORK_ERROR_MESSAGE, SERVER_ERROR_MESSAGE};

    fn filled_form(previews: CountingPreviews) -> ProductForm<String, CountingPreviews> {
        let mut form = ProductForm::new(previews);
        let draft = valid_draft();
        for field in ProductField::ALL {
            form.edit(field, draft.get(field));
        }
        form
    }

    fn stored(images: usize) -> Product {
        let images = (0..images)
            .map(|i| ProductImage {
                file_name: format!("{i}.png"),
                url: format!("/uploads/{i}.png"),
                mime: "image/png".into(),
                size: 1024,
            })
            .collect();
        Product::with_metadata(
            ProductId::new_v4(),
            valid_draft().normalize(),
            images,
            EntityMetadata::new("Admin"),
        )
    }

    #[test]
    fn editing_name_updates_slug_and_price_updates_advisory() {
        let mut form = ProductForm::new(CountingPreviews::default());
        form.edit(ProductField::Name, "Red T-Shirt!! 2024");
        assert_eq!(form.draft().slug, "red-t-shirt-2024");

        form.edit(ProductField::Mrp, "100");
        form.edit(ProductField::Price, "150");
        assert_eq!(form.advisory(), Some("Selling price cannot be higher than MRP"));
        form.edit(ProductField::Price, "90");
        assert_eq!(form.advisory(), None);
    }

    #[test]
    fn edit_path_reaches_nested_fields() {
        let mut form = ProductForm::new(CountingPreviews::default());
        form.edit_path("shipping.deliveryTime", "2 days").unwrap();
        assert_eq!(form.draft().shipping.delivery_time, "2 days");
        assert!(form.edit_path("shipping.eta", "2 days").is_err());
    }

    #[test]
    fn validation_failure_makes_no_submission() {
        let mut form = filled_form(CountingPreviews::default());
        let outcome = form.begin_submit();
        assert!(outcome.is_none());
        assert_eq!(
            form.status().error(),
            Some("Please upload at least one product image")
        );
        assert_eq!(form.status().phase(), FormPhase::Editing);
    }

    #[test]
    fn submission_is_refused_while_in_flight() {
        let mut form = filled_form(CountingPreviews::default());
        form.stage_images(vec![png("front.png", 2 * 1024 * 1024)]);

        let submission = form.begin_submit().expect("valid form");
        assert_eq!(submission.target, SubmitTarget::Create);
        assert_eq!(submission.images, ["front.png"]);
        assert_eq!(submission.dto.tags, ["lamp", "office"]);
        assert!(submission.fields.contains(&("supplier[email]", "sales.acme@gmail.com".into())));
        assert!(form.is_loading());

        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn images_are_frozen_while_submitting() {
        let previews = CountingPreviews::default();
        let mut form = filled_form(previews.clone());
        form.stage_images(vec![png("a.png", 10)]);
        let staged = form.images()[0].id;

        let submission = form.begin_submit().expect("valid form");
        let report = form.stage_images(vec![png("b.png", 10)]);
        assert_eq!(report.accepted, 0);
        assert_eq!(report.rejected, 1);
        assert!(!form.remove_image(staged));
        assert_eq!(form.images().len(), submission.images.len());
        assert_eq!(previews.live.borrow().len(), 1);

        form.finish_submit(Ok(stored(1)));
        assert!(previews.live.borrow().is_empty());
        assert_eq!(previews.released.borrow().len(), 1);
    }

    #[test]
    fn success_clears_draft_and_releases_previews() {
        let previews = CountingPreviews::default();
        let mut form = filled_form(previews.clone());
        form.stage_images(vec![png("a.png", 10), png("b.png", 10)]);
        assert_eq!(previews.live.borrow().len(), 2);

        form.begin_submit().expect("valid form");
        let outcome = form.finish_submit(Ok(stored(2)));

        assert_eq!(
            outcome,
            SubmitOutcome::Saved {
                message: "Product created successfully!".into(),
                redirect_to: PRODUCT_GRID_ROUTE,
                delay: PRODUCT_REDIRECT_DELAY,
            }
        );
        assert_eq!(form.draft(), &ProductDraft::default());
        assert!(form.images().is_empty());
        assert!(previews.live.borrow().is_empty());
        assert_eq!(form.status().success(), Some("Product created successfully!"));
    }

    #[test]
    fn server_error_is_generic_and_draft_kept() {
        let mut form = filled_form(CountingPreviews::default());
        form.stage_images(vec![png("a.png", 10)]);
        form.begin_submit().expect("valid form");

        let outcome = form.finish_submit(Err(StoreError::Server {
            status: 500,
            message: Some("SQLITE_BUSY".into()),
        }));

        assert_eq!(outcome, SubmitOutcome::Failed(SERVER_ERROR_MESSAGE.into()));
        assert_eq!(form.draft().name, "Desk Lamp");
        assert_eq!(form.images().len(), 1);
        assert!(!form.is_loading());
    }

    #[test]
    fn validation_and_network_messages_are_surfaced() {
        let mut form = filled_form(CountingPreviews::default());
        form.stage_images(vec![png("a.png", 10)]);

        form.begin_submit().expect("valid form");
        form.finish_submit(Err(StoreError::Validation("SKU already exists".into())));
        assert_eq!(form.status().error(), Some("SKU already exists"));

        form.begin_submit().expect("valid form");
        form.finish_submit(Err(StoreError::Network));
        assert_eq!(form.status().error(), Some(NETWORK_ERROR_MESSAGE));
    }

    #[test]
    fn staging_errors_show_in_form() {
        let mut form = ProductForm::new(CountingPreviews::default());
        let report = form.stage_images(vec![png("huge.png", 6 * 1024 * 1024), png("ok.png", 10)]);
        assert_eq!(report.accepted, 1);
        assert_eq!(
            form.status().error(),
            Some("File too large: huge.png. Please upload images smaller than 5MB.")
        );
    }

    #[test]
    fn edit_mode_counts_persisted_images() {
        let product = stored(5);
        let mut form = ProductForm::for_edit(&product, CountingPreviews::default());
        assert_eq!(form.remaining_slots(), 1);
        assert_eq!(form.draft().name, "Desk Lamp");

        let report = form.stage_images(vec![png("a.png", 10), png("b.png", 10)]);
        assert_eq!(report.accepted, 1);

        // Сохранённых изображений достаточно для отправки без новых
        let mut untouched = ProductForm::for_edit(&product, CountingPreviews::default());
        let submission = untouched.begin_submit().expect("persisted images count");
        assert_eq!(submission.target, SubmitTarget::Update(product.base.id));
        assert!(submission.images.is_empty());
    }

    #[test]
    fn removing_saved_image_frees_a_slot() {
        let product = stored(6);
        let mut form = ProductForm::for_edit(&product, CountingPreviews::default());
        assert_eq!(form.remaining_slots(), 0);

        assert!(form.remove_existing_image("2.png"));
        assert!(!form.remove_existing_image("2.png"));
        assert_eq!(form.existing_images().len(), 5);
        assert_eq!(form.remaining_slots(), 1);
        assert_eq!(form.stage_images(vec![png("new.png", 10)]).accepted, 1);

        let submission = form.begin_submit().expect("valid form");
        assert_eq!(submission.removed_images, ["2.png"]);
        assert_eq!(submission.images, ["new.png"]);
        assert!(!form.remove_existing_image("3.png"));

        let mut saved = product.clone();
        saved.update(saved.data.clone(), &submission.removed_images, Vec::new());
        form.finish_submit(Ok(saved));
        assert!(form.removed_images().is_empty());
        assert_eq!(form.existing_images().len(), 5);
    }

    #[test]
    fn removing_every_saved_image_needs_a_new_one() {
        let product = stored(1);
        let mut form = ProductForm::for_edit(&product, CountingPreviews::default());
        assert!(form.remove_existing_image("0.png"));
        assert!(form.begin_submit().is_none());
        assert_eq!(
            form.status().error(),
            Some("Please upload at least one product image")
        );
    }

    #[test]
    fn category_choices_follow_tree_and_mask_fixtures() {
        use crate::domain::a001_category::aggregate::{CategoryId, CategoryStatus};
        use crate::shared::listing::FIXTURE_ADVISORY;

        let cat = |title: &str, parent: Option<CategoryId>| {
            Category::with_metadata(
                CategoryId::new_v4(),
                title,
                None,
                CategoryStatus::Active,
                parent,
                EntityMetadata::new("Admin"),
            )
        };
        let electronics = cat("Electronics", None);
        let phones = cat("Phones", Some(electronics.base.id));
        let books = cat("Books", None);

        let live = Listing::live(vec![phones.clone(), electronics.clone(), books]);
        let choices = category_choices(&live);
        let labels: Vec<_> = choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Books", "Electronics", "— Phones"]);
        assert_eq!(choices[2].value, phones.to_string_id());

        let fixtures = Listing {
            items: vec![electronics],
            advisory: Some(FIXTURE_ADVISORY.to_string()),
        };
        assert_eq!(category_choices(&fixtures)[0].value, "temp_1");
    }

    #[test]
    fn dropping_form_releases_previews() {
        let previews = CountingPreviews::default();
        {
            let mut form = ProductForm::new(previews.clone());
            form.stage_images(vec![png("a.png", 10)]);
        }
        assert!(previews.live.borrow().is_empty());
        assert_eq!(previews.released.borrow().len(), 1);
    }
}
