use crate::domain::a001_category::api as category_api;
use crate::domain::a002_product::api;
use crate::shared::preview::ObjectUrlPreviews;
use contracts::domain::a002_product::draft::ProductField;
use contracts::domain::a002_product::form::{category_choices, CategoryChoice, ProductForm};
use contracts::shared::form_state::SubmitOutcome;
use contracts::shared::image_staging::{ImageCandidate, StagedImageId};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use web_sys::File;

pub const CATEGORIES_UNAVAILABLE: &str =
    "Failed to load categories. Please try creating some categories first.";

pub type BrowserProductForm = ProductForm<File, ObjectUrlPreviews>;

/// ViewModel формы товара.
///
/// Форма держит `web_sys::File`, поэтому сигнал локальный. При уничтожении
/// сигнала форма освобождает object URL всех превью.
#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub form: RwSignal<BrowserProductForm, LocalStorage>,
    pub categories: RwSignal<Vec<CategoryChoice>>,
    pub advisory: RwSignal<Option<String>>,
    pub load_error: RwSignal<Option<String>>,
}

impl ProductDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new_local(ProductForm::new(ObjectUrlPreviews)),
            categories: RwSignal::new(Vec::new()),
            advisory: RwSignal::new(None),
            load_error: RwSignal::new(None),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.is_edit_mode())
    }

    pub fn is_loading(&self) -> bool {
        self.form.with(|f| f.is_loading())
    }

    pub fn value(&self, field: ProductField) -> String {
        self.form.with(|f| f.draft().get(field))
    }

    pub fn error(&self) -> Option<String> {
        self.form
            .with(|f| f.status().error().map(str::to_string))
            .or_else(|| self.load_error.get())
    }

    pub fn success(&self) -> Option<String> {
        self.form.with(|f| f.status().success().map(str::to_string))
    }

    pub fn price_advisory(&self) -> Option<String> {
        self.form.with(|f| f.advisory().map(|a| format!("⚠️ {}", a)))
    }

    pub fn set_field(&self, field: ProductField, value: String) {
        self.form.update(|f| f.edit(field, value));
    }

    /// Изменение поля по атрибуту `name` элемента (`supplier[name]` и т.п.)
    pub fn set_path(&self, path: &str, value: String) {
        let result = self.form.try_update(|f| f.edit_path(path, value));
        if let Some(Err(e)) = result {
            log::warn!("{}", e);
        }
    }

    pub fn stage_images(&self, batch: Vec<ImageCandidate<File>>) {
        if batch.is_empty() {
            return;
        }
        let report = self.form.try_update(|f| f.stage_images(batch));
        if let Some(report) = report {
            log::debug!(
                "Images staged: {} accepted, {} rejected",
                report.accepted,
                report.rejected
            );
        }
    }

    pub fn remove_image(&self, id: StagedImageId) {
        self.form.update(|f| {
            f.remove_image(id);
        });
    }

    pub fn remove_existing_image(&self, file_name: &str) {
        self.form.update(|f| {
            f.remove_existing_image(file_name);
        });
    }

    /// Загрузить категории и, при редактировании, сам товар
    pub fn load(&self, id: Option<String>) {
        let vm = *self;
        let creating = id.is_none();
        wasm_bindgen_futures::spawn_local(async move {
            match category_api::load_categories().await {
                Ok(listing) if !listing.items.is_empty() => {
                    let choices = category_choices(&listing);
                    // Новый товар по умолчанию получает первую категорию
                    if creating {
                        if let Some(first) = choices.first() {
                            let first = first.value.clone();
                            vm.form.try_update(|f| {
                                if f.draft().category.is_empty() {
                                    f.edit(ProductField::Category, first);
                                }
                            });
                        }
                    }
                    vm.advisory.try_set(listing.advisory);
                    vm.categories.try_set(choices);
                }
                Ok(_) => {
                    vm.load_error.try_set(Some(CATEGORIES_UNAVAILABLE.to_string()));
                }
                Err(e) => {
                    log::error!("Failed to load categories: {}", e);
                    vm.load_error.try_set(Some(CATEGORIES_UNAVAILABLE.to_string()));
                }
            }
        });

        if let Some(existing_id) = id {
            wasm_bindgen_futures::spawn_local(async move {
                match api::get_product(&existing_id).await {
                    Ok(product) => {
                        vm.form
                            .try_set(ProductForm::for_edit(&product, ObjectUrlPreviews));
                    }
                    Err(e) => {
                        vm.load_error
                            .try_set(Some(e.surface("Failed to load product")));
                    }
                }
            });
        }
    }

    /// Проверить и отправить форму; после успеха перейти к сетке товаров
    pub fn save_command(&self, navigate: impl Fn(&str) + 'static) {
        let submission = self.form.try_update(|f| f.begin_submit()).flatten();
        let Some(submission) = submission else {
            return;
        };

        let form = self.form;
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::submit(submission).await;
            if let Err(e) = &result {
                log::warn!("Product save failed: {}", e);
            }
            let outcome = form.try_update(|f| f.finish_submit(result));
            if let Some(SubmitOutcome::Saved {
                redirect_to, delay, ..
            }) = outcome
            {
                TimeoutFuture::new(delay.as_millis() as u32).await;
                navigate(redirect_to);
            }
        });
    }
}

impl Default for ProductDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
