use crate::domain::a001_category::api;
use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a001_category::form::{CategoryField, CategoryForm};
use contracts::domain::a001_category::tree::CategoryTree;
use contracts::domain::common::AggregateId;
use contracts::shared::form_state::SubmitOutcome;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

/// ViewModel формы категории
#[derive(Clone, Copy)]
pub struct CategoryDetailsViewModel {
    pub form: RwSignal<CategoryForm>,
    /// Загруженные категории: варианты родителя и проверка ссылки
    pub known: RwSignal<Vec<Category>>,
    pub advisory: RwSignal<Option<String>>,
    pub load_error: RwSignal<Option<String>>,
}

impl CategoryDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(CategoryForm::new()),
            known: RwSignal::new(Vec::new()),
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

    /// Ошибка формы или ошибка загрузки
    pub fn error(&self) -> Option<String> {
        self.form
            .with(|f| f.status().error().map(str::to_string))
            .or_else(|| self.load_error.get())
    }

    pub fn success(&self) -> Option<String> {
        self.form.with(|f| f.status().success().map(str::to_string))
    }

    /// Варианты родителя: для новой категории верхний уровень, при
    /// редактировании всё, кроме самой категории и её потомков
    pub fn parent_options(&self) -> Vec<(String, String)> {
        let editing = self.form.with(|f| f.editing());
        let tree = CategoryTree::new(self.known.get());
        tree.parent_options(editing)
            .into_iter()
            .map(|c| (c.base.id.as_string(), c.title.clone()))
            .collect()
    }

    pub fn set_field(&self, field: CategoryField, value: String) {
        self.form.update(|f| f.edit(field, value));
    }

    /// Загрузить категорию (если задан ID) и список для выбора родителя
    pub fn load(&self, id: Option<String>) {
        let vm = *self;
        let editing = id.is_some();
        wasm_bindgen_futures::spawn_local(async move {
            let listing = if editing {
                api::load_categories().await
            } else {
                api::load_parent_categories().await
            };
            match listing {
                Ok(listing) => {
                    vm.advisory.try_set(listing.advisory);
                    vm.known.try_set(listing.items);
                }
                Err(e) => {
                    log::error!("Failed to load categories: {}", e);
                    vm.load_error
                        .try_set(Some(e.surface("Failed to load categories")));
                }
            }
        });

        if let Some(existing_id) = id {
            wasm_bindgen_futures::spawn_local(async move {
                match api::get_category(&existing_id).await {
                    Ok(category) => {
                        vm.form.try_set(CategoryForm::for_edit(&category));
                    }
                    Err(e) => {
                        vm.load_error
                            .try_set(Some(e.surface("Failed to load category")));
                    }
                }
            });
        }
    }

    /// Проверить и отправить форму; после успеха перейти к списку
    pub fn save_command(&self, navigate: impl Fn(&str) + 'static) {
        let tree = CategoryTree::new(self.known.get_untracked());
        let mut submission = None;
        self.form.update(|f| submission = f.begin_submit(&tree));
        let Some(submission) = submission else {
            return;
        };

        let form = self.form;
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::submit(submission).await;
            if let Err(e) = &result {
                log::warn!("Category save failed: {}", e);
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

impl Default for CategoryDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
