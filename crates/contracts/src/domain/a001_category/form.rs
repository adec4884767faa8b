//! Контроллер формы категории (создание и редактирование).
//!
//! Контроллер не выполняет запросов: `begin_submit` отдаёт готовый запрос,
//! UI вызывает хранилище и передаёт результат в `finish_submit`.

use super::aggregate::{Category, CategoryDto, CategoryId, CategoryStatus};
use super::tree::CategoryTree;
use crate::shared::form_state::{FormPhase, FormStatus, SubmitOutcome};
use crate::shared::store_error::StoreError;
use std::time::Duration;

pub const CATEGORY_LIST_ROUTE: &str = "/categories/list";
pub const CATEGORY_REDIRECT_DELAY: Duration = Duration::from_millis(500);

/// Поле формы категории
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Title,
    Description,
    Status,
    Parent,
}

/// Запрос к хранилищу категорий
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySubmission {
    Create(CategoryDto),
    Update(CategoryId, CategoryDto),
}

#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    draft: CategoryDto,
    editing: Option<CategoryId>,
    status: FormStatus,
}

impl CategoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Форма редактирования существующей категории
    pub fn for_edit(category: &Category) -> Self {
        Self {
            draft: CategoryDto::from_category(category),
            editing: Some(category.base.id),
            status: FormStatus::default(),
        }
    }

    pub fn draft(&self) -> &CategoryDto {
        &self.draft
    }

    pub fn editing(&self) -> Option<CategoryId> {
        self.editing
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.is_some()
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn edit(&mut self, field: CategoryField, value: String) {
        let mut next = self.draft.clone();
        match field {
            CategoryField::Title => next.title = value,
            CategoryField::Description => next.description = Some(value),
            CategoryField::Status => {
                next.status = CategoryStatus::from_code(&value).unwrap_or_default()
            }
            CategoryField::Parent => next.parent = Some(value).filter(|v| !v.is_empty()),
        }
        self.draft = next;
        self.status.resume_editing();
    }

    /// Проверить форму и перейти в `Submitting`.
    ///
    /// `known`: загруженные категории; по ним проверяется ссылка на родителя.
    pub fn begin_submit(&mut self, known: &CategoryTree) -> Option<CategorySubmission> {
        if !self.status.start_validation() {
            return None;
        }

        let checked = self.draft.validate().and_then(|_| {
            let parent = self.draft.parent_id()?;
            // Список мог не загрузиться; тогда родителя проверит сервер
            if known.is_empty() {
                return Ok(());
            }
            known.check_parent(self.editing, parent)
        });
        if let Err(violation) = checked {
            self.status.reject(violation.to_string());
            return None;
        }

        let mut dto = self.draft.clone();
        dto.title = dto.title.trim().to_string();
        dto.parent = dto.parent.filter(|p| !p.trim().is_empty());

        self.status.start_submission();
        Some(match self.editing {
            Some(id) => CategorySubmission::Update(id, dto),
            None => CategorySubmission::Create(dto),
        })
    }

    pub fn finish_submit(&mut self, result: Result<Category, StoreError>) -> SubmitOutcome {
        if self.status.phase() != FormPhase::Submitting {
            return SubmitOutcome::Ignored;
        }
        let (done, failed) = if self.is_edit_mode() {
            ("Category updated successfully!", "Failed to update category")
        } else {
            ("Category created successfully!", "Failed to create category")
        };

        match result {
            Ok(saved) => {
                if self.is_edit_mode() {
                    self.draft = CategoryDto::from_category(&saved);
                } else {
                    self.draft = CategoryDto::default();
                }
                self.status.succeed(done);
                SubmitOutcome::Saved {
                    message: done.to_string(),
                    redirect_to: CATEGORY_LIST_ROUTE,
                    delay: CATEGORY_REDIRECT_DELAY,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{AggregateId, EntityMetadata};

    fn stored(title: &str, parent: Option<CategoryId>) -> Category {
        Category::with_metadata(
            CategoryId::new_v4(),
            title,
            None,
            CategoryStatus::Active,
            parent,
            EntityMetadata::new("Admin"),
        )
    }

    #[test]
    fn missing_title_blocks_submission() {
        let mut form = CategoryForm::new();
        assert!(form.begin_submit(&CategoryTree::default()).is_none());
        assert_eq!(form.status().error(), Some("Please fill in the Category Name."));
        assert!(!form.is_loading());
    }

    #[test]
    fn create_submission_carries_trimmed_dto() {
        let parent = stored("Electronics", None);
        let tree = CategoryTree::new(vec![parent.clone()]);
        let mut form = CategoryForm::new();
        form.edit(CategoryField::Title, "  Phones ".into());
        form.edit(CategoryField::Parent, parent.to_string_id());
        form.edit(CategoryField::Status, "Inactive".into());

        let Some(CategorySubmission::Create(dto)) = form.begin_submit(&tree) else {
            panic!("expected create submission");
        };
        assert_eq!(dto.title, "Phones");
        assert_eq!(dto.status, CategoryStatus::Inactive);
        assert_eq!(dto.parent, Some(parent.to_string_id()));
        assert!(form.is_loading());
    }

    #[test]
    fn edit_mode_rejects_descendant_as_parent() {
        let root = stored("Electronics", None);
        let child = stored("Phones", Some(root.base.id));
        let tree = CategoryTree::new(vec![root.clone(), child.clone()]);

        let mut form = CategoryForm::for_edit(&root);
        form.edit(CategoryField::Parent, child.to_string_id());

        assert!(form.begin_submit(&tree).is_none());
        assert_eq!(
            form.status().error(),
            Some("Selected parent is a sub-category of this category")
        );
    }

    #[test]
    fn success_resets_new_form_and_redirects() {
        let mut form = CategoryForm::new();
        form.edit(CategoryField::Title, "Books".into());
        form.begin_submit(&CategoryTree::default()).unwrap();

        let saved = stored("Books", None);
        let outcome = form.finish_submit(Ok(saved));

        assert_eq!(
            outcome,
            SubmitOutcome::Saved {
                message: "Category created successfully!".into(),
                redirect_to: CATEGORY_LIST_ROUTE,
                delay: CATEGORY_REDIRECT_DELAY,
            }
        );
        assert_eq!(form.draft(), &CategoryDto::default());
        assert_eq!(form.status().phase(), FormPhase::Succeeded);
    }

    #[test]
    fn update_failure_keeps_draft() {
        let existing = stored("Books", None);
        let mut form = CategoryForm::for_edit(&existing);
        form.edit(CategoryField::Description, "Paper and e-books".into());
        let Some(CategorySubmission::Update(id, _)) = form.begin_submit(&CategoryTree::default())
        else {
            panic!("expected update submission");
        };
        assert_eq!(id.as_string(), existing.to_string_id());

        let outcome = form.finish_submit(Err(StoreError::Network));

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(form.draft().description.as_deref(), Some("Paper and e-books"));
        assert_eq!(form.status().phase(), FormPhase::Editing);
    }

    #[test]
    fn stray_result_is_ignored() {
        let mut form = CategoryForm::new();
        assert_eq!(
            form.finish_submit(Err(StoreError::Network)),
            SubmitOutcome::Ignored
        );
    }
}
