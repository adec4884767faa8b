//! Форма категории (создание и редактирование)
//!
//! - view_model.rs: сигналы поверх `CategoryForm` и команды загрузки/сохранения
//! - view.rs: компонент Leptos

mod view;
mod view_model;

pub use view::CategoryDetails;
pub use view_model::CategoryDetailsViewModel;
