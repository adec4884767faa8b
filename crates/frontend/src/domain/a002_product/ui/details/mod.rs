//! Форма товара (создание и редактирование)
//!
//! - view_model.rs: `ProductForm` в локальном сигнале, загрузка категорий,
//!   приём изображений и команда сохранения
//! - view.rs: компонент Leptos

mod view;
mod view_model;

pub use view::ProductDetails;
pub use view_model::ProductDetailsViewModel;
