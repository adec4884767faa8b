pub mod aggregate;
pub mod draft;
pub mod form;
pub mod slug;
pub mod validation;
