pub mod form_state;
pub mod image_staging;
pub mod listing;
pub mod store_error;
