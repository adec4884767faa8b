pub mod api;
pub mod api_utils;
pub mod components;
pub mod fixtures;
pub mod icons;
pub mod list_utils;
pub mod preview;
