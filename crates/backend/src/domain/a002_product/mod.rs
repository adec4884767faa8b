pub mod multipart;
pub mod repository;
pub mod service;
