pub mod notice;
pub mod page_header;
