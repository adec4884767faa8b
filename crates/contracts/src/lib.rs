//! Общие типы каталога: агрегаты, DTO, валидация и контроллеры форм.
//!
//! Крейт не выполняет ввода-вывода и используется как фронтендом (wasm),
//! так и бэкендом.

pub mod domain;
pub mod shared;
