//! Адрес бэкенда для запросов из браузера

/// Базовый URL API.
///
/// Берётся из адреса текущей страницы, бэкенд всегда слушает порт 3000.
/// Пустая строка, если окна нет.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Полный URL по пути вида `/api/category`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// URL сохранённого изображения; абсолютные адреса не меняются
pub fn asset_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("blob:") {
        url.to_string()
    } else {
        api_url(url)
    }
}
