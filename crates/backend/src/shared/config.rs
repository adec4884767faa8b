use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CATALOG: OnceCell<CatalogConfig> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Куда складываются загруженные изображения товаров
#[derive(Debug, Deserialize, Clone)]
pub struct UploadsConfig {
    #[serde(default = "default_uploads_dir")]
    pub dir: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: default_uploads_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Значение `createdBy` для новых записей
    #[serde(default = "default_created_by")]
    pub created_by: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            created_by: default_created_by(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_uploads_dir() -> String {
    "target/uploads".to_string()
}

fn default_created_by() -> String {
    "Admin".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/catalog.db"

[server]
port = 3000

[uploads]
dir = "target/uploads"

[catalog]
created_by = "Admin"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Resolve a configured path: absolute paths are kept,
/// relative ones are resolved against the executable directory
pub fn resolve_path(configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    PathBuf::from(configured)
}

/// Запомнить настройки каталога для сервисов
pub fn set_catalog_config(catalog: CatalogConfig) {
    if CATALOG.set(catalog).is_err() {
        tracing::warn!("Catalog configuration is already set");
    }
}

/// Автор новых записей (`createdBy`)
pub fn created_by() -> String {
    CATALOG
        .get()
        .map(|c| c.created_by.clone())
        .unwrap_or_else(default_created_by)
}

pub fn get_database_path(config: &Config) -> PathBuf {
    resolve_path(&config.database.path)
}

pub fn get_uploads_dir(config: &Config) -> PathBuf {
    resolve_path(&config.uploads.dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/catalog.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.uploads.dir, "target/uploads");
        assert_eq!(config.catalog.created_by, "Admin");
    }

    #[test]
    fn test_optional_sections_have_defaults() {
        let config = parse_config("[database]\npath = \"/tmp/shop.db\"\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.catalog.created_by, "Admin");
        assert_eq!(get_database_path(&config), PathBuf::from("/tmp/shop.db"));
    }

    #[test]
    fn test_missing_database_section_is_error() {
        assert!(parse_config("[server]\nport = 8080\n").is_err());
    }
}
