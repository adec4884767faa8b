use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a002_product::aggregate::Product;
use contracts::domain::common::AggregateRoot;
use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const CATEGORY_COLUMNS: &str = r#"
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            status TEXT NOT NULL DEFAULT 'Active',
            parent_id TEXT,
            created_by TEXT NOT NULL DEFAULT 'Admin',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
"#;

const PRODUCT_COLUMNS: &str = r#"
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            slug TEXT NOT NULL,
            sku TEXT NOT NULL,
            category_id TEXT NOT NULL,
            price REAL NOT NULL,
            mrp REAL,
            discount_price REAL,
            stock_quantity INTEGER NOT NULL DEFAULT 0,
            stock_status TEXT NOT NULL DEFAULT 'InStock',
            description TEXT NOT NULL DEFAULT '',
            specification TEXT NOT NULL DEFAULT '',
            colour TEXT NOT NULL DEFAULT '',
            size TEXT NOT NULL DEFAULT '',
            variants_json TEXT NOT NULL DEFAULT '[]',
            brand TEXT NOT NULL DEFAULT '',
            weight TEXT NOT NULL DEFAULT '',
            dimensions TEXT NOT NULL DEFAULT '',
            tags_json TEXT NOT NULL DEFAULT '[]',
            warranty TEXT NOT NULL DEFAULT '',
            return_policy TEXT NOT NULL DEFAULT '',
            barcode TEXT NOT NULL DEFAULT '',
            hsn_code TEXT NOT NULL DEFAULT '',
            supplier_json TEXT,
            shipping_json TEXT,
            images_json TEXT NOT NULL DEFAULT '[]',
            is_active INTEGER NOT NULL DEFAULT 1,
            created_by TEXT NOT NULL DEFAULT 'Admin',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
"#;

/// Таблицы каталога: имя агрегата и колонки
fn tables() -> [(String, &'static str); 2] {
    [
        (Category::full_name(), CATEGORY_COLUMNS),
        (Product::full_name(), PRODUCT_COLUMNS),
    ]
}

/// SQLite URL для файла БД (с учётом путей Windows)
pub fn sqlite_url(db_file: &Path) -> anyhow::Result<String> {
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db_url = sqlite_url(db_file)?;
    tracing::info!("Opening database {}", db_url);
    let conn = Database::connect(&db_url).await?;

    ensure_tables(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Создать недостающие таблицы (минимальный bootstrap схемы)
pub async fn ensure_tables(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table, columns) in tables() {
        let existing = conn
            .query_all(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' AND name = ?;",
                [table.as_str().into()],
            ))
            .await?;

        if existing.is_empty() {
            tracing::info!("Creating {} table", table);
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                format!("CREATE TABLE {} ({});", table, columns),
            ))
            .await?;
        }
    }
    Ok(())
}

pub fn get_connection() -> anyhow::Result<&'static DatabaseConnection> {
    DB_CONN
        .get()
        .ok_or_else(|| anyhow::anyhow!("Database connection has not been initialized"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_unix_path_url() {
        let url = sqlite_url(Path::new("/var/lib/catalog.db")).unwrap();
        assert_eq!(url, "sqlite:///var/lib/catalog.db?mode=rwc");
    }

    #[test]
    fn relative_path_is_resolved_from_cwd() {
        let url = sqlite_url(Path::new("target/db/catalog.db")).unwrap();
        assert!(url.starts_with("sqlite://"));
        assert!(url.ends_with("target/db/catalog.db?mode=rwc"));
    }

    #[test]
    fn entity_tables_follow_aggregate_names() {
        use crate::domain::{a001_category, a002_product};
        use sea_orm::EntityName;

        assert_eq!(a001_category::repository::Entity.table_name(), Category::full_name());
        assert_eq!(a002_product::repository::Entity.table_name(), Product::full_name());
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let conn = Database::connect("sqlite::memory:").await.unwrap();
        ensure_tables(&conn).await.unwrap();
        ensure_tables(&conn).await.unwrap();

        let rows = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name;".to_string(),
            ))
            .await
            .unwrap();
        let names: Vec<String> = rows
            .iter()
            .map(|row| row.try_get("", "name").unwrap())
            .collect();
        assert_eq!(names, [Category::full_name(), Product::full_name()]);
        assert_eq!(names, ["a001_category", "a002_product"]);
    }
}
