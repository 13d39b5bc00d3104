//! Default reference data inserted once into an empty store.

use crate::errors::{AppError, AppResult};
use crate::models::TableStatus;
use serde::Serialize;
use sqlx::PgConnection;

pub const DEFAULT_TABLE_COUNT: usize = 10;

/// (name, description): main dishes, beverages, desserts, snacks.
pub const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("อาหารจานหลัก", "อาหารจานหลักและข้าว"),
    ("เครื่องดื่ม", "เครื่องดื่มทุกประเภท"),
    ("ของหวาน", "ของหวานและขนม"),
    ("อาหารว่าง", "อาหารว่างและของทานเล่น"),
];

// Advisory lock key shared by every initializer run ("rorderdb" in ASCII).
const INIT_LOCK_KEY: i64 = 0x726f_7264_6572_6462;

/// Rows inserted by the seed step. Zero means the table was already populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub tables_inserted: usize,
    pub categories_inserted: usize,
}

/// "Table 1" .. "Table 10"
pub fn default_table_names() -> Vec<String> {
    (1..=DEFAULT_TABLE_COUNT)
        .map(|i| format!("Table {i}"))
        .collect()
}

/// Serialize concurrent initializers until the surrounding transaction ends.
pub async fn lock_initialization(conn: &mut PgConnection) -> AppResult<()> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(INIT_LOCK_KEY)
        .execute(&mut *conn)
        .await
        .map_err(AppError::statement("acquire initialization lock"))?;
    Ok(())
}

async fn count_rows(conn: &mut PgConnection, table: &str) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar::<_, i64>(&sql)
        .fetch_one(&mut *conn)
        .await
        .map_err(AppError::statement(format!("count rows of {table}")))
}

/// Insert the default dining tables and menu categories where missing.
/// Runs inside the caller's transaction; existing rows are never touched.
pub async fn seed_defaults(conn: &mut PgConnection) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    if count_rows(conn, "tables").await? == 0 {
        for name in default_table_names() {
            sqlx::query("INSERT INTO tables (table_name, status) VALUES ($1, $2)")
                .bind(&name)
                .bind(TableStatus::Available.to_db_str())
                .execute(&mut *conn)
                .await
                .map_err(AppError::statement(format!("seed {name}")))?;
            report.tables_inserted += 1;
        }
        tracing::info!(count = report.tables_inserted, "Added initial tables");
    }

    if count_rows(conn, "menu_categories").await? == 0 {
        for (name, description) in DEFAULT_CATEGORIES {
            sqlx::query("INSERT INTO menu_categories (name, description) VALUES ($1, $2)")
                .bind(name)
                .bind(description)
                .execute(&mut *conn)
                .await
                .map_err(AppError::statement("seed menu categories"))?;
            report.categories_inserted += 1;
        }
        tracing::info!(
            count = report.categories_inserted,
            "Added initial menu categories"
        );
    }

    Ok(report)
}
