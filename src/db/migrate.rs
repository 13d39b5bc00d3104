//! One-shot cutover: copy every row of the legacy SQLite store into PostgreSQL.
//!
//! Rows keep their primary keys. A key that already exists in the target is
//! skipped (first write wins), which makes a second run harmless. The copy
//! is a single transaction: either every table lands or none does.

use crate::config::Config;
use crate::db::connection;
use crate::db::legacy::LegacyStore;
use crate::errors::{AppError, AppResult};
use crate::models::{
    DiningTable, FoodOption, MenuCategory, MenuItem, Order, OrderItem, OrderItemOption,
};
use serde::Serialize;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{Connection, PgConnection, Postgres};
use std::path::PathBuf;
use tracing::{Instrument, Span};

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// A legacy row that can be copied verbatim into its PostgreSQL table.
pub trait CopyRow: Sized {
    const TABLE: &'static str;
    const PRIMARY_KEY: &'static str;
    /// Conflict-tolerant insert keeping the original identifier.
    const INSERT: &'static str;
    /// Older legacy files may lack this table.
    const OPTIONAL: bool = false;

    fn read_all(legacy: &LegacyStore) -> AppResult<Vec<Self>>;
    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;
}

impl CopyRow for DiningTable {
    const TABLE: &'static str = "tables";
    const PRIMARY_KEY: &'static str = "table_id";
    const INSERT: &'static str = "INSERT INTO tables (table_id, table_name, status)
         VALUES ($1, $2, $3) ON CONFLICT (table_id) DO NOTHING";

    fn read_all(legacy: &LegacyStore) -> AppResult<Vec<Self>> {
        let rows = legacy.dining_tables()?;
        for t in rows.iter().filter(|t| t.has_unknown_status()) {
            tracing::warn!(
                table_id = t.table_id,
                status = t.status.as_deref().unwrap_or_default(),
                "Unknown table status copied as is"
            );
        }
        Ok(rows)
    }

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.table_id)
            .bind(&self.table_name)
            .bind(&self.status)
    }
}

impl CopyRow for MenuCategory {
    const TABLE: &'static str = "menu_categories";
    const PRIMARY_KEY: &'static str = "category_id";
    const INSERT: &'static str = "INSERT INTO menu_categories (category_id, name, description)
         VALUES ($1, $2, $3) ON CONFLICT (category_id) DO NOTHING";

    fn read_all(legacy: &LegacyStore) -> AppResult<Vec<Self>> {
        legacy.menu_categories()
    }

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.category_id)
            .bind(&self.name)
            .bind(&self.description)
    }
}

impl CopyRow for MenuItem {
    const TABLE: &'static str = "menu_items";
    const PRIMARY_KEY: &'static str = "item_id";
    const INSERT: &'static str = "INSERT INTO menu_items
         (item_id, name, description, price, category_id, image_url, available, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) ON CONFLICT (item_id) DO NOTHING";

    fn read_all(legacy: &LegacyStore) -> AppResult<Vec<Self>> {
        legacy.menu_items()
    }

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.item_id)
            .bind(&self.name)
            .bind(&self.description)
            .bind(self.price)
            .bind(self.category_id)
            .bind(&self.image_url)
            .bind(self.available)
            .bind(self.created_at)
    }
}

impl CopyRow for Order {
    const TABLE: &'static str = "orders";
    const PRIMARY_KEY: &'static str = "order_id";
    const INSERT: &'static str = "INSERT INTO orders
         (order_id, table_id, customer_name, customer_phone, total_amount, status,
          created_at, updated_at, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) ON CONFLICT (order_id) DO NOTHING";

    fn read_all(legacy: &LegacyStore) -> AppResult<Vec<Self>> {
        legacy.orders()
    }

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.order_id)
            .bind(self.table_id)
            .bind(&self.customer_name)
            .bind(&self.customer_phone)
            .bind(self.total_amount)
            .bind(&self.status)
            .bind(self.created_at)
            .bind(self.updated_at)
            .bind(&self.notes)
    }
}

impl CopyRow for OrderItem {
    const TABLE: &'static str = "order_items";
    const PRIMARY_KEY: &'static str = "order_item_id";
    const INSERT: &'static str = "INSERT INTO order_items
         (order_item_id, order_id, item_id, quantity, unit_price, total_price,
          special_requests, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) ON CONFLICT (order_item_id) DO NOTHING";

    fn read_all(legacy: &LegacyStore) -> AppResult<Vec<Self>> {
        legacy.order_items()
    }

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.order_item_id)
            .bind(self.order_id)
            .bind(self.item_id)
            .bind(self.quantity)
            .bind(self.unit_price)
            .bind(self.total_price)
            .bind(&self.special_requests)
            .bind(self.created_at)
    }
}

impl CopyRow for FoodOption {
    const TABLE: &'static str = "food_options";
    const PRIMARY_KEY: &'static str = "option_id";
    const INSERT: &'static str = "INSERT INTO food_options
         (option_id, item_id, option_name, option_type, additional_price, available)
         VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (option_id) DO NOTHING";
    const OPTIONAL: bool = true;

    fn read_all(legacy: &LegacyStore) -> AppResult<Vec<Self>> {
        legacy.food_options()
    }

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.option_id)
            .bind(self.item_id)
            .bind(&self.option_name)
            .bind(&self.option_type)
            .bind(self.additional_price)
            .bind(self.available)
    }
}

impl CopyRow for OrderItemOption {
    const TABLE: &'static str = "order_item_options";
    const PRIMARY_KEY: &'static str = "order_item_option_id";
    const INSERT: &'static str = "INSERT INTO order_item_options
         (order_item_option_id, order_item_id, option_id, selected_value, additional_price)
         VALUES ($1, $2, $3, $4, $5) ON CONFLICT (order_item_option_id) DO NOTHING";
    const OPTIONAL: bool = true;

    fn read_all(legacy: &LegacyStore) -> AppResult<Vec<Self>> {
        legacy.order_item_options()
    }

    fn bind<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.order_item_option_id)
            .bind(self.order_item_id)
            .bind(self.option_id)
            .bind(&self.selected_value)
            .bind(self.additional_price)
    }
}

/// Per-table outcome of the copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: &'static str,
    pub read: usize,
    pub inserted: usize,
    pub skipped: usize,
    /// The legacy database has no such table (older versions lack the option tables).
    pub missing_in_legacy: bool,
}

impl TableReport {
    fn missing(table: &'static str) -> Self {
        Self {
            table,
            read: 0,
            inserted: 0,
            skipped: 0,
            missing_in_legacy: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub tables: Vec<TableReport>,
}

impl MigrationReport {
    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == name)
    }

    pub fn total_inserted(&self) -> usize {
        self.tables.iter().map(|t| t.inserted).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.tables.iter().map(|t| t.skipped).sum()
    }
}

/// Copies a legacy SQLite file into the configured PostgreSQL store.
pub struct Migrator<'a> {
    config: &'a Config,
    legacy_path: PathBuf,
    span: Span,
}

impl<'a> Migrator<'a> {
    pub fn new(config: &'a Config, legacy_path: impl Into<PathBuf>, span: Span) -> Self {
        Self {
            config,
            legacy_path: legacy_path.into(),
            span,
        }
    }

    /// Open both stores, copy in one transaction, close both on every path.
    pub async fn run(&self) -> AppResult<MigrationReport> {
        async {
            let legacy = LegacyStore::open(&self.legacy_path).inspect_err(|e| {
                tracing::error!(error = %e, "Cannot open legacy database");
            })?;

            let mut conn = match connection::connect(self.config).await {
                Ok(conn) => conn,
                Err(e) => {
                    legacy.close();
                    return Err(e);
                }
            };

            let result = migrate(&legacy, &mut conn).await;

            legacy.close();
            connection::close(conn).await;
            result
        }
        .instrument(self.span.clone())
        .await
    }
}

/// Migrate on already open stores: commit once or roll back everything.
pub async fn migrate(legacy: &LegacyStore, conn: &mut PgConnection) -> AppResult<MigrationReport> {
    let mut tx = conn
        .begin()
        .await
        .map_err(AppError::statement("begin transaction"))?;

    match copy_all(legacy, &mut tx).await {
        Ok(report) => {
            tx.commit()
                .await
                .map_err(AppError::statement("commit migration"))?;
            tracing::info!(
                inserted = report.total_inserted(),
                skipped = report.total_skipped(),
                "Migration from SQLite to PostgreSQL completed successfully"
            );
            Ok(report)
        }
        Err(e) => {
            if let Err(rb) = tx.rollback().await {
                tracing::warn!(error = %rb, "Rollback failed");
            }
            tracing::error!(error = %e, "Error during migration");
            Err(e)
        }
    }
}

// Parents before children: same order as schema::TABLES.
async fn copy_all(legacy: &LegacyStore, conn: &mut PgConnection) -> AppResult<MigrationReport> {
    let tables = vec![
        copy_table::<DiningTable>(legacy, conn).await?,
        copy_table::<MenuCategory>(legacy, conn).await?,
        copy_table::<MenuItem>(legacy, conn).await?,
        copy_table::<Order>(legacy, conn).await?,
        copy_table::<OrderItem>(legacy, conn).await?,
        copy_table::<FoodOption>(legacy, conn).await?,
        copy_table::<OrderItemOption>(legacy, conn).await?,
    ];
    Ok(MigrationReport { tables })
}

async fn copy_table<R: CopyRow>(
    legacy: &LegacyStore,
    conn: &mut PgConnection,
) -> AppResult<TableReport> {
    if !legacy.table_exists(R::TABLE)? {
        if !R::OPTIONAL {
            return Err(AppError::LegacyTableMissing(R::TABLE));
        }
        tracing::warn!(table = R::TABLE, "Table missing in legacy database, skipped");
        return Ok(TableReport::missing(R::TABLE));
    }

    let rows = R::read_all(legacy)?;
    let mut report = TableReport {
        table: R::TABLE,
        read: rows.len(),
        inserted: 0,
        skipped: 0,
        missing_in_legacy: false,
    };

    for row in &rows {
        let done = row
            .bind(sqlx::query(R::INSERT))
            .execute(&mut *conn)
            .await
            .map_err(AppError::statement(format!("insert into {}", R::TABLE)))?;

        if done.rows_affected() == 0 {
            report.skipped += 1;
        } else {
            report.inserted += 1;
        }
    }

    align_sequence(conn, R::TABLE, R::PRIMARY_KEY).await?;

    tracing::info!(
        table = R::TABLE,
        read = report.read,
        inserted = report.inserted,
        skipped = report.skipped,
        "Table migrated"
    );
    Ok(report)
}

/// Move the SERIAL sequence past the highest copied identifier.
async fn align_sequence(conn: &mut PgConnection, table: &str, pk: &str) -> AppResult<()> {
    let sql = format!(
        "SELECT setval(pg_get_serial_sequence('{table}', '{pk}'), COALESCE(MAX({pk}), 0) + 1, false) FROM {table}"
    );
    sqlx::query(&sql)
        .execute(&mut *conn)
        .await
        .map_err(AppError::statement(format!("align sequence of {table}")))?;
    Ok(())
}
