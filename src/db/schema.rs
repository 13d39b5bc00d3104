//! PostgreSQL schema: table/index definitions and the idempotent initializer.
//!
//! Tables are listed parents first; foreign-key DDL depends on that order and
//! the migrator copies rows in the same sequence.

use crate::config::Config;
use crate::db::connection;
use crate::db::seed::{self, SeedReport};
use crate::errors::{AppError, AppResult};
use serde::Serialize;
use sqlx::{Connection, PgConnection};
use tracing::{Instrument, Span};

pub struct TableDef {
    pub name: &'static str,
    pub primary_key: &'static str,
    pub ddl: &'static str,
}

pub struct IndexDef {
    pub name: &'static str,
    pub table: &'static str,
    pub ddl: &'static str,
}

pub static TABLES: [TableDef; 7] = [
    TableDef {
        name: "tables",
        primary_key: "table_id",
        ddl: r#"
        CREATE TABLE IF NOT EXISTS tables (
            table_id   SERIAL PRIMARY KEY,
            table_name VARCHAR(50) NOT NULL,
            status     VARCHAR(20) DEFAULT 'available'
        )
        "#,
    },
    TableDef {
        name: "menu_categories",
        primary_key: "category_id",
        ddl: r#"
        CREATE TABLE IF NOT EXISTS menu_categories (
            category_id SERIAL PRIMARY KEY,
            name        VARCHAR(100) NOT NULL,
            description TEXT
        )
        "#,
    },
    TableDef {
        name: "menu_items",
        primary_key: "item_id",
        ddl: r#"
        CREATE TABLE IF NOT EXISTS menu_items (
            item_id     SERIAL PRIMARY KEY,
            name        VARCHAR(200) NOT NULL,
            description TEXT,
            price       DECIMAL(10,2) NOT NULL,
            category_id INTEGER REFERENCES menu_categories(category_id),
            image_url   VARCHAR(500),
            available   BOOLEAN DEFAULT TRUE,
            created_at  TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    },
    TableDef {
        name: "orders",
        primary_key: "order_id",
        ddl: r#"
        CREATE TABLE IF NOT EXISTS orders (
            order_id       SERIAL PRIMARY KEY,
            table_id       INTEGER REFERENCES tables(table_id),
            customer_name  VARCHAR(100),
            customer_phone VARCHAR(20),
            total_amount   DECIMAL(10,2) DEFAULT 0.00,
            status         VARCHAR(20) DEFAULT 'active',
            created_at     TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at     TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            notes          TEXT
        )
        "#,
    },
    TableDef {
        name: "order_items",
        primary_key: "order_item_id",
        ddl: r#"
        CREATE TABLE IF NOT EXISTS order_items (
            order_item_id    SERIAL PRIMARY KEY,
            order_id         INTEGER REFERENCES orders(order_id) ON DELETE CASCADE,
            item_id          INTEGER REFERENCES menu_items(item_id),
            quantity         INTEGER NOT NULL DEFAULT 1,
            unit_price       DECIMAL(10,2) NOT NULL,
            total_price      DECIMAL(10,2) NOT NULL,
            special_requests TEXT,
            created_at       TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    },
    TableDef {
        name: "food_options",
        primary_key: "option_id",
        ddl: r#"
        CREATE TABLE IF NOT EXISTS food_options (
            option_id        SERIAL PRIMARY KEY,
            item_id          INTEGER REFERENCES menu_items(item_id) ON DELETE CASCADE,
            option_name      VARCHAR(100) NOT NULL,
            option_type      VARCHAR(50) NOT NULL,
            additional_price DECIMAL(10,2) DEFAULT 0.00,
            available        BOOLEAN DEFAULT TRUE
        )
        "#,
    },
    TableDef {
        name: "order_item_options",
        primary_key: "order_item_option_id",
        ddl: r#"
        CREATE TABLE IF NOT EXISTS order_item_options (
            order_item_option_id SERIAL PRIMARY KEY,
            order_item_id        INTEGER REFERENCES order_items(order_item_id) ON DELETE CASCADE,
            option_id            INTEGER REFERENCES food_options(option_id),
            selected_value       VARCHAR(100),
            additional_price     DECIMAL(10,2) DEFAULT 0.00
        )
        "#,
    },
];

pub static INDEXES: [IndexDef; 5] = [
    IndexDef {
        name: "idx_orders_table_id",
        table: "orders",
        ddl: "CREATE INDEX IF NOT EXISTS idx_orders_table_id ON orders(table_id)",
    },
    IndexDef {
        name: "idx_orders_status",
        table: "orders",
        ddl: "CREATE INDEX IF NOT EXISTS idx_orders_status ON orders(status)",
    },
    IndexDef {
        name: "idx_orders_created_at",
        table: "orders",
        ddl: "CREATE INDEX IF NOT EXISTS idx_orders_created_at ON orders(created_at)",
    },
    IndexDef {
        name: "idx_order_items_order_id",
        table: "order_items",
        ddl: "CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items(order_id)",
    },
    IndexDef {
        name: "idx_menu_items_category_id",
        table: "menu_items",
        ddl: "CREATE INDEX IF NOT EXISTS idx_menu_items_category_id ON menu_items(category_id)",
    },
];

/// Look up a table definition by name.
pub fn table(name: &str) -> Option<&'static TableDef> {
    TABLES.iter().find(|t| t.name == name)
}

/// Outcome of a successful initialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InitReport {
    pub tables: usize,
    pub indexes: usize,
    pub seed: SeedReport,
}

/// Creates the schema and seeds reference data on one connection.
pub struct SchemaInitializer<'a> {
    config: &'a Config,
    span: Span,
}

impl<'a> SchemaInitializer<'a> {
    pub fn new(config: &'a Config, span: Span) -> Self {
        Self { config, span }
    }

    /// Open a connection, run DDL + seed in one transaction, always close.
    pub async fn run(&self) -> AppResult<InitReport> {
        async {
            let mut conn = connection::connect(self.config).await?;
            let result = initialize(&mut conn).await;
            connection::close(conn).await;
            result
        }
        .instrument(self.span.clone())
        .await
    }
}

/// Initialize on an already open connection: commit everything or nothing.
pub async fn initialize(conn: &mut PgConnection) -> AppResult<InitReport> {
    let mut tx = conn
        .begin()
        .await
        .map_err(AppError::statement("begin transaction"))?;

    match create_and_seed(&mut tx).await {
        Ok(report) => {
            tx.commit()
                .await
                .map_err(AppError::statement("commit initialization"))?;
            tracing::info!(
                tables = report.tables,
                indexes = report.indexes,
                "PostgreSQL database initialized successfully"
            );
            Ok(report)
        }
        Err(e) => {
            if let Err(rb) = tx.rollback().await {
                tracing::warn!(error = %rb, "Rollback failed");
            }
            tracing::error!(error = %e, "Error initializing database");
            Err(e)
        }
    }
}

async fn create_and_seed(conn: &mut PgConnection) -> AppResult<InitReport> {
    seed::lock_initialization(conn).await?;
    create_schema(conn).await?;
    let seed = seed::seed_defaults(conn).await?;

    Ok(InitReport {
        tables: TABLES.len(),
        indexes: INDEXES.len(),
        seed,
    })
}

/// Issue every CREATE TABLE / CREATE INDEX statement, parents first.
pub async fn create_schema(conn: &mut PgConnection) -> AppResult<()> {
    for t in &TABLES {
        sqlx::query(t.ddl)
            .execute(&mut *conn)
            .await
            .map_err(AppError::statement(format!("create table {}", t.name)))?;
        tracing::debug!(table = t.name, "Table ensured");
    }

    for i in &INDEXES {
        sqlx::query(i.ddl)
            .execute(&mut *conn)
            .await
            .map_err(AppError::statement(format!("create index {}", i.name)))?;
        tracing::debug!(index = i.name, table = i.table, "Index ensured");
    }

    Ok(())
}
