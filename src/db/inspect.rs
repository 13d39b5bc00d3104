//! Catalog inspection: which of the expected tables and indexes exist.

use crate::config::Config;
use crate::db::connection;
use crate::db::schema::{INDEXES, TABLES};
use crate::errors::{AppError, AppResult};
use serde::Serialize;
use sqlx::PgConnection;
use tracing::{Instrument, Span};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePresence {
    pub name: &'static str,
    pub present: bool,
    pub rows: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexPresence {
    pub name: &'static str,
    pub table: &'static str,
    pub present: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaStatus {
    pub schema: String,
    pub tables: Vec<TablePresence>,
    pub indexes: Vec<IndexPresence>,
}

impl SchemaStatus {
    pub fn is_complete(&self) -> bool {
        self.tables.iter().all(|t| t.present) && self.indexes.iter().all(|i| i.present)
    }

    pub fn rows(&self, table: &str) -> Option<i64> {
        self.tables
            .iter()
            .find(|t| t.name == table)
            .and_then(|t| t.rows)
    }
}

pub struct SchemaInspector<'a> {
    config: &'a Config,
    span: Span,
}

impl<'a> SchemaInspector<'a> {
    pub fn new(config: &'a Config, span: Span) -> Self {
        Self { config, span }
    }

    pub async fn run(&self) -> AppResult<SchemaStatus> {
        async {
            let mut conn = connection::connect(self.config).await?;
            let result = inspect(&mut conn).await;
            connection::close(conn).await;
            result
        }
        .instrument(self.span.clone())
        .await
    }
}

/// Read-only look at `information_schema` / `pg_indexes` for the current schema.
pub async fn inspect(conn: &mut PgConnection) -> AppResult<SchemaStatus> {
    let schema: String = sqlx::query_scalar("SELECT current_schema()::text")
        .fetch_one(&mut *conn)
        .await
        .map_err(AppError::statement("read current schema"))?;

    let existing_tables: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::text FROM information_schema.tables
         WHERE table_schema = current_schema() AND table_type = 'BASE TABLE'",
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(AppError::statement("list tables"))?;

    let existing_indexes: Vec<String> = sqlx::query_scalar(
        "SELECT indexname::text FROM pg_indexes WHERE schemaname = current_schema()",
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(AppError::statement("list indexes"))?;

    let mut tables = Vec::with_capacity(TABLES.len());
    for t in &TABLES {
        let present = existing_tables.iter().any(|name| name == t.name);
        let rows = if present {
            let sql = format!("SELECT COUNT(*) FROM {}", t.name);
            let n: i64 = sqlx::query_scalar(&sql)
                .fetch_one(&mut *conn)
                .await
                .map_err(AppError::statement(format!("count rows of {}", t.name)))?;
            Some(n)
        } else {
            None
        };
        tables.push(TablePresence {
            name: t.name,
            present,
            rows,
        });
    }

    let indexes = INDEXES
        .iter()
        .map(|i| IndexPresence {
            name: i.name,
            table: i.table,
            present: existing_indexes.iter().any(|name| name == i.name),
        })
        .collect();

    Ok(SchemaStatus {
        schema,
        tables,
        indexes,
    })
}
