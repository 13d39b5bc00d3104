//! Single PostgreSQL connection for CLI usage (no pool).

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use sqlx::{Connection, PgConnection};

/// Open an encrypted connection to the target store.
/// Configuration problems surface before any network activity.
pub async fn connect(cfg: &Config) -> AppResult<PgConnection> {
    let opts = cfg.connect_options()?;
    let summary = cfg.summary()?;

    tracing::debug!(db = %summary, "Connecting to PostgreSQL");

    match PgConnection::connect_with(&opts).await {
        Ok(conn) => {
            tracing::info!(db = %summary, "Connected to PostgreSQL");
            Ok(conn)
        }
        Err(e) => {
            tracing::error!(db = %summary, error = %e, "Database connection error");
            Err(AppError::Connection(e))
        }
    }
}

/// Close the connection, logging (not returning) a failed goodbye.
pub async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "Failed to close PostgreSQL connection cleanly");
    }
}
