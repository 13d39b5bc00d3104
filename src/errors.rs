//! Unified application error type.
//! Every module (config, db, cli) returns AppError so the binary can report
//! failures in one place.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Configuration
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Target store (PostgreSQL)
    // ---------------------------
    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Statement error during {step}: {source}")]
    Statement {
        step: String,
        #[source]
        source: sqlx::Error,
    },

    // ---------------------------
    // Legacy store (SQLite)
    // ---------------------------
    #[error("Legacy database error: {0}")]
    Legacy(#[from] rusqlite::Error),

    #[error("Legacy value in {table}.{column} could not be converted: {reason}")]
    LegacyConversion {
        table: &'static str,
        column: &'static str,
        reason: String,
    },

    #[error("Legacy database not found: {0}")]
    LegacyMissing(String),

    #[error("Legacy database has no table '{0}'")]
    LegacyTableMissing(&'static str),

    // ---------------------------
    // Misc
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Wrap a sqlx error raised while executing `step`.
    pub fn statement(step: impl Into<String>) -> impl FnOnce(sqlx::Error) -> AppError {
        let step = step.into();
        move |source| AppError::Statement { step, source }
    }

    /// True for errors raised before any connection attempt.
    pub fn is_config(&self) -> bool {
        matches!(self, AppError::Config(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
