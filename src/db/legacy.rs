//! Read-only access to the legacy SQLite database.
//!
//! The legacy store kept money as REAL or TEXT, booleans as 0/1 and
//! timestamps as text, so every value goes through a lenient converter.

use crate::errors::{AppError, AppResult};
use crate::models::{
    DiningTable, FoodOption, MenuCategory, MenuItem, Order, OrderItem, OrderItemOption,
};
use chrono::{DateTime, NaiveDateTime};
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use rust_decimal::{Decimal, RoundingStrategy};
use std::path::Path;
use std::str::FromStr;

pub struct LegacyStore {
    conn: Connection,
}

impl LegacyStore {
    /// Open an existing SQLite file without write access.
    pub fn open(path: &Path) -> AppResult<Self> {
        if !path.is_file() {
            return Err(AppError::LegacyMissing(path.display().to_string()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    pub fn close(self) {
        if let Err((_, e)) = self.conn.close() {
            tracing::warn!(error = %e, "Failed to close legacy database cleanly");
        }
    }

    pub fn table_exists(&self, name: &str) -> AppResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn read_all<T, F>(&self, sql: &str, map: F) -> AppResult<Vec<T>>
    where
        F: Fn(&Row) -> AppResult<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(map(row)?);
        }
        Ok(out)
    }

    pub fn dining_tables(&self) -> AppResult<Vec<DiningTable>> {
        self.read_all(
            "SELECT table_id, table_name, status FROM tables ORDER BY table_id",
            |row| {
                Ok(DiningTable {
                    table_id: row.get(0)?,
                    table_name: row.get(1)?,
                    status: row.get(2)?,
                })
            },
        )
    }

    pub fn menu_categories(&self) -> AppResult<Vec<MenuCategory>> {
        self.read_all(
            "SELECT category_id, name, description FROM menu_categories ORDER BY category_id",
            |row| {
                Ok(MenuCategory {
                    category_id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                })
            },
        )
    }

    pub fn menu_items(&self) -> AppResult<Vec<MenuItem>> {
        const T: &str = "menu_items";
        self.read_all(
            "SELECT item_id, name, description, price, category_id, image_url, available, created_at
             FROM menu_items ORDER BY item_id",
            |row| {
                Ok(MenuItem {
                    item_id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    price: required(T, "price", money(T, "price", row.get(3)?)?)?,
                    category_id: row.get(4)?,
                    image_url: row.get(5)?,
                    available: flag(T, "available", row.get(6)?)?,
                    created_at: timestamp(T, "created_at", row.get(7)?)?,
                })
            },
        )
    }

    pub fn orders(&self) -> AppResult<Vec<Order>> {
        const T: &str = "orders";
        self.read_all(
            "SELECT order_id, table_id, customer_name, customer_phone, total_amount, status,
                    created_at, updated_at, notes
             FROM orders ORDER BY order_id",
            |row| {
                Ok(Order {
                    order_id: row.get(0)?,
                    table_id: row.get(1)?,
                    customer_name: row.get(2)?,
                    customer_phone: row.get(3)?,
                    total_amount: money(T, "total_amount", row.get(4)?)?,
                    status: row.get(5)?,
                    created_at: timestamp(T, "created_at", row.get(6)?)?,
                    updated_at: timestamp(T, "updated_at", row.get(7)?)?,
                    notes: row.get(8)?,
                })
            },
        )
    }

    pub fn order_items(&self) -> AppResult<Vec<OrderItem>> {
        const T: &str = "order_items";
        self.read_all(
            "SELECT order_item_id, order_id, item_id, quantity, unit_price, total_price,
                    special_requests, created_at
             FROM order_items ORDER BY order_item_id",
            |row| {
                Ok(OrderItem {
                    order_item_id: row.get(0)?,
                    order_id: row.get(1)?,
                    item_id: row.get(2)?,
                    quantity: row.get(3)?,
                    unit_price: required(T, "unit_price", money(T, "unit_price", row.get(4)?)?)?,
                    total_price: required(T, "total_price", money(T, "total_price", row.get(5)?)?)?,
                    special_requests: row.get(6)?,
                    created_at: timestamp(T, "created_at", row.get(7)?)?,
                })
            },
        )
    }

    pub fn food_options(&self) -> AppResult<Vec<FoodOption>> {
        const T: &str = "food_options";
        self.read_all(
            "SELECT option_id, item_id, option_name, option_type, additional_price, available
             FROM food_options ORDER BY option_id",
            |row| {
                Ok(FoodOption {
                    option_id: row.get(0)?,
                    item_id: row.get(1)?,
                    option_name: row.get(2)?,
                    option_type: row.get(3)?,
                    additional_price: money(T, "additional_price", row.get(4)?)?,
                    available: flag(T, "available", row.get(5)?)?,
                })
            },
        )
    }

    pub fn order_item_options(&self) -> AppResult<Vec<OrderItemOption>> {
        const T: &str = "order_item_options";
        self.read_all(
            "SELECT order_item_option_id, order_item_id, option_id, selected_value, additional_price
             FROM order_item_options ORDER BY order_item_option_id",
            |row| {
                Ok(OrderItemOption {
                    order_item_option_id: row.get(0)?,
                    order_item_id: row.get(1)?,
                    option_id: row.get(2)?,
                    selected_value: row.get(3)?,
                    additional_price: money(T, "additional_price", row.get(4)?)?,
                })
            },
        )
    }
}

fn conversion(table: &'static str, column: &'static str, reason: impl Into<String>) -> AppError {
    AppError::LegacyConversion {
        table,
        column,
        reason: reason.into(),
    }
}

fn required<T>(table: &'static str, column: &'static str, value: Option<T>) -> AppResult<T> {
    value.ok_or_else(|| conversion(table, column, "NULL in a NOT NULL column"))
}

/// Money as exact DECIMAL(10,2), whatever storage class SQLite used.
/// Halves round away from zero, as PostgreSQL NUMERIC does.
pub fn money(table: &'static str, column: &'static str, value: Value) -> AppResult<Option<Decimal>> {
    let dec = match value {
        Value::Null => return Ok(None),
        Value::Integer(i) => Decimal::from(i),
        Value::Real(f) => Decimal::from_str(&f.to_string())
            .map_err(|e| conversion(table, column, format!("{f}: {e}")))?,
        Value::Text(s) => Decimal::from_str(s.trim())
            .map_err(|e| conversion(table, column, format!("'{s}': {e}")))?,
        Value::Blob(_) => return Err(conversion(table, column, "BLOB is not a price")),
    };
    Ok(Some(dec.round_dp_with_strategy(
        2,
        RoundingStrategy::MidpointAwayFromZero,
    )))
}

/// Booleans stored as 0/1 or as text.
pub fn flag(table: &'static str, column: &'static str, value: Value) -> AppResult<Option<bool>> {
    match value {
        Value::Null => Ok(None),
        Value::Integer(i) => Ok(Some(i != 0)),
        Value::Real(f) => Ok(Some(f != 0.0)),
        Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "t" | "yes" | "y" => Ok(Some(true)),
            "0" | "false" | "f" | "no" | "n" | "" => Ok(Some(false)),
            other => Err(conversion(table, column, format!("'{other}' is not a boolean"))),
        },
        Value::Blob(_) => Err(conversion(table, column, "BLOB is not a boolean")),
    }
}

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Timestamps from SQLite text (CURRENT_TIMESTAMP, ISO 8601, RFC 3339) or unix seconds.
/// An explicit offset is dropped and the wall-clock time kept, as a
/// PostgreSQL TIMESTAMP column does.
pub fn timestamp(
    table: &'static str,
    column: &'static str,
    value: Value,
) -> AppResult<Option<NaiveDateTime>> {
    match value {
        Value::Null => Ok(None),
        Value::Integer(secs) => DateTime::from_timestamp(secs, 0)
            .map(|dt| Some(dt.naive_utc()))
            .ok_or_else(|| conversion(table, column, format!("{secs} is out of range"))),
        Value::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Ok(Some(dt.naive_local()));
            }
            TIMESTAMP_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(Some)
                .ok_or_else(|| conversion(table, column, format!("'{s}' is not a timestamp")))
        }
        Value::Real(_) | Value::Blob(_) => {
            Err(conversion(table, column, "unsupported timestamp storage"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn money_accepts_every_storage_class() {
        let d = |s: &str| Some(Decimal::from_str(s).unwrap());
        assert_eq!(money("t", "c", Value::Real(12.5)).unwrap(), d("12.50"));
        assert_eq!(money("t", "c", Value::Real(0.1 + 0.2)).unwrap(), d("0.30"));
        assert_eq!(money("t", "c", Value::Integer(45)).unwrap(), d("45"));
        assert_eq!(money("t", "c", Value::Text(" 60.00 ".into())).unwrap(), d("60.00"));
        assert_eq!(money("t", "c", Value::Text("2.345".into())).unwrap(), d("2.35"));
        assert_eq!(money("t", "c", Value::Real(0.125)).unwrap(), d("0.13"));
        assert_eq!(money("t", "c", Value::Text("-2.345".into())).unwrap(), d("-2.35"));
        assert_eq!(money("t", "c", Value::Null).unwrap(), None);
        assert!(money("t", "c", Value::Text("sixty".into())).is_err());
    }

    #[test]
    fn flags_from_integers_and_text() {
        assert_eq!(flag("t", "c", Value::Integer(1)).unwrap(), Some(true));
        assert_eq!(flag("t", "c", Value::Integer(0)).unwrap(), Some(false));
        assert_eq!(flag("t", "c", Value::Text("TRUE".into())).unwrap(), Some(true));
        assert_eq!(flag("t", "c", Value::Null).unwrap(), None);
        assert!(flag("t", "c", Value::Text("maybe".into())).is_err());
    }

    #[test]
    fn timestamps_in_sqlite_and_iso_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 11, 2)
            .unwrap()
            .and_hms_opt(18, 30, 5)
            .unwrap();

        for text in [
            "2024-11-02 18:30:05",
            "2024-11-02T18:30:05",
            "2024-11-02T18:30:05Z",
            "2024-11-02T18:30:05+07:00",
            "2024-11-02T18:30:05-05:00",
        ] {
            assert_eq!(
                timestamp("t", "c", Value::Text(text.into())).unwrap(),
                Some(expected),
                "{text}"
            );
        }

        let with_fraction = timestamp("t", "c", Value::Text("2024-11-02 18:30:05.250".into()))
            .unwrap()
            .unwrap();
        assert_eq!(with_fraction.nanosecond(), 250_000_000);

        assert_eq!(
            timestamp("t", "c", Value::Integer(expected.and_utc().timestamp())).unwrap(),
            Some(expected)
        );
        assert_eq!(timestamp("t", "c", Value::Text("".into())).unwrap(), None);
        assert!(timestamp("t", "c", Value::Text("yesterday".into())).is_err());
    }
}
