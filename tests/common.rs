#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub fn rod() -> Command {
    let mut cmd = cargo_bin_cmd!("rorderdb");
    // Never pick up a developer's real database from the environment.
    cmd.env_remove("DATABASE_URL")
        .env_remove("DATABASE_SCHEMA")
        .env_remove("RUST_LOG");
    cmd
}

/// Legacy SQLite schema as the old application created it.
pub const LEGACY_CORE_DDL: &str = r#"
    CREATE TABLE tables (
        table_id   INTEGER PRIMARY KEY AUTOINCREMENT,
        table_name TEXT NOT NULL,
        status     TEXT DEFAULT 'available'
    );
    CREATE TABLE menu_categories (
        category_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        description TEXT
    );
    CREATE TABLE menu_items (
        item_id     INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        description TEXT,
        price       REAL NOT NULL,
        category_id INTEGER,
        image_url   TEXT,
        available   BOOLEAN DEFAULT 1,
        created_at  TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
    CREATE TABLE orders (
        order_id       INTEGER PRIMARY KEY AUTOINCREMENT,
        table_id       INTEGER,
        customer_name  TEXT,
        customer_phone TEXT,
        total_amount   REAL DEFAULT 0,
        status         TEXT DEFAULT 'active',
        created_at     TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at     TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        notes          TEXT
    );
    CREATE TABLE order_items (
        order_item_id    INTEGER PRIMARY KEY AUTOINCREMENT,
        order_id         INTEGER,
        item_id          INTEGER,
        quantity         INTEGER NOT NULL DEFAULT 1,
        unit_price       REAL NOT NULL,
        total_price      REAL NOT NULL,
        special_requests TEXT,
        created_at       TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
"#;

pub const LEGACY_OPTION_DDL: &str = r#"
    CREATE TABLE food_options (
        option_id        INTEGER PRIMARY KEY AUTOINCREMENT,
        item_id          INTEGER,
        option_name      TEXT NOT NULL,
        option_type      TEXT NOT NULL,
        additional_price REAL DEFAULT 0,
        available        BOOLEAN DEFAULT 1
    );
    CREATE TABLE order_item_options (
        order_item_option_id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_item_id        INTEGER,
        option_id            INTEGER,
        selected_value       TEXT,
        additional_price     REAL DEFAULT 0
    );
"#;

pub const LEGACY_CORE_DATA: &str = r#"
    INSERT INTO tables VALUES (1, 'Old Table 1', 'available');
    INSERT INTO tables VALUES (2, 'Old Table 2', 'occupied');
    INSERT INTO tables VALUES (11, 'Terrace 1', 'available');
    INSERT INTO tables VALUES (12, 'Terrace 2', 'reserved');

    INSERT INTO menu_categories VALUES (1, 'Mains', 'Old main dishes');
    INSERT INTO menu_categories VALUES (5, 'Noodles', 'Noodle dishes');

    INSERT INTO menu_items VALUES (1, 'Pad Thai', 'Rice noodles, tamarind', 60.0, 5, NULL, 1, '2024-01-05 10:00:00');
    INSERT INTO menu_items VALUES (2, 'Thai Iced Tea', NULL, '35.50', 1, 'tea.jpg', 0, '2024-01-05 10:05:00');

    INSERT INTO orders VALUES (1, 11, 'Somchai', '0812345678', 131.0, 'completed',
                               '2024-02-01 12:00:00', '2024-02-01 12:30:00', NULL);

    INSERT INTO order_items VALUES (1, 1, 1, 1, 60.0, 60.0, 'no peanuts', '2024-02-01 12:01:00');
    INSERT INTO order_items VALUES (2, 1, 2, 2, 35.5, 71.0, NULL, '2024-02-01 12:02:00');
"#;

pub const LEGACY_OPTION_DATA: &str = r#"
    INSERT INTO food_options VALUES (1, 1, 'Spicy', 'spice_level', 0, 1);
    INSERT INTO order_item_options VALUES (1, 1, 1, 'extra hot', 0.0);
"#;

/// Build a legacy database file inside `dir` from the given SQL batches.
pub fn legacy_db(dir: &Path, name: &str, batches: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::remove_file(&path).ok();
    let conn = Connection::open(&path).expect("open legacy db");
    for sql in batches {
        conn.execute_batch(sql).expect("prepare legacy db");
    }
    path
}

/// Full legacy database: all seven tables populated.
pub fn standard_legacy_db(dir: &Path) -> PathBuf {
    legacy_db(
        dir,
        "legacy.sqlite",
        &[
            LEGACY_CORE_DDL,
            LEGACY_OPTION_DDL,
            LEGACY_CORE_DATA,
            LEGACY_OPTION_DATA,
        ],
    )
}
