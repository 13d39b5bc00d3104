use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

/// Menu category (`menu_categories`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuCategory {
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Menu item (`menu_items`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub item_id: i32,                       // ⇔ menu_items.item_id (SERIAL)
    pub name: String,                       // ⇔ menu_items.name (VARCHAR(200))
    pub description: Option<String>,        // ⇔ menu_items.description (TEXT)
    pub price: Decimal,                     // ⇔ menu_items.price (DECIMAL(10,2))
    pub category_id: Option<i32>,           // ⇔ menu_items.category_id → menu_categories
    pub image_url: Option<String>,          // ⇔ menu_items.image_url (VARCHAR(500))
    pub available: Option<bool>,            // ⇔ menu_items.available (default TRUE)
    pub created_at: Option<NaiveDateTime>,  // ⇔ menu_items.created_at (TIMESTAMP)
}
