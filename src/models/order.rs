use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

/// Customer order (`orders`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub order_id: i32,
    pub table_id: Option<i32>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub total_amount: Option<Decimal>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

/// Line of an order (`order_items`). Deleted together with its order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub order_item_id: i32,
    pub order_id: Option<i32>,
    pub item_id: Option<i32>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub special_requests: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl OrderItem {
    /// quantity × unit price, as stored in `total_price` by the application.
    pub fn computed_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
