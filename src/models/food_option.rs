use rust_decimal::Decimal;
use serde::Serialize;

/// Selectable option of a menu item (`food_options`), e.g. spice level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodOption {
    pub option_id: i32,
    pub item_id: Option<i32>,
    pub option_name: String,
    pub option_type: String,
    pub additional_price: Option<Decimal>,
    pub available: Option<bool>,
}

/// Option chosen for one order line (`order_item_options`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemOption {
    pub order_item_option_id: i32,
    pub order_item_id: Option<i32>,
    pub option_id: Option<i32>,
    pub selected_value: Option<String>,
    pub additional_price: Option<Decimal>,
}
