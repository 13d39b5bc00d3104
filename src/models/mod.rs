//! Row models for the seven restaurant tables.

pub mod dining_table;
pub mod food_option;
pub mod menu;
pub mod order;

pub use dining_table::{DiningTable, TableStatus};
pub use food_option::{FoodOption, OrderItemOption};
pub use menu::{MenuCategory, MenuItem};
pub use order::{Order, OrderItem};
