pub mod connection;
pub mod inspect;
pub mod legacy;
pub mod migrate;
pub mod schema;
pub mod seed;

pub use inspect::{SchemaInspector, SchemaStatus};
pub use migrate::{MigrationReport, Migrator};
pub use schema::{InitReport, SchemaInitializer};
