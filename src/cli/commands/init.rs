use crate::config::Config;
use crate::db::SchemaInitializer;
use crate::errors::AppResult;
use crate::ui::messages::{field, header, info, success};
use crate::utils::colors::{RESET, color_for_count};

/// Handle the `init` command
///
/// Creates the seven tables and five indexes when absent and seeds the
/// default dining tables / menu categories into empty tables. Everything
/// happens in one transaction.
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let summary = cfg.summary()?;
    info(format!("Initializing schema on {summary}"));

    let span = tracing::info_span!("init", db = %summary);
    let report = SchemaInitializer::new(cfg, span).run().await?;

    header("Schema");
    field("Tables ensured", report.tables);
    field("Indexes ensured", report.indexes);

    header("Seed data");
    let t = report.seed.tables_inserted;
    let c = report.seed.categories_inserted;
    field("Dining tables added", format!("{}{t}{RESET}", color_for_count(t)));
    field("Menu categories added", format!("{}{c}{RESET}", color_for_count(c)));

    success("PostgreSQL database initialized successfully");
    Ok(())
}
