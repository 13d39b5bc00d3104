use crate::config::Config;
use crate::db::{SchemaInspector, SchemaStatus};
use crate::errors::AppResult;
use crate::ui::messages::{field, header, success, warning};
use crate::utils::colors::{GREY, RESET, presence};

/// Handle the `status` command
pub async fn handle(cfg: &Config, json: bool) -> AppResult<()> {
    let summary = cfg.summary()?;
    let span = tracing::info_span!("status", db = %summary);
    let status = SchemaInspector::new(cfg, span).run().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    print_status(&status);
    if status.is_complete() {
        success("Schema is complete");
    } else {
        warning("Schema is incomplete: run `rorderdb init`");
    }
    Ok(())
}

fn print_status(status: &SchemaStatus) {
    field("Schema", &status.schema);

    header("Tables");
    for t in &status.tables {
        let rows = match t.rows {
            Some(n) => n.to_string(),
            None => format!("{GREY}--{RESET}"),
        };
        println!("{:<20} {:<18} {:>8}", t.name, presence(t.present), rows);
    }

    header("Indexes");
    for i in &status.indexes {
        println!("{:<28} {:<14} {}", i.name, i.table, presence(i.present));
    }
}
