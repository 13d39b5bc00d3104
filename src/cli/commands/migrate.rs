use crate::config::Config;
use crate::db::{MigrationReport, Migrator};
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{GREY, RESET, color_for_count};
use std::path::Path;

/// Handle the `migrate` command
pub async fn handle(cfg: &Config, legacy: &Path, json: bool) -> AppResult<()> {
    let summary = cfg.summary()?;
    if !json {
        info(format!(
            "Migrating {} → {summary}",
            legacy.display()
        ));
    }

    let span = tracing::info_span!("migrate", legacy = %legacy.display(), db = %summary);
    let report = Migrator::new(cfg, legacy, span).run().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    success(format!(
        "Migration completed: {} rows inserted, {} already present",
        report.total_inserted(),
        report.total_skipped()
    ));
    Ok(())
}

fn print_report(report: &MigrationReport) {
    header("Migration report");
    println!(
        "{:<20} {:>8} {:>8} {:>8}",
        "TABLE", "READ", "INSERTED", "SKIPPED"
    );

    for t in &report.tables {
        if t.missing_in_legacy {
            println!("{:<20} {GREY}{:>8}{RESET}", t.table, "absent");
            continue;
        }
        println!(
            "{:<20} {:>8} {}{:>8}{RESET} {:>8}",
            t.table,
            t.read,
            color_for_count(t.inserted),
            t.inserted,
            t.skipped
        );
    }

    for t in report.tables.iter().filter(|t| t.missing_in_legacy) {
        warning(format!("{} not found in legacy database", t.table));
    }
}
