use super::{finish_spinner, spinner, Session};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use movie_search_core::compare::{CompareSelection, MAX_COMPARE};
use movie_search_core::CompareReport;
use serde_json::json;

pub async fn run_add(session: &Session, imdb_id: &str, output: &Output) -> Result<()> {
    let imdb_id = imdb_id.trim();
    let selection = CompareSelection::load(session.store.clone());
    if selection.contains(imdb_id) {
        output.info(format!("{} is already selected", imdb_id));
        return Ok(());
    }
    if selection.is_full() {
        output.warn(format!(
            "Already comparing {} titles. Remove one first with `marquee compare remove <imdb-id>`",
            MAX_COMPARE
        ));
        return Ok(());
    }

    let orchestrator = session.orchestrator()?;
    let details = orchestrator.lookup(imdb_id).await.map_err(|e| eyre!("{}", e))?;
    orchestrator
        .add_to_compare(&details.summary())
        .map_err(|e| eyre!("{}", e))?;

    let selected = orchestrator.compare_selection().len();
    output.success(format!("Added {} to compare ({}/{})", details.title, selected, MAX_COMPARE));
    Ok(())
}

pub fn run_remove(session: &Session, imdb_id: &str, output: &Output) -> Result<()> {
    let mut selection = CompareSelection::load(session.store.clone());
    if selection.remove(imdb_id.trim()).map_err(|e| eyre!("{}", e))? {
        output.success(format!("Removed {} from compare", imdb_id.trim()));
    } else {
        output.info(format!("{} was not selected", imdb_id.trim()));
    }
    Ok(())
}

pub fn run_clear(session: &Session, output: &Output) -> Result<()> {
    let mut selection = CompareSelection::load(session.store.clone());
    selection.clear().map_err(|e| eyre!("{}", e))?;
    output.success("Compare list cleared");
    Ok(())
}

pub async fn run_show(session: &Session, output: &Output) -> Result<()> {
    let selection = CompareSelection::load(session.store.clone());
    if selection.len() < MAX_COMPARE {
        output.info(format!(
            "Select {} titles to compare ({} selected). Use `marquee compare add <imdb-id>`",
            MAX_COMPARE,
            selection.len()
        ));
        for item in selection.items() {
            output.println(format!("  {} ({}) {}", item.title, item.year, output.dim(&item.imdb_id)));
        }
        return Ok(());
    }

    let orchestrator = session.orchestrator()?;
    let spinner = spinner(output, "Loading both titles...");
    let report = orchestrator.compare_details().await;
    finish_spinner(spinner);

    let report = report.ok_or_else(|| eyre!("Compare list changed while loading"))?;
    print_report(&report, output);
    Ok(())
}

pub fn print_report(report: &CompareReport, output: &Output) {
    if !output.is_human() {
        output.json(&json!({
            "type": "compare",
            "report": report,
            "verdict_line": report.verdict_line(),
        }));
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(""),
            Cell::new(&report.first.title),
            Cell::new(&report.second.title),
        ]);
    for row in &report.rows {
        table.add_row(vec![Cell::new(row.label), Cell::new(&row.first), Cell::new(&row.second)]);
    }

    output.println(table.to_string());
    output.println(output.accent(&report.verdict_line()));
}
