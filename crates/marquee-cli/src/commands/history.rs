use super::Session;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_search_core::history::WatchHistory;
use serde_json::json;

pub fn run_list(session: &Session, output: &Output) -> Result<()> {
    let history = WatchHistory::load(session.store.clone(), session.config.search.history_limit);

    if !output.is_human() {
        output.json(&json!({ "type": "history", "entries": history.entries() }));
        return Ok(());
    }

    if history.is_empty() {
        output.info("Nothing viewed yet");
        return Ok(());
    }

    output.println(output.accent("Recently viewed"));
    for entry in history.entries() {
        let viewed = entry.viewed_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M");
        output.println(format!(
            "  {} ({}) {}  {}",
            entry.title,
            entry.year,
            output.dim(&entry.imdb_id),
            output.dim(&viewed.to_string())
        ));
    }
    Ok(())
}

pub fn run_clear(session: &Session, output: &Output) -> Result<()> {
    let mut history = WatchHistory::load(session.store.clone(), session.config.search.history_limit);
    let count = history.len();
    history.clear().map_err(|e| eyre!("{}", e))?;
    output.success(format!("Cleared {} history entries", count));
    Ok(())
}
