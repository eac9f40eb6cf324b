use super::{print_cards, Session};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_search_core::favorites::Favorites;
use serde_json::json;

pub fn run_list(session: &Session, output: &Output) -> Result<()> {
    let favorites = Favorites::load(session.store.clone());

    if !output.is_human() {
        output.json(&json!({ "type": "favorites", "items": favorites.items() }));
        return Ok(());
    }

    if favorites.is_empty() {
        output.info("No favorites yet. Add one with `marquee favorites toggle <imdb-id>`");
        return Ok(());
    }

    output.println(output.accent(&format!("Favorites ({})", favorites.len())));
    print_cards(output, favorites.items(), 1, |_| true, |_| false);
    Ok(())
}

/// Removal works offline; adding looks the title up first
pub async fn run_toggle(session: &Session, imdb_id: &str, output: &Output) -> Result<()> {
    let imdb_id = imdb_id.trim();
    let mut favorites = Favorites::load(session.store.clone());

    if favorites.contains(imdb_id) {
        favorites.remove(imdb_id).map_err(|e| eyre!("{}", e))?;
        output.success(format!("Removed {} from favorites", imdb_id));
        return Ok(());
    }

    let orchestrator = session.orchestrator()?;
    let details = orchestrator.lookup(imdb_id).await.map_err(|e| eyre!("{}", e))?;
    orchestrator
        .toggle_favorite(&details.summary())
        .map_err(|e| eyre!("{}", e))?;
    output.success(format!("Added {} ({}) to favorites", details.title, details.year));
    Ok(())
}
