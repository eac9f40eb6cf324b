use super::{finish_spinner, spinner, Session};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_search_core::{export_details, ExportedFiles, MarkdownRenderer, SearchOrchestrator};
use movie_search_models::MovieDetails;
use serde_json::json;
use std::path::{Path, PathBuf};

pub async fn run_details(session: &Session, imdb_id: &str, output: &Output) -> Result<()> {
    let orchestrator = session.orchestrator()?;
    show_details(&orchestrator, imdb_id, output).await
}

/// Load a title, print it and record the view
pub async fn show_details(orchestrator: &SearchOrchestrator, imdb_id: &str, output: &Output) -> Result<()> {
    let spinner = spinner(output, format!("Loading {}...", imdb_id));
    let result = orchestrator.get_details(imdb_id).await;
    finish_spinner(spinner);

    let details = result.map_err(|e| eyre!("{}", e))?;
    let favorite = orchestrator.is_favorite(&details.imdb_id);
    print_details(&details, favorite, output);
    Ok(())
}

pub fn print_details(details: &MovieDetails, favorite: bool, output: &Output) {
    if !output.is_human() {
        output.json(&json!({
            "type": "details",
            "favorite": favorite,
            "details": details,
        }));
        return;
    }

    let heart = if favorite { " ♥" } else { "" };
    output.println(format!("{} ({}){}", output.accent(&details.title), details.year, heart));

    let rows: [(&str, &Option<String>); 12] = [
        ("Rated", &details.rated),
        ("Released", &details.released),
        ("Runtime", &details.runtime),
        ("Genre", &details.genre),
        ("Director", &details.director),
        ("Writer", &details.writer),
        ("Cast", &details.actors),
        ("Language", &details.language),
        ("Country", &details.country),
        ("Awards", &details.awards),
        ("Rating", &details.imdb_rating),
        ("Votes", &details.imdb_votes),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            output.println(format!("  {:<9} {}", format!("{}:", label), value));
        }
    }

    output.println("");
    output.println(details.plot.as_deref().unwrap_or("No plot available."));
    output.println(output.dim(&format!("https://www.imdb.com/title/{}/", details.imdb_id)));
}

pub async fn run_export(session: &Session, imdb_id: &str, dir: Option<PathBuf>, output: &Output) -> Result<()> {
    let orchestrator = session.orchestrator()?;
    let output_dir = dir
        .or_else(|| session.config.export.output_dir.clone())
        .unwrap_or_else(|| session.paths.export_dir());

    let spinner = spinner(output, format!("Exporting {}...", imdb_id));
    let exported = export_title(session, &orchestrator, imdb_id, &output_dir).await;
    finish_spinner(spinner);

    let files = exported?;
    if files.placeholder_poster {
        output.warn("Poster could not be downloaded, a placeholder was used");
    }
    if output.is_human() {
        output.success(format!("Exported to {}", files.document.display()));
    } else {
        output.json(&json!({
            "type": "export",
            "document": files.document,
            "poster": files.poster,
            "placeholder_poster": files.placeholder_poster,
        }));
    }
    Ok(())
}

async fn export_title(
    session: &Session,
    orchestrator: &SearchOrchestrator,
    imdb_id: &str,
    output_dir: &Path,
) -> Result<ExportedFiles> {
    let fetcher = session.image_fetcher()?;
    let details = orchestrator.lookup(imdb_id).await.map_err(|e| eyre!("{}", e))?;
    let files = export_details(
        &details,
        &fetcher,
        &MarkdownRenderer,
        output_dir,
        session.config.export.poster_proxy.as_deref(),
    )
    .await?;
    Ok(files)
}
