use super::Session;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_search_core::Theme;
use serde_json::json;

pub fn run_show(session: &Session, output: &Output) -> Result<()> {
    let theme = session.theme();
    if output.is_human() {
        output.info(format!("Theme: {}", output.with_theme(theme).accent(theme.as_str())));
    } else {
        output.json(&json!({ "type": "theme", "theme": theme }));
    }
    Ok(())
}

pub fn run_toggle(session: &Session, output: &Output) -> Result<()> {
    let theme = Theme::toggle(session.store.as_ref()).map_err(|e| eyre!("{}", e))?;
    output.with_theme(theme).success(format!("Switched to {} theme", theme));
    Ok(())
}
