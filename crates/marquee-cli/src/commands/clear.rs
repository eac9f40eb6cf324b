use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_search_config::{Config, PathManager};
use std::fs;

pub fn run_clear(all: bool, state: bool, exports: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::new().map_err(|e| eyre!("{}", e))?;

    if all {
        clear_state(&path_manager, output)?;
        clear_exports(&path_manager, output)?;
        output.success("All saved state and exports cleared");
        return Ok(());
    }

    let mut cleared_anything = false;

    if state {
        clear_state(&path_manager, output)?;
        cleared_anything = true;
    }

    if exports {
        clear_exports(&path_manager, output)?;
        cleared_anything = true;
    }

    if !cleared_anything {
        output.warn("No clear option specified. Use --state, --exports, or --all");
        output.println("\nExample: marquee clear --state");
    }

    Ok(())
}

/// Favorites, history, compare list, theme and last search all live in one file
fn clear_state(path_manager: &PathManager, output: &Output) -> Result<()> {
    let state_file = path_manager.state_file();
    if state_file.exists() {
        fs::remove_file(&state_file)
            .map_err(|e| eyre!("Failed to remove saved state at {}: {}", state_file.display(), e))?;
        output.success(format!("Cleared saved state: {}", state_file.display()));
    } else {
        output.info("No saved state found to clear");
    }
    Ok(())
}

fn clear_exports(path_manager: &PathManager, output: &Output) -> Result<()> {
    // Falls back to the default location when the config is unreadable
    let configured = Config::load_or_default(&path_manager.config_file())
        .ok()
        .and_then(|c| c.export.output_dir);
    let export_dir = configured.unwrap_or_else(|| path_manager.export_dir());

    if export_dir.exists() {
        fs::remove_dir_all(&export_dir)
            .map_err(|e| eyre!("Failed to remove exports at {}: {}", export_dir.display(), e))?;
        output.success(format!("Cleared exports: {}", export_dir.display()));
    } else {
        output.info("No exports found to clear");
    }
    Ok(())
}
