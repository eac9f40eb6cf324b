use super::Session;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use movie_search_config::API_KEY_ENV;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_show(session: &Session, full: bool, output: &Output) -> Result<()> {
    let config = &session.config;
    let config_file = session.paths.config_file();
    let key = config.effective_api_key().unwrap_or_default();
    let key_display = if full { key.clone() } else { mask_string(&key) };
    let key_source = if std::env::var(API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        API_KEY_ENV.to_string()
    } else {
        "config file".to_string()
    };

    if !output.is_human() {
        output.json(&json!({
            "type": "config",
            "config_file": config_file,
            "state_file": session.paths.state_file(),
            "api": {
                "api_key": key_display,
                "api_key_source": key_source,
                "base_url": config.api.base_url,
                "timeout_secs": config.api.timeout_secs,
            },
            "search": config.search,
            "cache": config.cache,
            "export": config.export,
        }));
        return Ok(());
    }

    if output.is_quiet() {
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!("No configuration file at {}, using defaults", config_file.display()));
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Configuration").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
        Cell::new(config_file.display().to_string()),
    ]);
    let api_key_cell = if key.is_empty() {
        "<not set>".red().to_string()
    } else {
        format!("{} ({})", key_display, key_source)
    };
    let rows: Vec<(&str, String)> = vec![
        ("API key", api_key_cell),
        ("Base URL", config.api.base_url.clone()),
        ("Timeout", format!("{}s", config.api.timeout_secs)),
        ("Debounce", format!("{} ms", config.search.debounce_ms)),
        ("Suggestions", config.search.suggestion_limit.to_string()),
        ("History limit", config.search.history_limit.to_string()),
        (
            "Cache entries",
            config
                .cache
                .max_entries
                .map(|n| n.to_string())
                .unwrap_or_else(|| "unbounded".to_string()),
        ),
        (
            "Export dir",
            config
                .export
                .output_dir
                .clone()
                .unwrap_or_else(|| session.paths.export_dir())
                .display()
                .to_string(),
        ),
        (
            "Poster proxy",
            config.export.poster_proxy.clone().unwrap_or_else(|| "<none>".to_string()),
        ),
        ("State file", session.paths.state_file().display().to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);

    if let Err(e) = config.validate() {
        output.warn(e.to_string());
    }
    Ok(())
}

pub fn run_set_key(session: &Session, key: &str, output: &Output) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    let mut config = session.config.clone();
    config.api.api_key = key.to_string();
    config.validate().map_err(|e| eyre!("{}", e))?;

    let config_file = session.paths.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("API key saved to {}", config_file.display()));
    if std::env::var(API_KEY_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the saved key", API_KEY_ENV));
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    if s.len() <= 4 {
        return "*".repeat(s.len());
    }
    format!("{}***{}", &s[..2], &s[s.len() - 2..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("894809ee"), "89***ee");
    }
}
