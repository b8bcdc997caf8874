//! Configuration loading for serpvis

mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".serpvisrc.json";

/// Find and load the config file. An explicit path must exist; otherwise the
/// working directory and its parents are searched, falling back to defaults.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Some(path)
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in config: {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("Invalid config: {}", path.display()))?;
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Search for .serpvisrc.json in a directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Default config contents written by `serpvis init`
pub fn default_config_json(threshold: Option<f64>) -> String {
    let value = serde_json::json!({
        "brand": "",
        "hl": "en",
        "gl": "us",
        "delayMs": 1200,
        "threshold": threshold.unwrap_or(1.0),
        "weights": { "traditional": 1.0, "nonTraditional": 0.5 }
    });
    // json! output is always serializable
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
}
