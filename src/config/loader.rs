// Configuration file loading and creation

use super::types::Config;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("foosball");

    // Create config directory if it doesn't exist
    fs::create_dir_all(&path).ok();

    path.push("config.toml");
    path
}

/// Load configuration from file, or create default if it doesn't exist
pub fn load_config() -> anyhow::Result<Config> {
    let config_path = get_config_path();

    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        Ok(parse_config(&contents))
    } else {
        create_default_config(&config_path)?;
        Ok(Config::default())
    }
}

/// Parse config text, falling back to defaults on malformed input
pub fn parse_config(contents: &str) -> Config {
    match toml::from_str(contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse config file, using defaults");
            Config::default()
        }
    }
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> anyhow::Result<()> {
    let config = Config::default();
    let toml_string = toml::to_string_pretty(&config).context("serializing default config")?;

    let commented_toml = format!(
        "# Foosball Configuration File\n\
         # Edit this file to customize game behavior\n\
         # After editing, restart the game for changes to take effect\n\
         #\n\
         # Key binding format: Use \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Esc\", \"Space\"\n\
         #                     or single characters like \"W\", \"S\", \"Q\", etc.\n\
         #\n\
         # Physics values are in field units (800x500 field) and per-tick rates\n\
         # Colors: RGB values from 0-255\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "Created default config file");
    Ok(())
}
