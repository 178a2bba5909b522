use std::{fs, path::Path};

use color_eyre::eyre::{WrapErr, eyre};
use log::{debug, info};
use scramble_core::parser::parse_lenient;
use serde::{Deserialize, Serialize};

const CONFIG_DIR: &str = "scramble";
const CONFIG_FILE: &str = "config.toml";

/// Settings read from `config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scramble: ScrambleConfig,
    pub editor: EditorConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrambleConfig {
    /// Number of moves in a random scramble
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// How many past sequences undo can go back to
    pub history_depth: usize,
    /// Printed between tokens
    pub separator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        ScrambleConfig { length: 25 }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            history_depth: 64,
            separator: " ".to_owned(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { color: true }
    }
}

impl Config {
    /// Read the configuration from `path`, or from the user's config
    /// directory when no path is given. Only an explicitly given file has to
    /// exist.
    pub fn load(path: Option<&Path>) -> color_eyre::Result<Config> {
        if let Some(path) = path {
            return Config::read(path);
        }

        let Some(default_path) = dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        else {
            debug!("No config directory on this platform, using defaults");
            return Ok(Config::default());
        };

        if default_path.exists() {
            Config::read(&default_path)
        } else {
            debug!("{} does not exist, using defaults", default_path.display());
            Ok(Config::default())
        }
    }

    fn read(path: &Path) -> color_eyre::Result<Config> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read configuration file {}", path.display()))?;
        let config = Config::parse(&text)
            .wrap_err_with(|| format!("Failed to parse configuration file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> color_eyre::Result<Config> {
        let config = toml::from_str::<Config>(text)?;

        if config.editor.history_depth == 0 {
            return Err(eyre!("`editor.history_depth` must be at least 1"));
        }
        let separator = &config.editor.separator;
        if separator.is_empty() || !parse_lenient(separator).is_empty() {
            return Err(eyre!(
                "`editor.separator` must be non-empty and free of move notation, got {separator:?}"
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = Config::parse("[scramble]\nlength = 30\n").unwrap();
        assert_eq!(config.scramble.length, 30);
        assert_eq!(config.editor, EditorConfig::default());
        assert!(config.display.color);

        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn full_file() {
        let config = Config::parse(
            r#"
            [scramble]
            length = 20

            [editor]
            history_depth = 5
            separator = ", "

            [display]
            color = false
            "#,
        )
        .unwrap();

        assert_eq!(config.scramble.length, 20);
        assert_eq!(config.editor.history_depth, 5);
        assert_eq!(config.editor.separator, ", ");
        assert!(!config.display.color);
    }

    #[test]
    fn bad_files_are_errors() {
        assert!(Config::parse("[scramble]\nlength = \"long\"").is_err());
        assert!(Config::parse("[scramble]\nlenght = 3").is_err());
        assert!(Config::parse("[editor]\nhistory_depth = 0").is_err());
        assert!(Config::parse("[editor]\nseparator = \"\"").is_err());
        assert!(Config::parse("[editor]\nseparator = \" R \"").is_err());
        assert!(Config::parse("[editor]\nseparator = \" | \"").is_ok());
    }

    #[test]
    fn explicit_path_must_exist() {
        assert!(Config::load(Some(Path::new("/nonexistent/scramble.toml"))).is_err());
    }
}
