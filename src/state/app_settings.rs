use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// UI preferences persisted between runs. Fetched stats are never stored;
/// only what the user last pointed the dashboard at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub favorite_team: Option<String>,
    pub season: Option<String>,
    pub game_limit: usize,
    pub full_screen: bool,
    #[serde(skip)]
    pub log_level: Option<LevelFilter>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            favorite_team: None,
            season: None,
            game_limit: 10,
            full_screen: false,
            log_level: None,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        let path = settings_path();
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), String> {
        let path = settings_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| format!("create dir failed: {e}"))?;
        }
        let payload = serde_json::to_string_pretty(self)
            .map_err(|e| format!("serialize settings failed: {e}"))?;
        std::fs::write(&path, payload).map_err(|e| format!("write settings failed: {e}"))
    }
}

fn settings_path() -> PathBuf {
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join("toitui").join("settings.json");
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home)
            .join(".config")
            .join("toitui")
            .join("settings.json");
    }
    PathBuf::from("toitui_settings.json")
}
