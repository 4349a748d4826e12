use std::{collections::HashMap, fs};

use tracing::warn;

/// Default remote API, overridable via `courier.toml` or environment.
const DEFAULT_API_BASE_URL: &str = "https://zeptogkp.vercel.app/api/v1";
const DEFAULT_DATABASE_URL: &str = "sqlite://./data/courier.db";

#[derive(Debug)]
pub struct Settings {
    pub api_base_url: String,
    pub database_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            database_url: DEFAULT_DATABASE_URL.into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("courier.toml") {
        apply_file_settings(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("COURIER_API_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("COURIER_DATABASE_URL") {
        settings.database_url = v;
    }

    settings
}

/// Folds `courier.toml` contents into the settings. An unparsable file is
/// warned about and otherwise ignored; the defaults stay in effect.
fn apply_file_settings(settings: &mut Settings, raw: &str) {
    match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = v.clone();
            }
            if let Some(v) = file_cfg.get("database_url") {
                settings.database_url = v.clone();
            }
        }
        Err(err) => warn!(error = %err, "ignoring unparsable courier.toml"),
    }
}

/// Accepts plain file paths as well as sqlite URLs, normalizing to the
/// form the storage layer expects.
pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite:{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}
