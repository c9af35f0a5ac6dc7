use std::fs;
use std::path::Path;
use std::time::Duration;

use pokedex_engine::{ClientSettings, EngineConfig, FetchSettings, DEFAULT_LIST_LIMIT};
use pokedex_logging::{dex_info, dex_warn};
use serde::{Deserialize, Serialize};

/// User-editable settings, read from a RON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub base_url: String,
    pub max_retries: u32,
    pub backoff_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_body_bytes: u64,
    pub list_limit: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        let client = ClientSettings::default();
        let fetch = FetchSettings::default();
        Self {
            base_url: client.base_url,
            max_retries: client.max_retries,
            backoff_ms: duration_ms(client.backoff_unit),
            connect_timeout_ms: duration_ms(fetch.connect_timeout),
            request_timeout_ms: duration_ms(fetch.request_timeout),
            max_body_bytes: fetch.max_bytes,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl AppSettings {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            fetch: FetchSettings {
                connect_timeout: Duration::from_millis(self.connect_timeout_ms),
                request_timeout: Duration::from_millis(self.request_timeout_ms),
                max_bytes: self.max_body_bytes,
                ..FetchSettings::default()
            },
            client: ClientSettings {
                base_url: self.base_url.clone(),
                max_retries: self.max_retries,
                backoff_unit: Duration::from_millis(self.backoff_ms),
            },
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Reads settings from `path`. A missing or unreadable file yields defaults.
pub(crate) fn load_settings(path: &Path) -> AppSettings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppSettings::default();
        }
        Err(err) => {
            dex_warn!("Failed to read settings from {:?}: {}", path, err);
            return AppSettings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            dex_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            dex_warn!("Failed to parse settings from {:?}: {}", path, err);
            AppSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_settings(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("pokedex.ron");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("absent.ron"));
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.list_limit, 151);
        assert_eq!(settings.max_retries, 2);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(
            &dir,
            "(base_url: \"http://localhost:8080/api/v2/\", max_retries: 5, list_limit: 20)",
        );

        let settings = load_settings(&path);
        assert_eq!(settings.base_url, "http://localhost:8080/api/v2/");
        assert_eq!(settings.max_retries, 5);
        assert_eq!(settings.list_limit, 20);
        assert_eq!(settings.backoff_ms, 1000);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(&dir, "(max_retries: \"many\"");
        assert_eq!(load_settings(&path), AppSettings::default());
    }

    #[test]
    fn engine_config_carries_durations() {
        let settings = AppSettings {
            backoff_ms: 250,
            request_timeout_ms: 5_000,
            ..AppSettings::default()
        };
        let config = settings.engine_config();
        assert_eq!(config.client.backoff_unit, Duration::from_millis(250));
        assert_eq!(config.fetch.request_timeout, Duration::from_secs(5));
        assert_eq!(config.fetch.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn defaults_round_trip_through_ron() {
        let text = ron::ser::to_string_pretty(
            &AppSettings::default(),
            ron::ser::PrettyConfig::new(),
        )
        .unwrap();
        let parsed: AppSettings = ron::from_str(&text).unwrap();
        assert_eq!(parsed, AppSettings::default());
    }
}
