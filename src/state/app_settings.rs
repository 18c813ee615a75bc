use log::LevelFilter;
use serde::Deserialize;
use statsbomb_api::client::{DataSource, OPEN_DATA_URL};
use std::path::PathBuf;
use std::str::FromStr;

/// Lionel Messi in the StatsBomb open data.
pub const DEFAULT_PLAYER_ID: u32 = 5503;
pub const DEFAULT_COUNTRY: &str = "Spain";
/// La Liga.
pub const DEFAULT_COMPETITION_ID: u32 = 11;

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub player_id: u32,
    pub country: String,
    pub competition_id: u32,
    pub data_dir: Option<PathBuf>,
    pub base_url: String,
    /// Problems found while loading, logged once the log level is applied.
    pub warnings: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            player_id: DEFAULT_PLAYER_ID,
            country: DEFAULT_COUNTRY.to_string(),
            competition_id: DEFAULT_COMPETITION_ID,
            data_dir: None,
            base_url: OPEN_DATA_URL.to_string(),
            warnings: Vec::new(),
        }
    }
}

/// On-disk shape of `settings.json`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub player_id: Option<u32>,
    pub country: Option<String>,
    pub competition_id: Option<u32>,
    pub data_dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub log_level: Option<String>,
    pub full_screen: Option<bool>,
}

impl AppSettings {
    /// Defaults, then the settings file, then `PITCHSIDE_*` environment variables.
    pub fn load() -> Self {
        let mut settings = Self::default();
        if let Some(path) = settings_path()
            && let Ok(content) = std::fs::read_to_string(&path)
        {
            match serde_json::from_str::<SettingsFile>(&content) {
                Ok(file) => settings.apply_file(file),
                Err(e) => settings.warnings.push(format!("ignoring {}: {e}", path.display())),
            }
        }
        settings.apply_env(|key| std::env::var(key).ok());
        settings
    }

    pub fn apply_file(&mut self, file: SettingsFile) {
        if let Some(id) = file.player_id {
            self.player_id = id;
        }
        if let Some(country) = file.country {
            self.country = country;
        }
        if let Some(id) = file.competition_id {
            self.competition_id = id;
        }
        if let Some(dir) = file.data_dir {
            self.data_dir = Some(dir);
        }
        if let Some(url) = file.base_url {
            self.base_url = url;
        }
        if let Some(level) = file.log_level {
            self.set_log_level(&level);
        }
        if let Some(full_screen) = file.full_screen {
            self.full_screen = full_screen;
        }
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(raw) = var("PITCHSIDE_PLAYER_ID") {
            match raw.parse() {
                Ok(id) => self.player_id = id,
                Err(_) => self.warnings.push(format!("PITCHSIDE_PLAYER_ID={raw:?} is not a player id")),
            }
        }
        if let Some(country) = var("PITCHSIDE_COUNTRY") {
            self.country = country;
        }
        if let Some(raw) = var("PITCHSIDE_COMPETITION_ID") {
            match raw.parse() {
                Ok(id) => self.competition_id = id,
                Err(_) => self
                    .warnings
                    .push(format!("PITCHSIDE_COMPETITION_ID={raw:?} is not a competition id")),
            }
        }
        if let Some(dir) = var("PITCHSIDE_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = var("PITCHSIDE_BASE_URL") {
            self.base_url = url;
        }
        if let Some(level) = var("PITCHSIDE_LOG") {
            self.set_log_level(&level);
        }
    }

    /// A local checkout wins over the remote base URL.
    pub fn data_source(&self) -> DataSource {
        match &self.data_dir {
            Some(root) => DataSource::Local { root: root.clone() },
            None => DataSource::Remote { base_url: self.base_url.clone() },
        }
    }

    fn set_log_level(&mut self, raw: &str) {
        match LevelFilter::from_str(raw) {
            Ok(level) => self.log_level = Some(level),
            Err(_) => self.warnings.push(format!("unknown log level {raw:?}")),
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return Some(PathBuf::from(config_dir).join("pitchside").join("settings.json"));
    }
    let home = std::env::var("HOME").ok().filter(|h| !h.trim().is_empty())?;
    Some(PathBuf::from(home).join(".config").join("pitchside").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_target_messi_in_la_liga() {
        let s = AppSettings::default();
        assert_eq!(s.player_id, 5503);
        assert_eq!(s.country, "Spain");
        assert_eq!(s.competition_id, 11);
        assert_eq!(s.data_source(), DataSource::Remote { base_url: OPEN_DATA_URL.to_string() });
    }

    #[test]
    fn file_values_override_defaults() {
        let file: SettingsFile = serde_json::from_str(
            r#"{"player_id": 5211, "data_dir": "/srv/open-data/data", "log_level": "debug"}"#,
        )
        .unwrap();
        let mut s = AppSettings::default();
        s.apply_file(file);
        assert_eq!(s.player_id, 5211);
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
        assert_eq!(
            s.data_source(),
            DataSource::Local { root: PathBuf::from("/srv/open-data/data") }
        );
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        assert!(serde_json::from_str::<SettingsFile>(r#"{"player": 1}"#).is_err());
    }

    #[test]
    fn env_overrides_file_and_ignores_garbage() {
        let mut s = AppSettings::default();
        s.apply_file(SettingsFile { player_id: Some(1), ..Default::default() });
        s.apply_env(env(&[
            ("PITCHSIDE_PLAYER_ID", "not-a-number"),
            ("PITCHSIDE_COUNTRY", "England"),
            ("PITCHSIDE_COMPETITION_ID", " 2 "),
            ("PITCHSIDE_LOG", "loud"),
        ]));
        assert_eq!(s.player_id, 1);
        assert_eq!(s.country, "England");
        assert_eq!(s.competition_id, 2);
        assert_eq!(s.log_level, None);
        assert_eq!(
            s.warnings,
            vec![
                "PITCHSIDE_PLAYER_ID=\"not-a-number\" is not a player id".to_string(),
                "unknown log level \"loud\"".to_string(),
            ]
        );
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut s = AppSettings::default();
        s.apply_env(env(&[("PITCHSIDE_DATA_DIR", "  "), ("PITCHSIDE_BASE_URL", "")]));
        assert_eq!(s, AppSettings::default());
    }
}
