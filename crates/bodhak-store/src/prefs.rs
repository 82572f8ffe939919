//! JSON-backed preference file.
//!
//! A single `preferences.json` under the state directory. A missing file reads
//! as the defaults; it is only written by [`PreferenceStore::save`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::StoreError;

pub const PREFERENCES_FILE: &str = "preferences.json";

/// Used when no platform config directory can be determined.
pub const FALLBACK_DIR: &str = ".bodhak";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(StoreError::UnknownTheme(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

/// Reads and writes [`Preferences`] in one directory.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    dir: PathBuf,
}

impl PreferenceStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform config directory for Bodhak, or `./.bodhak`.
    pub fn default_dir() -> PathBuf {
        ProjectDirs::from("ai", "Bodhak", "bodhak")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILE)
    }

    pub fn load(&self) -> Result<Preferences, StoreError> {
        let path = self.path();
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no preferences file, using defaults");
                return Ok(Preferences::default());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, prefs: &Preferences) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path();
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(&path, json).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), theme = %prefs.theme, "preferences saved");
        Ok(())
    }

    /// Flip the stored theme and return the new one.
    pub fn toggle_theme(&self) -> Result<Theme, StoreError> {
        let mut prefs = self.load()?;
        prefs.theme = prefs.theme.toggled();
        self.save(&prefs)?;
        Ok(prefs.theme)
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), StoreError> {
        let mut prefs = self.load()?;
        prefs.theme = theme;
        self.save(&prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_defaults_to_dark() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path());
        assert_eq!(store.load().unwrap().theme, Theme::Dark);
        assert!(!store.path().exists());
    }

    #[test]
    fn toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path().join("nested"));

        assert_eq!(store.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(store.load().unwrap().theme, Theme::Light);

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"theme\": \"light\""));

        assert_eq!(store.toggle_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn set_theme_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path());
        store.set_theme(Theme::Light).unwrap();
        store.set_theme(Theme::Light).unwrap();
        assert_eq!(store.load().unwrap().theme, Theme::Light);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path());
        fs::write(store.path(), "{ theme: ").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
    }

    #[test]
    fn empty_object_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path());
        fs::write(store.path(), "{}").unwrap();
        assert_eq!(store.load().unwrap(), Preferences::default());
    }

    #[test]
    fn theme_parsing() {
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!(matches!(
            "sepia".parse::<Theme>(),
            Err(StoreError::UnknownTheme(_))
        ));
    }
}
