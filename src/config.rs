use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::theme::{Theme, ThemeError};

/// Per-role color overrides applied on top of the selected theme
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOverrides {
    pub bgcol: Option<String>,
    pub fgcol: Option<String>,
    pub hicol: Option<String>,
    pub hicol2: Option<String>,
    pub hicol3: Option<String>,
    pub errcol: Option<String>,
}

impl ColorOverrides {
    fn entries(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("bgcol", self.bgcol.as_deref()),
            ("fgcol", self.fgcol.as_deref()),
            ("hicol", self.hicol.as_deref()),
            ("hicol2", self.hicol2.as_deref()),
            ("hicol3", self.hicol3.as_deref()),
            ("errcol", self.errcol.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub theme: Option<String>,
    #[serde(flatten)]
    pub colors: ColorOverrides,
}

impl Config {
    /// Pick the theme to draw with.
    ///
    /// An explicit theme name wins over everything and must exist. Otherwise
    /// the configured theme (or `default`) is used with the configured
    /// color overrides; bad config entries are logged and skipped.
    pub fn resolve_theme(&self, explicit: Option<&str>) -> Result<Theme, ThemeError> {
        if let Some(name) = explicit {
            return Theme::named(name);
        }

        let mut theme = match self.theme.as_deref() {
            Some(name) => Theme::builtin(name).unwrap_or_else(|| {
                warn!(theme = name, "unknown theme in config, using default");
                Theme::default()
            }),
            None => Theme::default(),
        };

        for (role, value) in self.colors.entries() {
            if let Some(value) = value {
                if let Err(err) = theme.set(role, value) {
                    warn!(%err, "ignoring color override");
                }
            }
        }

        Ok(theme)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "invalid config, using defaults");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
