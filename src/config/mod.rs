use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use directories::ProjectDirs;
use log::warn;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, fs::File};
use toml::toml;

pub mod theme;

pub use theme::{Mode, Theme};

const CONFIG_FILE: &str = "folio.toml";

/// Fallback countdown target, kept in sync with the stub written on first run.
const DEFAULT_TARGET: &str = "2027-04-01T00:00:00+03:00";

fn project_dirs() -> ProjectDirs {
    ProjectDirs::from("com", "baraazino", "folio").expect("no home directory available")
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Raw {
    #[serde(default)]
    github: GithubSection,
    #[serde(default)]
    countdown: CountdownSection,
    #[serde(default)]
    appearance: AppearanceSection,
    #[serde(default)]
    data: DataSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct GithubSection {
    user: String,
    cooldown_secs: u64,
    timeout_secs: u64,
}

impl Default for GithubSection {
    fn default() -> Self {
        Self {
            user: "baraazino".to_owned(),
            cooldown_secs: 180,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct CountdownSection {
    target: String,
    message_done: String,
}

impl Default for CountdownSection {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_owned(),
            message_done: "It's graduation month! Let's celebrate.".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AppearanceSection {
    theme: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct DataSection {
    cache: bool,
}

impl Default for DataSection {
    fn default() -> Self {
        Self { cache: true }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    raw: Raw,
    theme: Theme,
}

impl Config {
    /// Reads the config file under the platform config directory, or from
    /// `path` when given. A missing file is not an error: a commented stub is
    /// written and its defaults used.
    pub fn read_from_path(path: Option<&Path>) -> Result<Self> {
        let dirs = project_dirs();
        let cfg_dir = path.map_or_else(|| dirs.config_dir().to_path_buf(), Path::to_path_buf);
        let cfg_path = if cfg_dir.extension().is_some() {
            // A file path was passed directly.
            cfg_dir
        } else {
            cfg_dir.join(CONFIG_FILE)
        };

        if cfg_path.exists() {
            let contents = fs::read_to_string(&cfg_path)
                .with_context(|| format!("could not read {}", cfg_path.display()))?;
            Self::parse(&contents, cfg_path)
        } else {
            if let Some(parent) = cfg_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut file = File::create(&cfg_path)?;
            let stub = toml! {
                [github]
                user = "baraazino"

                [countdown]
                target = "2027-04-01T00:00:00+03:00"
            };
            file.write_all(toml::to_string_pretty(&stub)?.as_bytes())?;

            Ok(Self {
                path: cfg_path,
                raw: Raw::default(),
                theme: Theme::default(),
            })
        }
    }

    fn parse(contents: &str, path: PathBuf) -> Result<Self> {
        let raw: Raw = toml::from_str(contents)
            .with_context(|| format!("invalid config at {}", path.display()))?;
        Ok(Self {
            path,
            raw,
            theme: Theme::default(),
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    pub fn github_user(&self) -> &str {
        &self.raw.github.user
    }

    pub fn set_github_user(&mut self, user: String) {
        self.raw.github.user = user;
    }

    /// Minimum age before a non-forced feed refresh hits the network again.
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.raw.github.cooldown_secs)
    }

    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.raw.github.timeout_secs)
    }

    pub fn countdown_target(&self) -> DateTime<FixedOffset> {
        match DateTime::parse_from_rfc3339(&self.raw.countdown.target) {
            Ok(target) => target,
            Err(err) => {
                warn!(
                    "unparseable countdown.target {:?} ({err}), using default",
                    self.raw.countdown.target
                );
                DateTime::parse_from_rfc3339(DEFAULT_TARGET).expect("default target parses")
            }
        }
    }

    pub fn countdown_done_message(&self) -> &str {
        &self.raw.countdown.message_done
    }

    /// Explicit theme from the config file, taking precedence over the
    /// persisted preference. `None` means follow the preference store.
    pub fn theme_preference(&self) -> Option<&str> {
        self.raw.appearance.theme.as_deref()
    }

    pub fn set_theme_preference(&mut self, name: String) {
        self.raw.appearance.theme = Some(name);
    }

    pub fn should_cache(&self) -> bool {
        self.raw.data.cache
    }

    pub fn db_path(&self) -> PathBuf {
        project_dirs().data_dir().join("folio.db")
    }

    pub fn log_path(&self) -> PathBuf {
        project_dirs().data_dir().join("folio.log")
    }

    /// The theme currently applied to the UI. The app swaps this when the
    /// mode toggles; the renderer only ever reads it.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}
