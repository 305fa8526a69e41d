// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::{Error, Res};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    pub source: SourceConfig,
    /// Minutes between automatic advances; 0 disables.
    #[serde(default = "default_interval")]
    pub interval: u64,
    #[serde(default)]
    pub buttons: ButtonPins,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub width: usize,
    pub height: usize,
    pub output: PathBuf,
    pub command: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
            output: PathBuf::from("/tmp/inky-frame.png"),
            command: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub immich: Option<ImmichConfig>,
    pub library: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImmichConfig {
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_batch")]
    pub batch: u32,
    #[serde(default = "default_attempts")]
    pub attempts: u32,
}

/// BCM pin numbers of the four buttons.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ButtonPins {
    pub next: u8,
    pub rotate90: u8,
    pub rotate180: u8,
    pub orientation: u8,
}

impl Default for ButtonPins {
    fn default() -> Self {
        Self {
            next: 5,
            rotate90: 6,
            rotate180: 16,
            orientation: 24,
        }
    }
}

// One week.
const MAX_INTERVAL: u64 = 7 * 24 * 60;

fn default_interval() -> u64 {
    10
}

fn default_batch() -> u32 {
    10
}

fn default_attempts() -> u32 {
    3
}

impl Config {
    pub fn period(&self) -> Option<Duration> {
        match self.interval {
            0 => None,
            min => Some(Duration::from_secs(min.saturating_mul(60))),
        }
    }

    pub fn validate(&self) -> Res<()> {
        if self.interval > MAX_INTERVAL {
            return Err(Error::Config(format!(
                "interval {} exceeds {MAX_INTERVAL} minutes",
                self.interval
            )));
        }

        if self.display.width == 0 || self.display.height == 0 {
            return Err(Error::Config(format!(
                "invalid display size {}x{}",
                self.display.width, self.display.height
            )));
        }

        match (&self.source.immich, &self.source.library) {
            (None, None) => Err(Error::Config(
                "no photo source: set source.immich or source.library".to_string(),
            )),
            (Some(immich), _) if immich.attempts == 0 || immich.batch == 0 => Err(Error::Config(
                "immich batch and attempts must be positive".to_string(),
            )),
            (Some(immich), _) if immich.url.is_empty() => {
                Err(Error::Config("immich url is empty".to_string()))
            }
            _ => Ok(()),
        }
    }
}

pub fn load<P: AsRef<Path>>(path: P) -> Res<Config> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|_| Error::NotFound(path.to_path_buf()))?;
    let reader = BufReader::new(file);
    let config: Config = serde_yaml::from_reader(reader)
        .map_err(|err| Error::Config(format!("{}: {err}", path.display())))?;

    config.validate()?;

    Ok(config)
}
