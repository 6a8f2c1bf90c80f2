use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::falling_notes::StreamConfig;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            fps: 60,
            vsync: true,
        }
    }
}

impl WindowSettings {
    pub fn clamp(mut self) -> Self {
        self.width = self.width.clamp(320, 7680);
        self.height = self.height.clamp(240, 4320);
        self.fps = self.fps.clamp(1, 240);
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RhythmSettings {
    pub spawn_interval_ticks: u32,
    pub scroll_speed: f32,
    pub hit_tolerance: f32,
}

impl Default for RhythmSettings {
    fn default() -> Self {
        let stream = StreamConfig::default();
        Self {
            spawn_interval_ticks: stream.spawn_interval_ticks,
            scroll_speed: stream.scroll_speed,
            hit_tolerance: stream.hit_tolerance,
        }
    }
}

impl RhythmSettings {
    pub fn clamp(mut self) -> Self {
        self.spawn_interval_ticks = self.spawn_interval_ticks.max(1);
        self.scroll_speed = self.scroll_speed.clamp(0.5, 50.0);
        self.hit_tolerance = self.hit_tolerance.clamp(1.0, 400.0);
        self
    }

    pub fn stream_config(self) -> StreamConfig {
        StreamConfig {
            spawn_interval_ticks: self.spawn_interval_ticks,
            scroll_speed: self.scroll_speed,
            hit_tolerance: self.hit_tolerance,
            ..StreamConfig::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MidiSettings {
    /// Substring of the port name to open; falls back to the first usable port.
    pub preferred_port: Option<String>,
    /// Ports whose name contains any of these are skipped during auto-selection.
    pub ignored_ports: Vec<String>,
}

impl Default for MidiSettings {
    fn default() -> Self {
        Self {
            preferred_port: None,
            ignored_ports: vec!["Midi Through".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub rhythm: RhythmSettings,
    #[serde(default)]
    pub midi: MidiSettings,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            window: WindowSettings::default(),
            rhythm: RhythmSettings::default(),
            midi: MidiSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.window = self.window.clamp();
        self.rhythm = self.rhythm.clamp();
        self.log_level = self.log_level.trim().to_ascii_lowercase();
        if LevelFilter::from_str(&self.log_level).is_err() {
            self.log_level = default_log_level();
        }
        self
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

fn default_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("OPENKEYS_SETTINGS_PATH") {
            return Self::at(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("openkeys");
        path.push("settings.json");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or malformed files yield defaults.
    pub fn load(&self) -> Settings {
        let Ok(bytes) = fs::read(&self.path) else {
            log::debug!("no settings at {}, using defaults", self.path.display());
            return Settings::default();
        };
        match serde_json::from_slice::<Settings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                log::warn!("ignoring malformed settings {}: {err}", self.path.display());
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
