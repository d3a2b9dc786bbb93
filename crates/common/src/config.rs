//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Editor defaults (zoom, canvas, timeline geometry).
    pub editor: EditorDefaults,

    /// Export defaults.
    pub export: ExportDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default editor parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorDefaults {
    /// Default timeline zoom in pixels per second.
    pub zoom: f64,

    /// Minimum timeline zoom (long timelines).
    pub min_zoom: f64,

    /// Maximum timeline zoom (frame-accurate editing).
    pub max_zoom: f64,

    /// Default canvas width in pixels.
    pub canvas_width: u32,

    /// Default canvas height in pixels.
    pub canvas_height: u32,

    /// Default project duration in seconds.
    pub project_duration_secs: f64,

    /// Snap threshold in screen pixels.
    pub snap_threshold_px: f64,

    /// Height of a timeline track row in pixels.
    pub track_row_height_px: f64,
}

/// Default export parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDefaults {
    /// Default export frame rate.
    pub fps: u32,

    /// Default video bitrate in bits per second.
    pub video_bitrate: u64,

    /// Default audio bitrate in bits per second.
    pub audio_bitrate: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "framecut=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            editor: EditorDefaults::default(),
            export: ExportDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            zoom: 50.0,
            min_zoom: 0.5,
            max_zoom: 200.0,
            canvas_width: 1920,
            canvas_height: 1080,
            project_duration_secs: 300.0,
            snap_threshold_px: 20.0,
            track_row_height_px: 112.0,
        }
    }
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            fps: 30,
            video_bitrate: 8_000_000,
            audio_bitrate: 128_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("framecut").join("config.json")
}
