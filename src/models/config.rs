use serde::Deserialize;
use std::path::Path;

/// Application configuration loaded from an optional YAML file.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Minimum interval between two successful generations per user, in days.
    #[serde(default = "default_cooldown_days")]
    pub cooldown_days: i64,

    /// Inputs whose longer side exceeds this bound are downscaled before
    /// centering. Set to null in the config file to disable.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: Option<u32>,

    /// Default display duration per source image in milliseconds, used when
    /// the request omits `duration`.
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u32,

    /// Default number of interpolated frames per transition.
    #[serde(default = "default_fade_frames")]
    pub default_fade_frames: u32,

    /// Default display duration per fade frame in milliseconds.
    #[serde(default = "default_fade_duration_ms")]
    pub default_fade_duration_ms: u32,

    /// Secret for HMAC token verification. Usually supplied via the
    /// TOKEN_SECRET environment variable instead.
    #[serde(default)]
    pub token_secret: Option<String>,
}

fn default_cooldown_days() -> i64 {
    7
}

fn default_max_dimension() -> Option<u32> {
    Some(800)
}

fn default_duration_ms() -> u32 {
    100
}

fn default_fade_frames() -> u32 {
    10
}

fn default_fade_duration_ms() -> u32 {
    100
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cooldown_days: default_cooldown_days(),
            max_dimension: default_max_dimension(),
            default_duration_ms: default_duration_ms(),
            default_fade_frames: default_fade_frames(),
            default_fade_duration_ms: default_fade_duration_ms(),
            token_secret: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the path is unset, unreadable or unparseable.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        cooldown_days = config.cooldown_days,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// The cooldown window as a duration.
    pub fn cooldown(&self) -> chrono::Duration {
        chrono::Duration::days(self.cooldown_days)
    }
}
