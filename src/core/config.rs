use crate::core::debounce::MIN_REP_INTERVAL_MS;
use crate::core::milestone::{DEFAULT_MILESTONE_INCREMENT, DEFAULT_MILESTONE_INTERVAL};
use crate::models::exercise::ExerciseKind;
use crate::models::pose::PoseConfig;
use crate::models::session::MilestonePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Exercise tracked for the session
    pub exercise: ExerciseKind,
    /// Minimum time between two accepted reps, in milliseconds
    pub min_rep_interval_ms: i64,
    /// Reps between "continue or finish?" prompts
    pub milestone_interval: u32,
    /// Interval growth after each continue, used by the `growing` policy
    pub milestone_increment: u32,
    pub milestone_policy: MilestonePolicy,
    /// Seconds before an unanswered milestone prompt continues on its own
    pub prompt_timeout_secs: u64,
    /// Minimum pose score (0.0-1.0) for a detection to count
    pub min_detection_confidence: f32,
    /// Minimum visibility (0.0-1.0) each tracked joint needs for a frame to count
    pub min_tracking_confidence: f32,
    /// Default tracing filter, overridden by RUST_LOG
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exercise: ExerciseKind::BicepCurl,
            min_rep_interval_ms: MIN_REP_INTERVAL_MS,
            milestone_interval: DEFAULT_MILESTONE_INTERVAL,
            milestone_increment: DEFAULT_MILESTONE_INCREMENT,
            milestone_policy: MilestonePolicy::Fixed,
            prompt_timeout_secs: 5,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it with defaults if it doesn't exist
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load configuration from `path`, creating it with defaults if it doesn't exist
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let config: Config = serde_json::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;

        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(io_err)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_rep_interval_ms < 0 || self.min_rep_interval_ms > 60_000 {
            return Err(ConfigError::Invalid(format!(
                "min_rep_interval_ms: {}. Must be between 0 and 60000",
                self.min_rep_interval_ms
            )));
        }

        if self.milestone_interval == 0 || self.milestone_interval > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "milestone_interval: {}. Must be between 1 and 10000",
                self.milestone_interval
            )));
        }

        if self.milestone_policy == MilestonePolicy::Growing && self.milestone_increment == 0 {
            return Err(ConfigError::Invalid(
                "milestone_increment must be positive with the growing policy".to_string(),
            ));
        }

        if self.prompt_timeout_secs == 0 || self.prompt_timeout_secs > 600 {
            return Err(ConfigError::Invalid(format!(
                "prompt_timeout_secs: {}. Must be between 1 and 600",
                self.prompt_timeout_secs
            )));
        }

        for (name, value) in [
            ("min_detection_confidence", self.min_detection_confidence),
            ("min_tracking_confidence", self.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{}: {}. Must be between 0.0 and 1.0",
                    name, value
                )));
            }
        }

        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level cannot be empty".to_string()));
        }

        Ok(())
    }

    pub fn prompt_timeout(&self) -> Duration {
        Duration::from_secs(self.prompt_timeout_secs)
    }

    pub fn pose_config(&self) -> PoseConfig {
        PoseConfig {
            min_detection_confidence: self.min_detection_confidence,
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> ConfigResult<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| ConfigError::NoHomeDirectory)?;

        let mut path = PathBuf::from(home);
        path.push(".repcount");
        path.push("settings.json");

        Ok(path)
    }
}
