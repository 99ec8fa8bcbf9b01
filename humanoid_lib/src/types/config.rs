use crate::MessageParameters;
use eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

pub const CONFIG_ENV: &str = "WHOLE_BODY_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/whole_body_interface.toml";

/// Fixed at startup. Externally gated sessions wait for the controller
/// status stream; one-shot sessions send a single command and exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    #[default]
    ExternallyGated,
    OneShot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: OperatingMode,
    /// Rate of the dataflow timer driving the tick; informational only
    pub tick_rate_hz: f64,
    /// Wait after the one-shot command so it is delivered before exit
    pub shutdown_delay_secs: f64,
    /// Slightly longer than the tick period so streamed targets overlap
    pub stream_integration_duration: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: OperatingMode::ExternallyGated,
            tick_rate_hz: 10.0,
            shutdown_delay_secs: 3.0,
            stream_integration_duration: 0.13,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainLink {
    /// Canonical joint name, e.g. "torsoYaw"
    pub joint: String,
    /// Joint origin relative to the parent link (meters)
    pub origin: [f64; 3],
    pub axis: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicsConfig {
    /// Revolute joints from the pelvis to the chest link
    pub torso_chain: Vec<ChainLink>,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            torso_chain: vec![
                ChainLink {
                    joint: "torsoYaw".to_string(),
                    origin: [0.0, 0.0, 0.0],
                    axis: [0.0, 0.0, 1.0],
                },
                ChainLink {
                    joint: "torsoPitch".to_string(),
                    origin: [0.04191, 0.0, 0.0],
                    axis: [0.0, 1.0, 0.0],
                },
                ChainLink {
                    joint: "torsoRoll".to_string(),
                    origin: [0.0, 0.0, 0.0203],
                    axis: [1.0, 0.0, 0.0],
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceConfig {
    pub session: SessionConfig,
    /// Message defaults before mode-specific overrides
    pub message: MessageParameters,
    pub kinematics: KinematicsConfig,
}

impl InterfaceConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: InterfaceConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads the file named by `WHOLE_BODY_CONFIG`, or the default path when it
    /// exists, then applies environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load_from_file(&path)
                .map_err(|e| eyre::eyre!("Failed to load config from {}: {}", path, e))?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_PATH).map_err(|e| {
                    eyre::eyre!("Failed to load config from {}: {}", DEFAULT_CONFIG_PATH, e)
                })?
            }
            Err(_) => {
                info!("No configuration file found, using built-in defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("COMMANDS_FROM_CONTROLLERS") {
            if let Ok(from_controllers) = val.parse::<bool>() {
                self.session.mode = if from_controllers {
                    OperatingMode::ExternallyGated
                } else {
                    OperatingMode::OneShot
                };
            }
        }
        if let Some(val) = lookup("STREAM_INTEGRATION_DURATION") {
            self.session.stream_integration_duration = val
                .parse()
                .unwrap_or(self.session.stream_integration_duration);
        }
        if let Some(val) = lookup("SHUTDOWN_DELAY_SECS") {
            self.session.shutdown_delay_secs =
                val.parse().unwrap_or(self.session.shutdown_delay_secs);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.session.stream_integration_duration < 0.0 {
            return Err(eyre::eyre!(
                "Stream integration duration must not be negative, got {}",
                self.session.stream_integration_duration
            ));
        }

        if self.session.shutdown_delay_secs < 0.0 {
            return Err(eyre::eyre!(
                "Shutdown delay must not be negative, got {}",
                self.session.shutdown_delay_secs
            ));
        }

        if self.message.go_home.trajectory_time <= 0.0 {
            return Err(eyre::eyre!(
                "Go-home trajectory time must be positive, got {}",
                self.message.go_home.trajectory_time
            ));
        }

        Ok(())
    }

    /// Message parameters for one composition: configured defaults plus the
    /// overrides the operating mode requires.
    pub fn message_parameters(&self) -> MessageParameters {
        let params = self.message.clone();
        match self.session.mode {
            OperatingMode::ExternallyGated => {
                params.streaming(self.session.stream_integration_duration)
            }
            OperatingMode::OneShot => params,
        }
    }
}
