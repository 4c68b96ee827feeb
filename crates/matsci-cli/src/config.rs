use crate::error::{CliError, Result};
use crate::utils::parser;
use directories::ProjectDirs;
use matsci::engine::calculator::AngleMode;
use matsci::engine::config::{DEFAULT_ITERATIONS, DEFAULT_TICK_PERIOD, WorkflowConfigBuilder};
use matsci::engine::environment::{EnvironmentEvent, EnvironmentParams, Preset};
use matsci::engine::upload::{DEFAULT_ENDPOINT, DEFAULT_REPOSITORY};
use matsci::workflows::session::SessionConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialCalculatorConfig {
    #[serde(rename = "angle-mode")]
    angle_mode: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialWorkflowConfig {
    iterations: Option<usize>,
    #[serde(rename = "tick-period-ms")]
    tick_period_ms: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialEnvironmentConfig {
    preset: Option<String>,
    temperature: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialUploadConfig {
    endpoint: Option<String>,
    repository: Option<String>,
}

/// The config file as written: every key optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    calculator: Option<PartialCalculatorConfig>,
    workflow: Option<PartialWorkflowConfig>,
    environment: Option<PartialEnvironmentConfig>,
    upload: Option<PartialUploadConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub endpoint: String,
    pub repository: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub upload: UploadSettings,
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "matsci", "matsci-agent")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `explicit` if given (it must exist), otherwise the per-user file if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            Some(path) => {
                debug!("No configuration at {:?}; using defaults.", path);
                Ok(Self::default())
            }
            None => {
                debug!("No home directory found; using default configuration.");
                Ok(Self::default())
            }
        }
    }

    pub fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for assignment in set_values {
            let (key, value) = parser::parse_assignment(assignment)
                .map_err(|e| CliError::Config(e.to_string()))?;

            match key.as_str() {
                "calculator.angle-mode" => {
                    self.calculator
                        .get_or_insert_with(Default::default)
                        .angle_mode = Some(value);
                }
                "workflow.iterations" => {
                    self.workflow
                        .get_or_insert_with(Default::default)
                        .iterations = Some(parse_value(&key, &value)?);
                }
                "workflow.tick-period-ms" => {
                    self.workflow
                        .get_or_insert_with(Default::default)
                        .tick_period_ms = Some(parse_value(&key, &value)?);
                }
                "environment.preset" => {
                    self.environment
                        .get_or_insert_with(Default::default)
                        .preset = Some(value);
                }
                "environment.temperature" => {
                    self.environment
                        .get_or_insert_with(Default::default)
                        .temperature = Some(parse_value(&key, &value)?);
                }
                "environment.pressure" => {
                    self.environment
                        .get_or_insert_with(Default::default)
                        .pressure = Some(parse_value(&key, &value)?);
                }
                "environment.humidity" => {
                    self.environment
                        .get_or_insert_with(Default::default)
                        .humidity = Some(parse_value(&key, &value)?);
                }
                "upload.endpoint" => {
                    self.upload.get_or_insert_with(Default::default).endpoint = Some(value);
                }
                "upload.repository" => {
                    self.upload.get_or_insert_with(Default::default).repository = Some(value);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn resolve(self) -> Result<AppConfig> {
        let calculator = self.calculator.unwrap_or_default();
        let workflow = self.workflow.unwrap_or_default();
        let environment = self.environment.unwrap_or_default();
        let upload = self.upload.unwrap_or_default();

        let angle_mode = match calculator.angle_mode {
            Some(mode) => parse_value::<AngleMode>("calculator.angle-mode", &mode)?,
            None => AngleMode::default(),
        };

        let tick_period = workflow
            .tick_period_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TICK_PERIOD);
        let workflow = WorkflowConfigBuilder::new()
            .iterations(workflow.iterations.unwrap_or(DEFAULT_ITERATIONS))
            .tick_period(tick_period)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let preset = match environment.preset {
            Some(name) => parse_value::<Preset>("environment.preset", &name)?,
            None => Preset::Room,
        };
        let environment = with_overrides(
            preset.params(),
            environment.temperature,
            environment.pressure,
            environment.humidity,
        );

        Ok(AppConfig {
            session: SessionConfig {
                workflow,
                angle_mode,
                environment,
            },
            upload: UploadSettings {
                endpoint: upload.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
                repository: upload
                    .repository
                    .unwrap_or_else(|| DEFAULT_REPOSITORY.to_string()),
            },
        })
    }
}

/// Applies whichever of the three conditions are given; each is clamped to its range.
pub fn with_overrides(
    base: EnvironmentParams,
    temperature: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
) -> EnvironmentParams {
    [
        temperature.map(EnvironmentEvent::SetTemperature),
        pressure.map(EnvironmentEvent::SetPressure),
        humidity.map(EnvironmentEvent::SetHumidity),
    ]
    .into_iter()
    .flatten()
    .fold(base, EnvironmentParams::apply)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}

/// Loads, overrides and resolves the configuration in one go.
pub fn load_app_config(explicit: Option<&Path>, set_values: &[String]) -> Result<AppConfig> {
    let mut partial = PartialAppConfig::load(explicit)?;
    partial.apply_set_values(set_values)?;
    partial.resolve()
}
