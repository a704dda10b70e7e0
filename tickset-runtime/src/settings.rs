use crate::error::ConfigError;
use crate::time_unit::TimeUnit;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variables with this prefix override file values,
/// e.g. `TICKSET_TASK_SET__COUNTER_FREQUENCY=1000`
pub const ENV_PREFIX: &str = "TICKSET";

/// Table holding the task set settings inside a config file
pub const SECTION: &str = "task_set";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Load config from a specific TOML file
pub fn load_toml_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    load_config(path.as_ref(), FileFormat::Toml)
}

/// Load config from a specific YAML file
pub fn load_yaml_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    load_config(path.as_ref(), FileFormat::Yaml)
}

fn load_config(path: &Path, format: FileFormat) -> Result<Config, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).format(format))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    Ok(config)
}

/// A duration written either as a number of seconds or as a shorthand like "250ms"
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DurationValue {
    Seconds(f64),
    Text(String),
}

impl DurationValue {
    fn to_seconds(&self, key: &'static str) -> Result<f64, ConfigError> {
        let seconds = match self {
            DurationValue::Seconds(value) => Some(*value),
            DurationValue::Text(text) => TimeUnit::parse_seconds(text),
        };
        match seconds {
            Some(value) if value.is_finite() && value >= 0.0 => Ok(value),
            _ => Err(ConfigError::Duration {
                key,
                value: self.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for DurationValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationValue::Seconds(value) => write!(f, "{}", value),
            DurationValue::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTaskSetConfig {
    counter_frequency: u64,
    max_elapsed: DurationValue,
    #[serde(default)]
    poll_interval: Option<DurationValue>,
}

/// Timing parameters of a task set
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSetConfig {
    /// Ticks per second of the external counter
    pub counter_frequency: u64,
    /// Ceiling, in seconds, on the elapsed time handed to a single execution
    pub max_elapsed: f64,
    /// How often a tick driver samples the clock
    pub poll_interval: Duration,
}

impl TaskSetConfig {
    pub fn new(counter_frequency: u64, max_elapsed: f64) -> Self {
        Self {
            counter_frequency,
            max_elapsed,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Read and validate the `[task_set]` section of a loaded config
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let raw: RawTaskSetConfig = config.get(SECTION)?;

        if raw.counter_frequency == 0 {
            return Err(ConfigError::Invalid {
                key: "counter_frequency",
                reason: "must be greater than zero".to_string(),
            });
        }

        let max_elapsed = raw.max_elapsed.to_seconds("max_elapsed")?;

        let poll_interval = match raw.poll_interval {
            Some(value) => {
                let seconds = value.to_seconds("poll_interval")?;
                let interval = Duration::try_from_secs_f64(seconds).map_err(|_| {
                    ConfigError::Duration {
                        key: "poll_interval",
                        value: value.to_string(),
                    }
                })?;
                if interval.is_zero() {
                    return Err(ConfigError::Invalid {
                        key: "poll_interval",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                interval
            }
            None => DEFAULT_POLL_INTERVAL,
        };

        Ok(Self {
            counter_frequency: raw.counter_frequency,
            max_elapsed,
            poll_interval,
        })
    }

    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_config(&load_toml_config(path)?)
    }

    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_config(&load_yaml_config(path)?)
    }
}
