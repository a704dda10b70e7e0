/// Failures while loading or validating task set configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("invalid duration '{value}' for `{key}`")]
    Duration { key: &'static str, value: String },

    #[error("invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Failures while starting or stopping a tick driver
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("task set has no counter frequency configured")]
    Unconfigured,

    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("driver task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
