use std::time::Duration;

use super::env_settings::EnvSettings;

pub struct StoreConfig {
    pub lock_shards: usize,
    pub recoverable_retention: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            lock_shards: 1024,
            recoverable_retention: Duration::from_secs(14 * 86400),
        }
    }
}

impl From<&EnvSettings> for StoreConfig {
    fn from(settings: &EnvSettings) -> Self {
        let default = StoreConfig::default();
        StoreConfig {
            lock_shards: settings
                .parse("lock-shards")
                .filter(|v| *v > 0)
                .unwrap_or(default.lock_shards),
            recoverable_retention: settings
                .parse_duration("soft-delete-retention", 'd')
                .unwrap_or(default.recoverable_retention),
        }
    }
}
