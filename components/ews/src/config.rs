use store::config::env_settings::EnvSettings;

use crate::{id::codec::MAX_MONIKER_LEN, types::common::DateTimePrecision};

pub struct EwsConfig {
    pub mailbox_address: String,
    pub max_size_request: usize,
    pub max_items_per_request: usize,
    pub max_occurrences: usize,
    pub date_time_precision: DateTimePrecision,
}

impl Default for EwsConfig {
    fn default() -> Self {
        EwsConfig {
            mailbox_address: "admin@example.org".to_string(),
            max_size_request: 10000000,
            max_items_per_request: 500,
            max_occurrences: 1000,
            date_time_precision: DateTimePrecision::Seconds,
        }
    }
}

impl From<&EnvSettings> for EwsConfig {
    fn from(settings: &EnvSettings) -> Self {
        let default = EwsConfig::default();
        EwsConfig {
            mailbox_address: settings
                .get("mailbox-address")
                .map(|address| {
                    if address.len() > MAX_MONIKER_LEN {
                        panic!(
                            "Parameter 'mailbox-address' exceeds the maximum length of {} bytes.",
                            MAX_MONIKER_LEN
                        );
                    }
                    address
                })
                .unwrap_or(default.mailbox_address),
            max_size_request: settings
                .parse("max-size-request")
                .filter(|v| *v >= 1024)
                .unwrap_or(default.max_size_request),
            max_items_per_request: settings
                .parse("max-items-per-request")
                .filter(|v| *v > 0)
                .unwrap_or(default.max_items_per_request),
            max_occurrences: settings
                .parse("max-occurrences")
                .filter(|v| *v > 0)
                .unwrap_or(default.max_occurrences),
            date_time_precision: settings
                .parse("date-time-precision")
                .unwrap_or(default.date_time_precision),
        }
    }
}
