use std::{collections::HashMap, env, net::IpAddr, str::FromStr, time::Duration};

pub struct EnvSettings {
    pub args: HashMap<String, String>,
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvSettings {
    pub fn new() -> Self {
        Self::from_args(env::args().skip(1))
    }

    pub fn from_args(arguments: impl IntoIterator<Item = String>) -> Self {
        let mut args = HashMap::new();
        let mut current_key: Option<String> = None;

        for arg in arguments {
            if let Some((key, value)) = arg.split_once('=') {
                if let Some(key) = key.strip_prefix("--") {
                    args.insert(key.to_lowercase(), value.to_string());
                } else {
                    panic!("Invalid command line argument: {}", key);
                }
            } else if let Some(key) = current_key.take() {
                args.insert(key, arg);
            } else if let Some(key) = arg.strip_prefix("--") {
                current_key = Some(key.to_lowercase());
            } else {
                panic!("Invalid command line argument: {}", arg);
            }
        }

        EnvSettings { args }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        if let Some(value) = self.args.get(name) {
            Some(value.clone())
        } else if let Ok(value) = env::var(name.replace('-', "_").to_uppercase()) {
            Some(value)
        } else {
            None
        }
    }

    pub fn parse<T>(&self, name: &str) -> Option<T>
    where
        T: FromStr,
    {
        let value = self.get(name)?;
        match value.parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => panic!("Failed to parse configuration parameter: {}", name),
        }
    }

    pub fn parse_ipaddr(&self, name: &str, default: &str) -> IpAddr {
        let value = self.get(name).unwrap_or_else(|| default.to_string());
        value.parse().unwrap_or_else(|e| {
            panic!("Failed to parse address in parameter '{}': {}", name, e);
        })
    }

    /// Parses a duration expressed as a number followed by an optional unit
    /// (`s`, `m`, `h` or `d`). Bare numbers are read as `default_unit`.
    pub fn parse_duration(&self, name: &str, default_unit: char) -> Option<Duration> {
        let value = self.get(name)?;
        let value = value.trim();
        let (amount, unit) = match value.chars().last() {
            Some(unit @ ('s' | 'm' | 'h' | 'd')) => (&value[..value.len() - 1], unit),
            _ => (value, default_unit),
        };
        let secs = amount
            .trim()
            .parse::<u64>()
            .ok()
            .and_then(|amount| {
                amount.checked_mul(match unit {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => 86400,
                })
            })
            .unwrap_or_else(|| panic!("Failed to parse duration in parameter '{}'.", name));

        Some(Duration::from_secs(secs))
    }
}
