pub mod env_settings;
pub mod store;

pub use env_settings::EnvSettings;
