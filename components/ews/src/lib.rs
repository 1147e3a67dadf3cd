pub mod batch;
pub mod config;
pub mod error;
pub mod id;
pub mod mailbox;
pub mod observer;
pub mod operation;
pub mod recurrence;
pub mod types;
pub mod update;

pub use store;

pub type Result<T> = std::result::Result<T, error::item::ItemError>;
