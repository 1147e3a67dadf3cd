pub mod common;
pub mod field;
pub mod flag;
pub mod folder;
pub mod id;
pub mod item;
pub mod recurrence;
pub mod request;
pub mod response;
