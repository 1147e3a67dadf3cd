pub mod create;
pub mod delete;
pub mod find;
pub mod get;
pub mod mark_read;
pub mod relocate;
pub mod update;
