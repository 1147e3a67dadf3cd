pub mod folder;
pub mod get;
