pub mod error;
pub mod folder;
pub mod object;
