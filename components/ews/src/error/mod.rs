pub mod item;
pub mod response;
