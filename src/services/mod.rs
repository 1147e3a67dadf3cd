pub mod housekeeper;
