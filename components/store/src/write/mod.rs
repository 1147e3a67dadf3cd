pub mod delete;
pub mod folder;
pub mod id_assign;
pub mod insert;
pub mod mutex_map;
pub mod relocate;
pub mod update;
