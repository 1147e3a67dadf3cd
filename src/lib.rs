use std::sync::Arc;

use ews::mailbox::Mailbox;
use tokio::sync::mpsc;

pub mod api;
pub mod server;
pub mod services;

#[cfg(test)]
pub mod tests;

pub const DEFAULT_HTTP_PORT: u16 = 8080;

pub struct EWSServer {
    pub mailbox: Arc<Mailbox>,
    pub worker_pool: rayon::ThreadPool,
    pub housekeeper: mpsc::Sender<services::housekeeper::Event>,
}
