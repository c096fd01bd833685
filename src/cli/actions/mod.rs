pub mod server;

use std::path::PathBuf;

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Server {
        port: u16,
        users: Option<PathBuf>,
        reap_interval: u64,
    },
}
