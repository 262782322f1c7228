pub(crate) mod http_server;
pub(crate) mod network;

pub use http_server::http_server_task;
pub use network::{network_runner_task, wifi_connection_task};
