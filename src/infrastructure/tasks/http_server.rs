//! HTTP Server Task
//!
//! A pool of server tasks sharing the `OrientationController`. Each task
//! listens on the same port with its own socket, so a slow client holds one
//! worker while the others keep answering.

use embassy_net::Stack;

use crate::controllers::OrientationController;
use crate::infrastructure::adapters::run_http_server;
use crate::infrastructure::config::HTTP_SERVER_WORKERS;

#[embassy_executor::task(pool_size = HTTP_SERVER_WORKERS)]
pub async fn http_server_task(
    worker: usize,
    stack: Stack<'static>,
    handler: &'static OrientationController,
) {
    run_http_server(worker, stack, handler).await
}
