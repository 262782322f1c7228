//! Generic HTTP Server Adapter
//!
//! Allocates the socket buffers on the calling task's stack and runs the
//! `listen_and_serve` loop with the given handler. Meant to be called from
//! each task of the `http_server_task` pool.

use embassy_net::Stack;
use log::info;

use crate::core::net::http::{HttpHandler, HttpServer};
use crate::infrastructure::config;

const RX_BUFFER_SIZE: usize = 1024;
const TX_BUFFER_SIZE: usize = 1024;

/// Run the HTTP server with the given handler. Never returns.
pub(crate) async fn run_http_server<H: HttpHandler>(
    worker: usize,
    stack: Stack<'static>,
    handler: &H,
) -> ! {
    let server = HttpServer::new(handler, config::HTTP.socket_timeout);
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];

    info!(
        "http_server: worker {} listening on port {}",
        worker,
        config::HTTP.port
    );
    server
        .listen_and_serve(stack, config::HTTP.port, &mut rx_buffer, &mut tx_buffer)
        .await
}
