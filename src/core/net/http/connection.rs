use embassy_net::tcp::TcpSocket;
use embedded_io_async::Write as _;
use heapless::String;
use log::debug;
use myrtio_tilt::http::{Route, TargetWriter as _, find_heading_end};

use super::{Error, HttpResult, ResponseHeaders};

const HEADER_BUFFER_SIZE: usize = 512;
const RESPONSE_HEADER_SIZE: usize = 256;

/// HTTP connection context
pub(crate) struct HttpConnection<'a> {
    route: Route,
    socket: TcpSocket<'a>,
}

impl<'a> HttpConnection<'a> {
    /// Read the request heading and route its request line.
    ///
    /// Request headers and body are not inspected. A request line that
    /// cannot be understood routes to [`Route::BadRequest`].
    pub(crate) async fn from_socket(mut socket: TcpSocket<'a>) -> Result<Self, Error> {
        let mut header_buf = [0u8; HEADER_BUFFER_SIZE];
        let header_len = read_heading(&mut header_buf, &mut socket).await?;
        if header_len == 0 {
            return Err(Error::NoData);
        }

        let route = Route::from_heading(&header_buf[..header_len]);
        debug!("http: {:?}", route);

        Ok(Self { route, socket })
    }

    pub(crate) fn route(&self) -> Route {
        self.route
    }

    /// Write the headers and body, then close the connection
    pub(crate) async fn write_response(
        &mut self,
        headers: &ResponseHeaders,
        body: &[u8],
    ) -> HttpResult {
        let mut heading = String::<RESPONSE_HEADER_SIZE>::new();
        headers.write_to(&mut heading)?;

        self.socket.write_all(heading.as_bytes()).await?;
        if !body.is_empty() {
            self.socket.write_all(body).await?;
        }
        self.socket.flush().await?;
        self.socket.close();
        self.socket.flush().await?;

        Ok(())
    }
}

/// Read from the socket until the end of the request heading.
///
/// Returns the number of bytes read. Stops early when the buffer is full or
/// the peer closes the connection.
async fn read_heading(buf: &mut [u8], socket: &mut TcpSocket<'_>) -> Result<usize, Error> {
    let mut header_len = 0;
    while header_len < buf.len() {
        let n = socket.read(&mut buf[header_len..]).await?;
        if n == 0 {
            break;
        }
        header_len += n;
        if find_heading_end(&buf[..header_len]).is_some() {
            break;
        }
    }

    Ok(header_len)
}
