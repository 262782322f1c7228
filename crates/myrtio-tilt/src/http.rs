//! HTTP/1.1 response heading writer and request line parser
//!
//! Socket-independent half of the firmware HTTP server.

use core::fmt::Write;

pub type StatusCode = u16;

fn reason_phrase(code: StatusCode) -> &'static str {
    match code {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "Unknown",
    }
}

/// HTTP Content Type.
#[derive(Debug, Clone, Copy)]
pub enum ContentType {
    Json,
    TextPlain,
}

impl ContentType {
    /// Convert the content type to a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::TextPlain => "text/plain",
        }
    }
}

/// HTTP socket connection policy.
#[derive(Debug, Clone, Copy)]
enum ConnectionPolicy {
    Close,
}

impl ConnectionPolicy {
    fn as_str(self) -> &'static str {
        match self {
            ConnectionPolicy::Close => "close",
        }
    }
}

/// Something that renders itself as header lines.
pub trait TargetWriter {
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error>;
}

/// HTTP Content Headers.
#[derive(Debug, Clone, Copy)]
pub struct ContentHeaders {
    content_type: ContentType,
    content_length: Option<usize>,
}

impl ContentHeaders {
    /// Create a new content headers with a content type.
    pub const fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            content_length: None,
        }
    }

    /// Set the content length.
    #[must_use]
    pub const fn with_length(mut self, length: usize) -> Self {
        self.content_length = Some(length);
        self
    }
}

impl TargetWriter for ContentHeaders {
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error> {
        write!(writer, "Content-Type: {}\r\n", self.content_type.as_str())?;
        if let Some(content_length) = self.content_length {
            write!(writer, "Content-Length: {}\r\n", content_length)?;
        }
        Ok(())
    }
}

/// Response Headers.
#[derive(Debug, Clone, Copy)]
pub struct ResponseHeaders {
    status: StatusCode,
    connection: ConnectionPolicy,
    allow_origin: Option<&'static str>,
    content: Option<ContentHeaders>,
}

impl ResponseHeaders {
    /// Create empty response headers with a status code.
    pub const fn from_code(code: StatusCode) -> Self {
        Self {
            status: code,
            connection: ConnectionPolicy::Close,
            allow_origin: None,
            content: None,
        }
    }

    pub const fn success() -> Self {
        Self::from_code(200)
    }

    pub const fn not_found() -> Self {
        Self::from_code(404)
    }

    pub const fn method_not_allowed() -> Self {
        Self::from_code(405)
    }

    pub const fn bad_request() -> Self {
        Self::from_code(400)
    }

    /// Set the content headers.
    #[must_use]
    pub const fn with_content(mut self, content: ContentHeaders) -> Self {
        self.content = Some(content);
        self
    }

    /// Set `Access-Control-Allow-Origin`.
    #[must_use]
    pub const fn with_allow_origin(mut self, origin: &'static str) -> Self {
        self.allow_origin = Some(origin);
        self
    }
}

impl TargetWriter for ResponseHeaders {
    /// Write the response headers to a writer.
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error> {
        let reason = reason_phrase(self.status);
        write!(writer, "HTTP/1.1 {} {}\r\n", self.status, reason)?;
        if let Some(content) = &self.content {
            content.write_to(writer)?;
        }
        if let Some(origin) = self.allow_origin {
            write!(writer, "Access-Control-Allow-Origin: {}\r\n", origin)?;
        }

        write!(writer, "Connection: {}\r\n", self.connection.as_str())?;
        write!(writer, "\r\n")?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
}

impl HttpMethod {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "GET" => HttpMethod::Get,
            "HEAD" => HttpMethod::Head,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "PATCH" => HttpMethod::Patch,
            "OPTIONS" => HttpMethod::Options,
            _ => return None,
        })
    }
}

/// Parse the request line from the header string.
///
/// Returns the method and the path without its query string.
pub fn parse_request_line(header_str: &str) -> Option<(HttpMethod, &str)> {
    let first_line = header_str
        .split_once("\r\n")
        .map_or(header_str, |(line, _)| line);
    let mut parts = first_line.split_whitespace();
    let method = parts.next().and_then(HttpMethod::parse)?;
    let target = parts.next()?;
    let path = target.split_once('?').map_or(target, |(path, _)| path);

    Some((method, path))
}

/// Position right after the `\r\n\r\n` that ends the request heading.
pub fn find_heading_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

/// Allowed origin on orientation responses.
pub const ALLOW_ANY_ORIGIN: &str = "*";

/// How the responder answers a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `GET /` or `GET /orientation`
    Orientation,
    /// Another method on an orientation path
    MethodNotAllowed,
    NotFound,
    /// Request line missing, not UTF-8 or not understood
    BadRequest,
}

impl Route {
    /// Route a parsed request.
    pub fn resolve(method: HttpMethod, path: &str) -> Self {
        match (method, path) {
            (HttpMethod::Get, "/" | "/orientation") => Route::Orientation,
            (_, "/" | "/orientation") => Route::MethodNotAllowed,
            _ => Route::NotFound,
        }
    }

    /// Route a raw request heading.
    ///
    /// Only the request line is decoded, so a heading cut inside a header
    /// value still routes.
    pub fn from_heading(heading: &[u8]) -> Self {
        let line_end = heading
            .windows(2)
            .position(|w| w == b"\r\n")
            .unwrap_or(heading.len());
        let Ok(line) = core::str::from_utf8(&heading[..line_end]) else {
            return Route::BadRequest;
        };

        parse_request_line(line).map_or(Route::BadRequest, |(method, path)| {
            Route::resolve(method, path)
        })
    }

    /// Fixed plain text body, `None` for the orientation route.
    pub const fn text_body(self) -> Option<&'static str> {
        match self {
            Route::Orientation => None,
            Route::MethodNotAllowed => Some("Method Not Allowed"),
            Route::NotFound => Some("Not Found"),
            Route::BadRequest => Some("Bad Request"),
        }
    }

    /// Response heading for a body of `content_length` bytes.
    pub const fn headers(self, content_length: usize) -> ResponseHeaders {
        match self {
            Route::Orientation => ResponseHeaders::success()
                .with_content(ContentHeaders::new(ContentType::Json).with_length(content_length))
                .with_allow_origin(ALLOW_ANY_ORIGIN),
            Route::MethodNotAllowed => ResponseHeaders::method_not_allowed().with_content(
                ContentHeaders::new(ContentType::TextPlain).with_length(content_length),
            ),
            Route::NotFound => ResponseHeaders::not_found().with_content(
                ContentHeaders::new(ContentType::TextPlain).with_length(content_length),
            ),
            Route::BadRequest => ResponseHeaders::bad_request().with_content(
                ContentHeaders::new(ContentType::TextPlain).with_length(content_length),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use heapless::String;

    use super::*;

    fn render(headers: &ResponseHeaders) -> String<256> {
        let mut out = String::new();
        headers.write_to(&mut out).unwrap();
        out
    }

    #[test]
    fn orientation_response_heading() {
        let headers = ResponseHeaders::success()
            .with_content(ContentHeaders::new(ContentType::Json).with_length(26))
            .with_allow_origin("*");

        assert_eq!(
            render(&headers).as_str(),
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 26\r\n\
             Access-Control-Allow-Origin: *\r\n\
             Connection: close\r\n\
             \r\n"
        );
    }

    #[test]
    fn not_found_heading_has_no_content_headers() {
        assert_eq!(
            render(&ResponseHeaders::not_found()).as_str(),
            "HTTP/1.1 404 Not Found\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn parses_request_line() {
        let request = "GET /orientation HTTP/1.1\r\nHost: tilt\r\n\r\n";
        assert_eq!(
            parse_request_line(request),
            Some((HttpMethod::Get, "/orientation"))
        );
    }

    #[test]
    fn query_string_is_ignored() {
        assert_eq!(
            parse_request_line("GET /?t=1 HTTP/1.1"),
            Some((HttpMethod::Get, "/"))
        );
    }

    #[test]
    fn rejects_unknown_method_and_missing_path() {
        assert_eq!(parse_request_line("BREW /pot HTTP/1.1\r\n\r\n"), None);
        assert_eq!(parse_request_line("GET\r\n\r\n"), None);
    }

    #[test]
    fn finds_heading_end() {
        let buf = b"GET / HTTP/1.1\r\nHost: a\r\n\r\nbody";
        assert_eq!(find_heading_end(buf), Some(buf.len() - 4));
        assert_eq!(find_heading_end(b"GET / HTTP/1.1\r\n"), None);
    }

    #[test]
    fn both_orientation_paths_route_to_the_same_response() {
        let root = Route::from_heading(b"GET / HTTP/1.1\r\nHost: tilt\r\n\r\n");
        let named = Route::from_heading(b"GET /orientation HTTP/1.1\r\nHost: tilt\r\n\r\n");

        assert_eq!(root, Route::Orientation);
        assert_eq!(named, Route::Orientation);
        assert_eq!(render(&root.headers(24)), render(&named.headers(24)));
        assert_eq!(
            render(&root.headers(24)).as_str(),
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 24\r\n\
             Access-Control-Allow-Origin: *\r\n\
             Connection: close\r\n\
             \r\n"
        );
    }

    #[test]
    fn other_methods_on_orientation_paths_are_not_allowed() {
        assert_eq!(
            Route::resolve(HttpMethod::Post, "/orientation"),
            Route::MethodNotAllowed
        );
        assert_eq!(Route::resolve(HttpMethod::Delete, "/"), Route::MethodNotAllowed);

        let body = Route::MethodNotAllowed.text_body().unwrap();
        assert_eq!(
            render(&Route::MethodNotAllowed.headers(body.len())).as_str(),
            "HTTP/1.1 405 Method Not Allowed\r\n\
             Content-Type: text/plain\r\n\
             Content-Length: 18\r\n\
             Connection: close\r\n\
             \r\n"
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::resolve(HttpMethod::Get, "/favicon.ico"), Route::NotFound);
        assert_eq!(Route::resolve(HttpMethod::Get, "/orientation/"), Route::NotFound);
        assert_eq!(Route::NotFound.text_body(), Some("Not Found"));
        assert!(
            render(&Route::NotFound.headers(9))
                .as_str()
                .starts_with("HTTP/1.1 404 Not Found\r\n")
        );
    }

    #[test]
    fn long_paths_route_without_a_path_buffer() {
        let mut heading: String<512> = String::new();
        heading.push_str("GET /").unwrap();
        for _ in 0..100 {
            heading.push('a').unwrap();
        }
        heading.push_str(" HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(Route::from_heading(heading.as_bytes()), Route::NotFound);
    }

    #[test]
    fn heading_cut_inside_a_multibyte_header_still_routes() {
        // "é" is 0xC3 0xA9, the read buffer ended after the first byte
        let heading = b"GET /orientation HTTP/1.1\r\nX-Name: caf\xC3";

        assert_eq!(Route::from_heading(heading), Route::Orientation);
    }

    #[test]
    fn malformed_request_lines_are_bad_requests() {
        assert_eq!(Route::from_heading(b""), Route::BadRequest);
        assert_eq!(Route::from_heading(b"\xFF\xFE / HTTP/1.1\r\n\r\n"), Route::BadRequest);
        assert_eq!(Route::from_heading(b"BREW /pot HTTP/1.1\r\n\r\n"), Route::BadRequest);
        assert_eq!(Route::BadRequest.text_body(), Some("Bad Request"));
        assert!(
            render(&Route::BadRequest.headers(11))
                .as_str()
                .starts_with("HTTP/1.1 400 Bad Request\r\n")
        );
    }
}
