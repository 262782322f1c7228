use crate::{
    core::net::http::{HttpConnection, HttpHandler, HttpResult, Route},
    domain::ports::OrientationSource,
};
use myrtio_tilt::OrientationSnapshot;

/// Controller bound to the firmware's shared snapshot
pub type OrientationController = OrientationHttpController<OrientationSnapshot>;

/// Serves the latest orientation on `/` and `/orientation`.
pub struct OrientationHttpController<S: OrientationSource + 'static> {
    source: &'static S,
}

impl<S: OrientationSource + 'static> OrientationHttpController<S> {
    pub const fn new(source: &'static S) -> Self {
        Self { source }
    }
}

impl<S: OrientationSource + 'static> HttpHandler for OrientationHttpController<S> {
    async fn handle_request(&self, conn: HttpConnection<'_>) -> HttpResult {
        let mut conn = conn;
        let route = conn.route();

        match route.text_body() {
            None => {
                let body = self.source.orientation_body();
                conn.write_response(&route.headers(body.len()), body.as_bytes())
                    .await
            }
            Some(text) => {
                conn.write_response(&route.headers(text.len()), text.as_bytes())
                    .await
            }
        }
    }
}
