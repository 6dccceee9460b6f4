use crate::interface_adapters::handlers::alert::receive_alert;
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    extract::{ConnectInfo, Request},
    middleware::{self, Next},
    response::Response,
    routing::post,
};
use std::net::SocketAddr;
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    // Wire the HTTP routes to their handlers.
    Router::new()
        .route("/alert", post(receive_alert))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

// Peer address is only present when served with connect info.
async fn log_request(request: Request, next: Next) -> Response {
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    tracing::debug!(
        method = %request.method(),
        uri = %request.uri(),
        remote = ?remote,
        "request"
    );
    next.run(request).await
}
