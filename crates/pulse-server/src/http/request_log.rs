use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

/// Wrap each request in a span and log its outcome at debug.
pub(crate) async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    let span = tracing::debug_span!("http.request", method = %method, route = %route);

    let response = next.run(request).instrument(span).await;
    tracing::debug!(
        method = %method,
        route = %route,
        status = response.status().as_u16(),
        "request handled"
    );
    response
}
