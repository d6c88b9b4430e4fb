//! HTTP request metrics middleware

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

/// Counter of handled requests, labelled `method`, `path`, `status`.
pub const REQUESTS_TOTAL: &str = "clinic_http_requests_total";
/// Latency histogram in seconds, labelled `method`, `path`.
pub const REQUEST_DURATION: &str = "clinic_http_request_duration_seconds";

/// Route template (`/api/v1/clinic-rooms/{id}`) when the request matched a
/// route, the raw path otherwise. Templates keep ids out of the labels.
fn route_label<B>(request: &Request<B>) -> String {
    match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => request.uri().path().to_owned(),
    }
}

/// Record count and latency for every routed request.
pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().as_str().to_owned();
    let path = route_label(&request);

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed = started.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();
    metrics::counter!(
        REQUESTS_TOTAL,
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!(REQUEST_DURATION, "method" => method, "path" => path).record(elapsed);

    response
}
