//! `/metrics` scrape endpoint plus the middleware feeding it

pub mod handlers;
pub mod middleware;

pub use handlers::{prometheus_metrics, MetricsState};
pub use middleware::{http_metrics_middleware, REQUESTS_TOTAL, REQUEST_DURATION};
