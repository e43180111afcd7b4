use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderName, HeaderValue, StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, error, info, info_span, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Coarse outcome recorded with every request.
fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "server_error"
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        "denied"
    } else if status.is_client_error() {
        "rejected"
    } else {
        "ok"
    }
}

/// Logs one line per request inside an `http_request` span, so handler and
/// service events carry the same `request_id`. The id is echoed back in
/// `x-request-id`.
///
/// Device controllers poll without a token; `bearer` tells them apart from
/// app traffic.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let bearer = req.headers().contains_key(header::AUTHORIZATION);
    let request_id = uuid::Uuid::new_v4().simple().to_string();

    let span = info_span!(
        "http_request",
        request_id = %request_id,
        method = %req.method(),
        route = %route,
        bearer,
    );

    let mut response = next.run(req).instrument(span.clone()).await;
    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let _entered = span.enter();
    let outcome = outcome(status);
    match outcome {
        "server_error" => error!(status = status.as_u16(), latency_ms, outcome, "Request failed"),
        "denied" | "rejected" => {
            warn!(status = status.as_u16(), latency_ms, outcome, "Request rejected")
        }
        _ => info!(status = status.as_u16(), latency_ms, outcome, "Request served"),
    }

    response
}

/// Installs the global subscriber: a compact console layer filtered by
/// `RUST_LOG` (or `LOG_LEVEL`), an error log file and a daily-rolling JSON log.
///
/// Keep the returned guards alive for the lifetime of the process so buffered
/// file output is flushed.
pub fn init_tracing() -> anyhow::Result<Vec<WorkerGuard>> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;

    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "storage/logs".to_string());
    std::fs::create_dir_all(&log_dir)?;

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={level},aristokrat_db={level},tower_http=warn,sqlx=warn,axum::rejection=trace",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let (error_writer, error_guard) = tracing_appender::non_blocking(RollingFileAppender::new(
        Rotation::DAILY,
        &log_dir,
        "aristokrat.log",
    ));
    let file_layer = fmt::layer()
        .with_writer(error_writer)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    // Structured logs for log shippers
    let (json_writer, json_guard) = tracing_appender::non_blocking(RollingFileAppender::new(
        Rotation::DAILY,
        &log_dir,
        "aristokrat.json",
    ));
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_writer)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()?;

    Ok(vec![error_guard, json_guard])
}
