// src/telemetry.rs
//! Logging and metrics bootstrap.

use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG_FORMAT: &str = "ANALYZER_LOG_FORMAT";
const DEFAULT_FILTER: &str = "yt_comment_analyzer=info,warn";

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter;
/// `ANALYZER_LOG_FORMAT=json` switches to JSON lines. Later calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var(ENV_LOG_FORMAT)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let res = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    };
    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// One-time metrics registration (so series show up on scrape).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "comments_fetched_total",
            "Comments returned by the provider after owner exclusion."
        );
        describe_counter!(
            "comments_owner_skipped_total",
            "Comments skipped because the video owner wrote them."
        );
        describe_counter!("comments_kept_total", "Comments kept by the relevance filter.");
        describe_counter!(
            "comments_rejected_total",
            "Comments rejected by the relevance filter, by reason."
        );
        describe_counter!("provider_errors_total", "Comment provider call failures.");
        describe_histogram!("fetch_page_ms", "Provider page fetch time in milliseconds.");
        describe_counter!("analysis_runs_total", "Completed video analyses.");
        describe_gauge!("analysis_last_run_ts", "Unix ts of the last completed analysis.");
    });
}

/// Install a Prometheus recorder and return its handle for rendering.
pub fn install_prometheus() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;
    ensure_metrics_described();
    Ok(handle)
}
