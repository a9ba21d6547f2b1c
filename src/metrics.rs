//! Prometheus metrics & middleware helper.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use once_cell::sync::Lazy;
use prometheus::{IntCounterVec, Opts, Registry};

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Submissions by outcome (`settled`, `awaiting_victor` or an error kind).
pub static LADDER_SUBMISSIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new("ladder_submissions_total", "Ladder result submissions by outcome"),
        &["outcome"],
    )
    .expect("ladder_submissions_total opts");
    REGISTRY
        .register(Box::new(counter.clone()))
        .expect("register ladder_submissions_total");
    counter
});

/// HTTP middleware sharing the ladder registry; serves `/metrics`.
pub static METRICS: Lazy<PrometheusMetrics> = Lazy::new(|| {
    Lazy::force(&LADDER_SUBMISSIONS);
    PrometheusMetricsBuilder::new("api")
        .registry(REGISTRY.clone())
        .endpoint("/metrics")
        .build()
        .expect("metrics builder")
});

pub fn record_submission(outcome: &str) {
    LADDER_SUBMISSIONS.with_label_values(&[outcome]).inc();
}
