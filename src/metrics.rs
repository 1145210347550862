use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};
use std::sync::LazyLock;

pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// Relay counters
pub static RELAYED_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "gateway_relayed_total",
            "Requests relayed to the provider by operation and upstream status",
        ),
        &["path", "status"],
    )
    .unwrap()
});

pub static REJECTED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "gateway_rejected_total",
        "Requests rejected by business-rule validation",
    )
    .unwrap()
});

pub static UNAUTHORIZED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "gateway_unauthorized_total",
        "Mutating requests rejected by the admin-key gate",
    )
    .unwrap()
});

pub static UPSTREAM_FAILURES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "gateway_upstream_failures_total",
        "Outbound calls that failed at the transport level",
    )
    .unwrap()
});

pub static UPSTREAM_LATENCY: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "gateway_upstream_latency_seconds",
            "Outbound provider call latency",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
    )
    .unwrap()
});

/// Register all metrics with the registry
pub fn register_metrics() {
    REGISTRY.register(Box::new(RELAYED_TOTAL.clone())).unwrap();
    REGISTRY.register(Box::new(REJECTED_TOTAL.clone())).unwrap();
    REGISTRY
        .register(Box::new(UNAUTHORIZED_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(UPSTREAM_FAILURES.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(UPSTREAM_LATENCY.clone()))
        .unwrap();
}
