//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Engine code never touches counter state directly; every event flows
//! through `MetricsEvent` and the active `MetricsSink`.

pub(crate) mod metrics;
pub(crate) mod sink;


// re-exports
pub use metrics::{EntityCounters, EventOps, EventReport};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
