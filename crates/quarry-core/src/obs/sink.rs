//! Metrics sink boundary.
//!
//! Query and predicate code MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between engine logic and the
//! per-thread metrics state.
use crate::obs::metrics;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    PredicateBuilt {
        parameters: u64,
        depth: u64,
    },
    QueryBuilt {
        entity_path: &'static str,
    },
    QueryRejected {
        entity_path: &'static str,
    },
    DnfNormalized {
        parameters: u64,
        clauses: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the per-thread metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::PredicateBuilt { .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.predicates_built = m.ops.predicates_built.saturating_add(1);
                });
            }

            MetricsEvent::QueryBuilt { entity_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.queries_built = m.ops.queries_built.saturating_add(1);
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.queries_built = entry.queries_built.saturating_add(1);
                });
            }

            MetricsEvent::QueryRejected { entity_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.queries_rejected = m.ops.queries_rejected.saturating_add(1);
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.queries_rejected = entry.queries_rejected.saturating_add(1);
                });
            }

            MetricsEvent::DnfNormalized { clauses, .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.dnf_normalizations = m.ops.dnf_normalizations.saturating_add(1);
                    m.ops.dnf_clauses_total = m.ops.dnf_clauses_total.saturating_add(clauses);
                    m.ops.dnf_clauses_max = m.ops.dnf_clauses_max.max(clauses);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset the current thread's metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
