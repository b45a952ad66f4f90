//! Dual-namespace metric registry.
//!
//! Measurements taken in this process (`Local`) and measurements reported by
//! remote execution workers (`Remote`) are registered and queried
//! independently, even when they share a name. The registry is an explicit,
//! dependency-injected instance — it is populated once at startup and
//! read-mostly afterwards.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::handle::MetricHandle;

// ---------------------------------------------------------------------------
// MetricNamespace
// ---------------------------------------------------------------------------

/// Which side of the process boundary a metric was measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricNamespace {
    /// Measurements taken in this process.
    Local,
    /// Measurements reported by remote execution workers.
    Remote,
}

// ---------------------------------------------------------------------------
// MetricRegistry
// ---------------------------------------------------------------------------

/// Name-to-sink lookup, split into two independent namespaces.
///
/// `register` is last-write-wins; `lookup` never fails — an unregistered
/// name is `None`, which callers treat as "this metric is disabled".
#[derive(Default)]
pub struct MetricRegistry {
    local: RwLock<HashMap<String, MetricHandle>>,
    remote: RwLock<HashMap<String, MetricHandle>>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, namespace: MetricNamespace) -> &RwLock<HashMap<String, MetricHandle>> {
        match namespace {
            MetricNamespace::Local => &self.local,
            MetricNamespace::Remote => &self.remote,
        }
    }

    /// Register a sink under `name`. An existing registration for the same
    /// name in the same namespace is replaced.
    pub fn register(&self, namespace: MetricNamespace, name: impl Into<String>, handle: MetricHandle) {
        let mut map = self
            .map(namespace)
            .write()
            .unwrap_or_else(|e| e.into_inner());
        map.insert(name.into(), handle);
    }

    /// Resolve a sink by name, or `None` if nothing is registered under it.
    pub fn lookup(&self, namespace: MetricNamespace, name: &str) -> Option<MetricHandle> {
        let map = self
            .map(namespace)
            .read()
            .unwrap_or_else(|e| e.into_inner());
        map.get(name).cloned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::handle::{LogMetric, MetricType};

    use super::*;

    fn gauge(name: &str) -> MetricHandle {
        Arc::new(LogMetric::new(
            name,
            MetricType::Gauge,
            "Milliseconds",
            vec!["hostname".into()],
        ))
    }

    #[test]
    fn lookup_on_unregistered_name_returns_none() {
        let registry = MetricRegistry::new();
        assert!(registry.lookup(MetricNamespace::Local, "queue_time").is_none());
    }

    #[test]
    fn register_then_lookup() {
        let registry = MetricRegistry::new();
        registry.register(MetricNamespace::Local, "queue_time", gauge("queue_time"));

        let handle = registry
            .lookup(MetricNamespace::Local, "queue_time")
            .expect("registered metric should resolve");
        assert_eq!(handle.name(), "queue_time");
    }

    #[test]
    fn namespaces_are_independent() {
        let registry = MetricRegistry::new();
        registry.register(MetricNamespace::Local, "queue_time", gauge("queue_time"));

        assert!(registry.lookup(MetricNamespace::Remote, "queue_time").is_none());
        assert!(registry.lookup(MetricNamespace::Local, "queue_time").is_some());
    }

    #[test]
    fn last_registration_wins() {
        let registry = MetricRegistry::new();
        let first = Arc::new(LogMetric::new(
            "queue_time",
            MetricType::Counter,
            "Count",
            vec![],
        ));
        registry.register(MetricNamespace::Local, "queue_time", first);
        registry.register(MetricNamespace::Local, "queue_time", gauge("queue_time"));

        let handle = registry.lookup(MetricNamespace::Local, "queue_time").unwrap();
        assert_eq!(handle.metric_type(), MetricType::Gauge);
    }

    #[test]
    fn concurrent_lookups_do_not_corrupt_the_map() {
        let registry = Arc::new(MetricRegistry::new());
        registry.register(MetricNamespace::Local, "queue_time", gauge("queue_time"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        assert!(registry
                            .lookup(MetricNamespace::Local, "queue_time")
                            .is_some());
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
    }
}
