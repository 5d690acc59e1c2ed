use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Domain events dispatched (by kind) and handler failures
// - Repository operations (count and latency, by repository and operation)
//
// Components take an optional Arc<Metrics>; nothing is recorded without one.
// ============================================================================

/// Central metrics registry for the application
pub struct Metrics {
    registry: Registry,

    // Event Dispatch Metrics
    pub events_dispatched: IntCounterVec,
    pub handler_invocations: IntCounterVec,
    pub handler_failures: IntCounterVec,

    // Repository Metrics
    pub repository_operations: IntCounterVec,
    pub repository_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        // Event Dispatch Metrics
        let events_dispatched = IntCounterVec::new(
            Opts::new("events_dispatched_total", "Domain events fully dispatched to their handlers"),
            &["event_kind"],
        )?;
        registry.register(Box::new(events_dispatched.clone()))?;

        let handler_invocations = IntCounterVec::new(
            Opts::new("event_handler_invocations_total", "Successful handler invocations"),
            &["event_kind"],
        )?;
        registry.register(Box::new(handler_invocations.clone()))?;

        let handler_failures = IntCounterVec::new(
            Opts::new("event_handler_failures_total", "Handler invocations that returned an error"),
            &["event_kind", "handler"],
        )?;
        registry.register(Box::new(handler_failures.clone()))?;

        // Repository Metrics
        let repository_operations = IntCounterVec::new(
            Opts::new("repository_operations_total", "Repository operations by outcome"),
            &["repository", "operation", "outcome"],
        )?;
        registry.register(Box::new(repository_operations.clone()))?;

        let repository_duration = HistogramVec::new(
            HistogramOpts::new("repository_operation_duration_seconds", "Repository operation duration")
                .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
            &["repository", "operation"],
        )?;
        registry.register(Box::new(repository_duration.clone()))?;

        Ok(Self {
            registry,
            events_dispatched,
            handler_invocations,
            handler_failures,
            repository_operations,
            repository_duration,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record a completed dispatch
    pub fn record_event_dispatched(&self, event_kind: &str, handler_count: usize) {
        self.events_dispatched.with_label_values(&[event_kind]).inc();
        self.handler_invocations
            .with_label_values(&[event_kind])
            .inc_by(handler_count as u64);
    }

    pub fn record_handler_failure(&self, event_kind: &str, handler: &str) {
        self.handler_failures.with_label_values(&[event_kind, handler]).inc();
    }

    /// Helper to record a repository call
    pub fn record_repository_operation(
        &self,
        repository: &str,
        operation: &str,
        duration_secs: f64,
        success: bool,
    ) {
        let outcome = if success { "ok" } else { "error" };
        self.repository_operations
            .with_label_values(&[repository, operation, outcome])
            .inc();
        self.repository_duration
            .with_label_values(&[repository, operation])
            .observe(duration_secs);
    }

    /// Encode everything in the Prometheus text exposition format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        metrics.record_event_dispatched("CustomerCreated", 2);
        assert!(!metrics.registry.gather().is_empty());
    }

    #[test]
    fn test_record_event_dispatched() {
        let metrics = Metrics::new().unwrap();
        metrics.record_event_dispatched("CustomerCreated", 2);
        metrics.record_event_dispatched("CustomerCreated", 2);

        let gathered = metrics.registry.gather();
        let dispatched = gathered.iter().find(|m| m.name() == "events_dispatched_total").unwrap();
        assert_eq!(dispatched.metric[0].counter.value, Some(2.0));
        let invocations = gathered
            .iter()
            .find(|m| m.name() == "event_handler_invocations_total")
            .unwrap();
        assert_eq!(invocations.metric[0].counter.value, Some(4.0));
    }

    #[test]
    fn test_record_repository_operation() {
        let metrics = Metrics::new().unwrap();
        metrics.record_repository_operation("order", "find", 0.002, true);
        metrics.record_repository_operation("order", "find", 0.001, false);

        let gathered = metrics.registry.gather();
        let ops = gathered.iter().find(|m| m.name() == "repository_operations_total").unwrap();
        assert_eq!(ops.metric.len(), 2); // ok + error outcomes
    }

    #[test]
    fn test_render_text_format() {
        let metrics = Metrics::new().unwrap();
        metrics.record_handler_failure("ProductCreated", "mailer");

        let text = metrics.render().unwrap();
        assert!(text.contains("event_handler_failures_total"));
        assert!(text.contains("handler=\"mailer\""));
    }
}
