use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("rpchat.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("rpchat.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("rpchat.client.request_duration_seconds");

pub(crate) static WIDGET_SUBMITS: Counter = Counter::new("rpchat.widget.submits");
pub(crate) static WIDGET_IGNORED: Counter = Counter::new("rpchat.widget.ignored");
pub(crate) static WIDGET_BUSY: Counter = Counter::new("rpchat.widget.busy");
pub(crate) static WIDGET_FAILED: Counter = Counter::new("rpchat.widget.failed");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&WIDGET_SUBMITS);
    collector.register_counter(&WIDGET_IGNORED);
    collector.register_counter(&WIDGET_BUSY);
    collector.register_counter(&WIDGET_FAILED);
}
