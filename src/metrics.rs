//! Prometheus metrics collection for chatroomd.
//!
//! Metrics live in a process-global registry and every recording helper is a
//! no-op until [`init`] has run, so unit tests and metric-less deployments pay
//! nothing.
//!
//! - `chat_connected_sessions` - Sessions currently in the registry
//! - `chat_connections_total{result}` - Accepted vs rejected connections
//! - `chat_deliveries_total{result}` - Per-recipient delivery outcomes
//! - `chat_command_total{command}` / `chat_command_duration_seconds{command}`
//! - `chat_command_errors_total{command,error}`
//! - `chat_broadcast_fanout` - Recipients per broadcast

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Sessions currently admitted.
pub static CONNECTED_SESSIONS: OnceLock<IntGauge> = OnceLock::new();

/// Connection admission outcomes (accepted / rejected).
pub static CONNECTIONS: OnceLock<IntCounterVec> = OnceLock::new();

/// Per-recipient delivery outcomes (delivered / mailbox_full / closed).
pub static DELIVERIES: OnceLock<IntCounterVec> = OnceLock::new();

/// Commands processed by name.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Command processing latency by name.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Command errors by name and error kind.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Broadcast fan-out histogram: recipients reached per broadcast.
pub static BROADCAST_FANOUT: OnceLock<Histogram> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Must be called once at server startup before metrics are scraped.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            match $init {
                Ok(m) => {
                    if let Err(e) = r.register(Box::new(m.clone())) {
                        tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                    }
                    let _ = $metric.set(m);
                }
                Err(e) => {
                    tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                }
            }
        };
    }

    register!(CONNECTED_SESSIONS, IntGauge::new("chat_connected_sessions", "Sessions currently connected"));
    register!(CONNECTIONS, IntCounterVec::new(Opts::new("chat_connections_total", "Connection admission outcomes"), &["result"]));
    register!(DELIVERIES, IntCounterVec::new(Opts::new("chat_deliveries_total", "Per-recipient delivery outcomes"), &["result"]));
    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("chat_command_total", "Commands processed by name"), &["command"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("chat_command_duration_seconds", "Command latency by name")
            .buckets(vec![0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]),
        &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("chat_command_errors_total", "Command errors by name"), &["command", "error"]));
    register!(BROADCAST_FANOUT, Histogram::with_opts(
        HistogramOpts::new("chat_broadcast_fanout", "Recipients per broadcast")
            .buckets(vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0])));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

/// Record a session entering the registry.
#[inline]
pub fn session_joined() {
    if let Some(g) = CONNECTED_SESSIONS.get() {
        g.inc();
    }
}

/// Record a session leaving the registry.
#[inline]
pub fn session_left() {
    if let Some(g) = CONNECTED_SESSIONS.get() {
        g.dec();
    }
}

/// Record a connection admission outcome.
#[inline]
pub fn record_connection(result: &str) {
    if let Some(c) = CONNECTIONS.get() {
        c.with_label_values(&[result]).inc();
    }
}

/// Record a single delivery outcome.
#[inline]
pub fn record_delivery(result: &str) {
    if let Some(c) = DELIVERIES.get() {
        c.with_label_values(&[result]).inc();
    }
}

/// Record a command execution with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a command error.
#[inline]
pub fn record_command_error(command: &str, error: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, error]).inc();
    }
}

/// Record broadcast fan-out (how many recipients a broadcast reached).
#[inline]
pub fn record_fanout(recipients: usize) {
    if let Some(h) = BROADCAST_FANOUT.get() {
        h.observe(recipients as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_lifecycle() {
        init();

        record_command("ping", 0.001);
        record_connection("accepted");
        record_delivery("delivered");

        let output = gather_metrics();
        assert!(output.contains("chat_command_total"));
        assert!(output.contains("chat_connections_total"));
    }
}
