//! Prometheus Metrics Module
//!
//! Tool call counters and latencies in Prometheus format, rendered at
//! `/metrics` on the MCP listener.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder.
///
/// Repeated calls return the handle installed by the first one.
///
/// # Errors
///
/// Returns an error if another global recorder is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

fn register_metrics() {
    describe_counter!(
        "alpaca_mcp_tool_calls_total",
        "Total tool invocations by tool and outcome"
    );
    describe_histogram!(
        "alpaca_mcp_tool_call_seconds",
        "Tool invocation latency including the upstream request"
    );
    describe_gauge!(
        "alpaca_mcp_registered_tools",
        "Number of tools in the registry"
    );
}

/// `tool` label for calls naming no registered tool.
pub const UNKNOWN_TOOL_LABEL: &str = "unknown";

/// Outcome label for a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// Handler returned data.
    Success,
    /// Arguments failed to parse or validate.
    InvalidArguments,
    /// Alpaca returned an error or was unreachable.
    UpstreamError,
    /// No tool with the requested name.
    UnknownTool,
}

impl CallOutcome {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::InvalidArguments => "invalid_arguments",
            Self::UpstreamError => "upstream_error",
            Self::UnknownTool => "unknown_tool",
        }
    }
}

/// Record one tool call.
pub fn record_tool_call(tool: &str, outcome: CallOutcome, duration: Duration) {
    counter!(
        "alpaca_mcp_tool_calls_total",
        "tool" => tool.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
    histogram!(
        "alpaca_mcp_tool_call_seconds",
        "tool" => tool.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Update the registered tool count.
#[allow(clippy::cast_precision_loss)]
pub fn set_registered_tools(count: usize) {
    gauge!("alpaca_mcp_registered_tools").set(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels() {
        assert_eq!(CallOutcome::Success.as_str(), "success");
        assert_eq!(CallOutcome::InvalidArguments.as_str(), "invalid_arguments");
        assert_eq!(CallOutcome::UpstreamError.as_str(), "upstream_error");
        assert_eq!(CallOutcome::UnknownTool.as_str(), "unknown_tool");
    }

    #[test]
    fn recording_without_recorder_is_a_noop() {
        record_tool_call("get_clock", CallOutcome::Success, Duration::from_millis(5));
        set_registered_tools(44);
    }
}
