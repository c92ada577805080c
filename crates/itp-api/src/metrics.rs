//! Prometheus recorder for the `metrics` facade.
//!
//! Counters:
//! - `itp_interactions_total{outcome}`: one per submitted claim.
//! - `itp_order_verifications_total{result}`: one per order-status call.
//!
//! Without an installed recorder the counters are no-ops.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the global recorder and describe the service's counters.
///
/// Call at most once per process.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    metrics::describe_counter!(
        "itp_interactions_total",
        "Interaction claims processed, by terminal outcome"
    );
    metrics::describe_counter!(
        "itp_order_verifications_total",
        "Order-status authority calls, by result"
    );
    Ok(handle)
}
