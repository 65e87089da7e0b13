use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Initialize structured logging for the bridge. JSON output with span
/// context so concurrent invocations can be untangled by correlation id.
pub fn init_telemetry() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true),
        )
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("casebridge telemetry initialized with structured logging");
    Ok(())
}

/// Generate a correlation ID for linking the stages of one invocation
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span with common invocation attributes
pub fn create_invocation_span(
    stage: &str,
    workflow_step_execute_id: &str,
    correlation_id: &str,
) -> tracing::Span {
    tracing::info_span!(
        "workflow_invocation",
        stage = stage,
        execute.id = workflow_step_execute_id,
        correlation.id = correlation_id,
        otel.kind = "internal"
    )
}
