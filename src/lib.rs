// casebridge - Slack workflow step that files Salesforce cases
// This exposes the core components for testing and integration

pub mod cases;
pub mod config;
pub mod salesforce;
pub mod selftest;
pub mod slack;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use cases::{create_case, CaseCreator};
pub use config::CasebridgeConfig;
pub use salesforce::{CaseRecord, CaseRequest, SalesforceClient, SalesforceCredentials, SalesforceError};
pub use selftest::run_self_test;
pub use slack::{AppState, SlackApiClient, SlackError, SlackStepSignaler};
pub use telemetry::{create_invocation_span, generate_correlation_id, init_telemetry};
pub use workflow::{ExtractionError, FormDescriptor, StepInputs, StepOutputs, StepSignaler, STEP_CALLBACK_ID};
