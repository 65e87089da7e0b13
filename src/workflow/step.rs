use async_trait::async_trait;
use tracing::{info, warn};

use crate::cases::{self, CaseCreator};

use super::bindings::{BindingUpdate, ExtractionError, StepInputs, StepOutputs, ViewState};
use super::form::FormDescriptor;

/// Callback id under which the host routes invocations of this step.
pub const STEP_CALLBACK_ID: &str = "update_salesforce_case_step";

/// Host-runtime seam for terminating an invocation. Exactly one of the two
/// methods is called per execute, never both.
#[async_trait]
pub trait StepSignaler: Send + Sync {
    async fn complete(&self, outputs: StepOutputs) -> anyhow::Result<()>;
    async fn fail(&self, message: String) -> anyhow::Result<()>;
}

/// Configuring stage: emit the fixed three-field form descriptor.
pub fn configure() -> FormDescriptor {
    FormDescriptor::case_form()
}

/// Collecting stage: bind the submitted values as declared inputs, literal
/// and untransformed, with zero declared outputs.
///
/// A missing field identifier is an `ExtractionError` and aborts the
/// invocation; the caller must not proceed to the executing stage.
pub fn collect(state: &ViewState) -> Result<BindingUpdate, ExtractionError> {
    let inputs = StepInputs::from_view_state(state)?;
    Ok(BindingUpdate {
        inputs,
        outputs: Vec::new(),
    })
}

/// Executing stage: create the case and terminate the invocation.
///
/// The Salesforce client arrives as an explicit parameter rather than
/// ambient state, and the adapter's typed result decides completion vs
/// failure signaling. The failure message is the error's display text,
/// rendered to the end user by the host platform. Terminal either way; no
/// retry path.
pub async fn execute<C, S>(inputs: &StepInputs, client: &C, signaler: &S) -> anyhow::Result<()>
where
    C: CaseCreator + ?Sized,
    S: StepSignaler + ?Sized,
{
    let result = cases::create_case(
        client,
        &inputs.case_subject.value,
        &inputs.case_description.value,
        &inputs.case_priority.value,
    )
    .await;

    match result {
        Ok(record) => {
            info!(case_id = %record.id, "Invocation completed");
            signaler.complete(StepOutputs { case_id: record.id }).await
        }
        Err(e) => {
            warn!(error = %e, "Invocation failed");
            signaler.fail(e.to_string()).await
        }
    }
}
