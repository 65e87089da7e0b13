use serde::Deserialize;

use crate::workflow::bindings::StepInputs;
use crate::workflow::ViewState;

/// Form-encoded wrapper Slack uses for interactivity posts: a single
/// `payload` field carrying JSON.
#[derive(Debug, Deserialize)]
pub struct InteractivityForm {
    pub payload: String,
}

/// Interactivity payloads this step consumes, discriminated by `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum InteractivityPayload {
    /// User opened the step in Workflow Builder: the Configuring trigger.
    #[serde(rename = "workflow_step_edit")]
    WorkflowStepEdit {
        trigger_id: String,
        #[serde(default)]
        callback_id: Option<String>,
    },
    /// User submitted the configuration form: the Collecting trigger.
    #[serde(rename = "view_submission")]
    ViewSubmission {
        view: SubmittedView,
        workflow_step: WorkflowStepEdit,
    },
}

#[derive(Debug, Deserialize)]
pub struct SubmittedView {
    #[serde(rename = "type")]
    pub kind: String,
    pub state: ViewState,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowStepEdit {
    pub workflow_step_edit_id: String,
}

/// Top-level Events API payloads: the URL handshake plus event callbacks.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum EventPayload {
    #[serde(rename = "url_verification")]
    UrlVerification { challenge: String },
    #[serde(rename = "event_callback")]
    EventCallback { event: WorkflowEvent },
}

/// The `workflow_step_execute` event: the Executing trigger, carrying the
/// inputs bound at collect time.
#[derive(Debug, Deserialize)]
pub struct WorkflowEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub callback_id: Option<String>,
    pub workflow_step: WorkflowStepExecute,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowStepExecute {
    pub workflow_step_execute_id: String,
    pub inputs: StepInputs,
}
