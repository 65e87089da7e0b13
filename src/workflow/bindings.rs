use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::form::FormDescriptor;

/// Raised when a submitted form is missing one of the fixed field
/// identifiers. Deliberately not caught anywhere in this crate: a submission
/// that violates the form contract aborts the invocation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("submission is missing block `{0}`")]
    MissingBlock(&'static str),
    #[error("submission is missing action `{1}` in block `{0}`")]
    MissingAction(&'static str, &'static str),
    #[error("submission has no value for `{0}`")]
    MissingValue(&'static str),
}

/// The `state` payload of a view submission: block id → action id → value.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewState {
    pub values: HashMap<String, HashMap<String, ViewValue>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewValue {
    pub value: Option<String>,
}

/// One declared input binding, `{"value": "..."}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBinding {
    pub value: String,
}

/// The step's declared inputs, keyed by the fixed binding names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInputs {
    pub case_subject: InputBinding,
    pub case_description: InputBinding,
    pub case_priority: InputBinding,
}

/// Output declaration shape for `workflows.updateStep`. The collect stage
/// always declares zero of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDeclaration {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: &'static str,
}

/// Inputs and output declarations bound by the collect stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingUpdate {
    pub inputs: StepInputs,
    pub outputs: Vec<OutputDeclaration>,
}

/// Outputs attached to a completed invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutputs {
    pub case_id: String,
}

impl StepInputs {
    /// Extract the three fixed fields from a view submission, literally as
    /// entered. No transformation, no validation, no trimming.
    pub fn from_view_state(state: &ViewState) -> Result<Self, ExtractionError> {
        let form = FormDescriptor::case_form();
        let [subject, description, priority] = &form.fields;

        let extract = |field: &super::form::FormField| -> Result<InputBinding, ExtractionError> {
            let block = state
                .values
                .get(field.block_id)
                .ok_or(ExtractionError::MissingBlock(field.block_id))?;
            let entry = block
                .get(field.action_id)
                .ok_or(ExtractionError::MissingAction(field.block_id, field.action_id))?;
            let value = entry
                .value
                .clone()
                .ok_or(ExtractionError::MissingValue(field.binding))?;
            Ok(InputBinding { value })
        };

        Ok(Self {
            case_subject: extract(subject)?,
            case_description: extract(description)?,
            case_priority: extract(priority)?,
        })
    }
}
