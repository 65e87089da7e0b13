use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::workflow::bindings::{BindingUpdate, StepOutputs};
use crate::workflow::{FormDescriptor, StepSignaler, STEP_CALLBACK_ID};

const DEFAULT_BASE_URL: &str = "https://slack.com/api";

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Slack request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Slack API returned an error: {0}")]
    Api(String),
}

/// Envelope every Slack Web API method responds with.
#[derive(Debug, Deserialize)]
struct ApiAck {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Thin client over the handful of Slack Web API methods the step needs.
#[derive(Debug, Clone)]
pub struct SlackApiClient {
    http: reqwest::Client,
    bot_token: String,
    base_url: String,
}

impl SlackApiClient {
    pub fn new(bot_token: String) -> Self {
        Self::with_base_url(bot_token, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different API host. Used by tests.
    pub fn with_base_url(bot_token: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            bot_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn call(&self, method: &str, body: Value) -> Result<(), SlackError> {
        debug!(method, "Calling Slack API");
        let ack: ApiAck = self
            .http
            .post(format!("{}/{}", self.base_url, method))
            .bearer_auth(&self.bot_token)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if ack.ok {
            Ok(())
        } else {
            Err(SlackError::Api(
                ack.error.unwrap_or_else(|| "unknown_error".to_string()),
            ))
        }
    }

    /// Open the step configuration modal with the given form.
    pub async fn open_config_view(
        &self,
        trigger_id: &str,
        form: &FormDescriptor,
    ) -> Result<(), SlackError> {
        self.call(
            "views.open",
            json!({
                "trigger_id": trigger_id,
                "view": {
                    "type": "workflow_step",
                    "callback_id": STEP_CALLBACK_ID,
                    "blocks": form.to_blocks(),
                },
            }),
        )
        .await
    }

    /// Save the collected bindings onto the workflow step.
    pub async fn update_step(
        &self,
        workflow_step_edit_id: &str,
        update: &BindingUpdate,
    ) -> Result<(), SlackError> {
        self.call(
            "workflows.updateStep",
            json!({
                "workflow_step_edit_id": workflow_step_edit_id,
                "inputs": &update.inputs,
                "outputs": &update.outputs,
            }),
        )
        .await
    }

    pub async fn step_completed(
        &self,
        workflow_step_execute_id: &str,
        outputs: &StepOutputs,
    ) -> Result<(), SlackError> {
        self.call(
            "workflows.stepCompleted",
            json!({
                "workflow_step_execute_id": workflow_step_execute_id,
                "outputs": outputs,
            }),
        )
        .await
    }

    pub async fn step_failed(
        &self,
        workflow_step_execute_id: &str,
        message: &str,
    ) -> Result<(), SlackError> {
        self.call(
            "workflows.stepFailed",
            json!({
                "workflow_step_execute_id": workflow_step_execute_id,
                "error": {"message": message},
            }),
        )
        .await
    }
}

/// Signals one invocation's terminal state back to Slack.
#[derive(Debug, Clone)]
pub struct SlackStepSignaler {
    api: SlackApiClient,
    workflow_step_execute_id: String,
}

impl SlackStepSignaler {
    pub fn new(api: SlackApiClient, workflow_step_execute_id: String) -> Self {
        Self {
            api,
            workflow_step_execute_id,
        }
    }
}

#[async_trait]
impl StepSignaler for SlackStepSignaler {
    async fn complete(&self, outputs: StepOutputs) -> anyhow::Result<()> {
        self.api
            .step_completed(&self.workflow_step_execute_id, &outputs)
            .await?;
        Ok(())
    }

    async fn fail(&self, message: String) -> anyhow::Result<()> {
        self.api
            .step_failed(&self.workflow_step_execute_id, &message)
            .await?;
        Ok(())
    }
}
