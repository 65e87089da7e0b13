use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Form, Json, Router};
use serde_json::Value;
use tracing::{error, info, warn, Instrument};

use crate::cases::CaseCreator;
use crate::telemetry::{create_invocation_span, generate_correlation_id};
use crate::workflow::{self, STEP_CALLBACK_ID};

use super::api::{SlackApiClient, SlackStepSignaler};
use super::events::{EventPayload, InteractivityForm, InteractivityPayload};

/// Shared per-process state. The Salesforce client is constructed once at
/// startup and reused read-only across concurrent invocations; per-invocation
/// state lives entirely in the request payloads.
#[derive(Clone)]
pub struct AppState {
    pub creator: Arc<dyn CaseCreator>,
    pub slack: SlackApiClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/slack/events", post(handle_event))
        .route("/slack/interactivity", post(handle_interactivity))
        .with_state(state)
}

pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "Listening for Slack callbacks");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Events API intake. The immediate 200 is the acknowledgment; execute work
/// is spawned so the ack never waits on the remote call.
async fn handle_event(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let payload: EventPayload = match serde_json::from_value(body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Ignoring unrecognized event payload");
            return StatusCode::OK.into_response();
        }
    };

    match payload {
        EventPayload::UrlVerification { challenge } => challenge.into_response(),
        EventPayload::EventCallback { event } => {
            if event.kind != "workflow_step_execute" {
                return StatusCode::OK.into_response();
            }
            if !matches!(event.callback_id.as_deref(), None | Some(STEP_CALLBACK_ID)) {
                return StatusCode::OK.into_response();
            }

            let correlation_id = generate_correlation_id();
            let span = create_invocation_span(
                "execute",
                &event.workflow_step.workflow_step_execute_id,
                &correlation_id,
            );
            let signaler = SlackStepSignaler::new(
                state.slack.clone(),
                event.workflow_step.workflow_step_execute_id,
            );
            let creator = state.creator.clone();
            let inputs = event.workflow_step.inputs;

            tokio::spawn(
                async move {
                    if let Err(e) =
                        workflow::execute(&inputs, creator.as_ref(), &signaler).await
                    {
                        error!(error = %e, "Failed to signal invocation result to Slack");
                    }
                }
                .instrument(span),
            );

            StatusCode::OK.into_response()
        }
    }
}

/// Interactivity intake: the configure and collect triggers.
async fn handle_interactivity(
    State(state): State<AppState>,
    Form(form): Form<InteractivityForm>,
) -> Response {
    let payload: InteractivityPayload = match serde_json::from_str(&form.payload) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Ignoring unrecognized interactivity payload");
            return StatusCode::OK.into_response();
        }
    };

    match payload {
        InteractivityPayload::WorkflowStepEdit {
            trigger_id,
            callback_id,
        } => {
            if !matches!(callback_id.as_deref(), None | Some(STEP_CALLBACK_ID)) {
                return StatusCode::OK.into_response();
            }

            let slack = state.slack.clone();
            let descriptor = workflow::configure();
            tokio::spawn(async move {
                if let Err(e) = slack.open_config_view(&trigger_id, &descriptor).await {
                    error!(error = %e, "Failed to open configuration view");
                }
            });

            StatusCode::OK.into_response()
        }
        InteractivityPayload::ViewSubmission {
            view,
            workflow_step,
        } => {
            if view.kind != "workflow_step" {
                return StatusCode::OK.into_response();
            }

            // Extraction failures are not caught: the invocation aborts here
            // and the bindings are never written, so execution cannot follow.
            let update = match workflow::collect(&view.state) {
                Ok(update) => update,
                Err(e) => {
                    error!(error = %e, "Form submission violated the step contract");
                    return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
                }
            };

            let slack = state.slack.clone();
            tokio::spawn(async move {
                if let Err(e) = slack
                    .update_step(&workflow_step.workflow_step_edit_id, &update)
                    .await
                {
                    error!(error = %e, "Failed to save step bindings");
                }
            });

            StatusCode::OK.into_response()
        }
    }
}
