use async_trait::async_trait;
use tracing::{error, info};

use crate::salesforce::{CaseRecord, CaseRequest, SalesforceClient, SalesforceError};

/// Trait for case creation to enable testing with fakes at the execute seam.
#[async_trait]
pub trait CaseCreator: Send + Sync {
    async fn create_case(&self, request: &CaseRequest) -> Result<CaseRecord, SalesforceError>;
}

#[async_trait]
impl CaseCreator for SalesforceClient {
    async fn create_case(&self, request: &CaseRequest) -> Result<CaseRecord, SalesforceError> {
        SalesforceClient::create_case(self, request).await
    }
}

/// Create a Salesforce case from the three collected fields.
///
/// Pass-through by design: no validation or trimming of any field. In
/// particular `priority` is forwarded verbatim even though the form hints at
/// High/Medium/Low; Salesforce is the sole validator. Errors propagate
/// unchanged to the caller.
pub async fn create_case<C: CaseCreator + ?Sized>(
    client: &C,
    subject: &str,
    description: &str,
    priority: &str,
) -> Result<CaseRecord, SalesforceError> {
    let request = CaseRequest {
        subject: subject.to_string(),
        description: description.to_string(),
        priority: priority.to_string(),
    };

    match client.create_case(&request).await {
        Ok(record) => {
            info!(case_id = %record.id, subject = %request.subject, "Case created successfully");
            Ok(record)
        }
        Err(e) => {
            error!(subject = %request.subject, error = %e, "Failed to create Salesforce case");
            Err(e)
        }
    }
}
