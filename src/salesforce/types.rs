use serde::{Deserialize, Serialize};

/// One case to be created, assembled per invocation and discarded afterwards.
#[derive(Debug, Clone)]
pub struct CaseRequest {
    pub subject: String,
    pub description: String,
    pub priority: String,
}

/// The created record, as returned by the remote create call.
/// Only the generated identifier is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    pub id: String,
}

/// Wire shape of the `sobjects/Case` create body. Status is always "New".
#[derive(Debug, Serialize)]
pub struct CaseCreateBody<'a> {
    #[serde(rename = "Subject")]
    pub subject: &'a str,
    #[serde(rename = "Description")]
    pub description: &'a str,
    #[serde(rename = "Priority")]
    pub priority: &'a str,
    #[serde(rename = "Status")]
    pub status: &'a str,
}

/// Successful create response from the REST API.
#[derive(Debug, Deserialize)]
pub struct CaseCreateResponse {
    pub id: String,
    #[serde(default)]
    pub success: bool,
}

/// Element of the error array Salesforce returns on rejection.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "errorCode", default)]
    pub error_code: String,
    #[serde(default)]
    pub message: String,
}
