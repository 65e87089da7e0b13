pub mod client;
pub mod errors;
pub mod types;

pub use client::{SalesforceClient, SalesforceCredentials};
pub use errors::SalesforceError;
pub use types::{CaseRecord, CaseRequest};
