use anyhow::Context;
use tracing::{debug, info};

use crate::cases::{self, CaseCreator};
use crate::salesforce::CaseRecord;

const TEST_SUBJECT: &str = "Test Subject";
const TEST_DESCRIPTION: &str = "This is a test description for the case.";
const TEST_PRIORITY: &str = "High";

/// One-shot check of the case creation path with fixed literal inputs.
/// Failure propagates to the caller so the process exits non-zero.
pub async fn run_self_test<C: CaseCreator + ?Sized>(client: &C) -> anyhow::Result<CaseRecord> {
    let record = cases::create_case(client, TEST_SUBJECT, TEST_DESCRIPTION, TEST_PRIORITY)
        .await
        .context("Self-test failed")?;

    info!(case_id = %record.id, "Self-test successful: created Case ID={}", record.id);
    debug!(?record, "Full self-test response");
    Ok(record)
}
