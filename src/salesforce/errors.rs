#[derive(Debug)]
pub enum SalesforceError {
    AuthenticationFailed(String),
    Http(reqwest::Error),
    Rejected { status: u16, message: String },
    MalformedResponse(String),
}

impl From<reqwest::Error> for SalesforceError {
    fn from(err: reqwest::Error) -> Self {
        SalesforceError::Http(err)
    }
}

impl std::fmt::Display for SalesforceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SalesforceError::AuthenticationFailed(msg) => {
                writeln!(f, "Salesforce Authentication Error")?;
                writeln!(f, "───────────────────────────────")?;
                write!(f, "🔑 {msg}\n\n")?;
                writeln!(f, "🔧 QUICK FIXES:")?;
                writeln!(f, "   → Check SALESFORCE_USERNAME and SALESFORCE_PASSWORD")?;
                writeln!(f, "   → Reset your security token: Setup → My Personal Information → Reset Security Token")?;
                write!(f, "   → Verify the login URL (production vs sandbox: test.salesforce.com)")
            }
            SalesforceError::Http(err) => {
                write!(f, "Salesforce request failed: {err}")
            }
            SalesforceError::Rejected { status, message } => {
                write!(f, "Salesforce rejected the request (HTTP {status}): {message}")
            }
            SalesforceError::MalformedResponse(msg) => {
                write!(f, "Unexpected Salesforce response: {msg}")
            }
        }
    }
}

impl std::error::Error for SalesforceError {}
