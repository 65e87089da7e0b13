use regex::Regex;
use reqwest::Url;
use tracing::{debug, info};

use super::errors::SalesforceError;
use super::types::{ApiErrorBody, CaseCreateBody, CaseCreateResponse, CaseRecord, CaseRequest};

const API_VERSION: &str = "v60.0";
const CASE_STATUS_NEW: &str = "New";

/// Credentials for the SOAP username/password login flow.
#[derive(Debug, Clone)]
pub struct SalesforceCredentials {
    pub username: String,
    pub password: String,
    pub security_token: String,
    /// Login host, e.g. `https://login.salesforce.com` (or `https://test.salesforce.com` for sandboxes).
    pub login_url: String,
}

/// Thin client over the Salesforce REST API, authenticated once at startup.
///
/// The session is established by `login` and never refreshed; an expired
/// session surfaces as a rejected create call. The client is immutable after
/// construction and safe to share across concurrent invocations.
#[derive(Debug)]
pub struct SalesforceClient {
    http: reqwest::Client,
    instance_url: String,
    session_id: String,
}

impl SalesforceClient {
    /// Authenticate with the SOAP partner login endpoint and capture the
    /// session id and instance URL from the response envelope.
    pub async fn login(credentials: &SalesforceCredentials) -> Result<Self, SalesforceError> {
        let http = reqwest::Client::new();
        let endpoint = format!(
            "{}/services/Soap/u/{}",
            credentials.login_url.trim_end_matches('/'),
            API_VERSION.trim_start_matches('v')
        );

        let envelope = login_envelope(
            &credentials.username,
            &credentials.password,
            &credentials.security_token,
        );

        debug!(endpoint = %endpoint, username = %credentials.username, "Logging in to Salesforce");

        let response = http
            .post(&endpoint)
            .header("Content-Type", "text/xml; charset=UTF-8")
            .header("SOAPAction", "login")
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let fault = extract_tag(&body, "faultstring")
                .unwrap_or_else(|| format!("login endpoint returned HTTP {status}"));
            return Err(SalesforceError::AuthenticationFailed(fault));
        }

        let session_id = extract_tag(&body, "sessionId").ok_or_else(|| {
            SalesforceError::MalformedResponse("login response missing <sessionId>".to_string())
        })?;
        let server_url = extract_tag(&body, "serverUrl").ok_or_else(|| {
            SalesforceError::MalformedResponse("login response missing <serverUrl>".to_string())
        })?;
        let instance_url = instance_from_server_url(&server_url)?;

        info!(instance = %instance_url, "Salesforce connection successful");

        Ok(Self {
            http,
            instance_url,
            session_id,
        })
    }

    /// Create one Case record with `Status` fixed to `"New"`.
    ///
    /// Single attempt, no idempotency key: a retry by an outer caller can
    /// create a duplicate record. This matches the upstream behavior and is
    /// a known gap.
    pub async fn create_case(&self, request: &CaseRequest) -> Result<CaseRecord, SalesforceError> {
        let url = format!(
            "{}/services/data/{}/sobjects/Case",
            self.instance_url, API_VERSION
        );

        let body = CaseCreateBody {
            subject: &request.subject,
            description: &request.description,
            priority: &request.priority,
            status: CASE_STATUS_NEW,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.session_id)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SalesforceError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&text),
            });
        }

        let created: CaseCreateResponse = response
            .json()
            .await
            .map_err(|e| SalesforceError::MalformedResponse(e.to_string()))?;

        Ok(CaseRecord { id: created.id })
    }

    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }
}

fn login_envelope(username: &str, password: &str, security_token: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"
              xmlns:urn="urn:partner.soap.sforce.com">
  <env:Body>
    <urn:login>
      <urn:username>{}</urn:username>
      <urn:password>{}{}</urn:password>
    </urn:login>
  </env:Body>
</env:Envelope>"#,
        xml_escape(username),
        xml_escape(password),
        xml_escape(security_token)
    )
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Pull the text of a single XML tag out of the SOAP envelope. The login
/// response is small and flat, so a regex beats carrying an XML parser.
fn extract_tag(body: &str, tag: &str) -> Option<String> {
    let pattern = format!("<{tag}>([^<]+)</{tag}>");
    let re = Regex::new(&pattern).ok()?;
    re.captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// The serverUrl points at the SOAP endpoint on the assigned instance;
/// the REST base is just its scheme + host.
fn instance_from_server_url(server_url: &str) -> Result<String, SalesforceError> {
    let url = Url::parse(server_url)
        .map_err(|e| SalesforceError::MalformedResponse(format!("bad serverUrl: {e}")))?;
    let host = url.host_str().ok_or_else(|| {
        SalesforceError::MalformedResponse("serverUrl has no host".to_string())
    })?;
    Ok(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

/// Salesforce rejections come back as a JSON array of {errorCode, message}.
fn rejection_message(body: &str) -> String {
    match serde_json::from_str::<Vec<ApiErrorBody>>(body) {
        Ok(errors) if !errors.is_empty() => errors
            .iter()
            .map(|e| {
                if e.error_code.is_empty() {
                    e.message.clone()
                } else {
                    format!("{}: {}", e.error_code, e.message)
                }
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_session_and_server_url_from_envelope() {
        let body = r#"<?xml version="1.0"?><soapenv:Envelope><soapenv:Body><loginResponse><result>
            <serverUrl>https://na139.salesforce.com/services/Soap/u/60.0/00D123</serverUrl>
            <sessionId>00D123!AQcAQH0d</sessionId>
        </result></loginResponse></soapenv:Body></soapenv:Envelope>"#;

        assert_eq!(
            extract_tag(body, "sessionId").as_deref(),
            Some("00D123!AQcAQH0d")
        );
        assert_eq!(
            instance_from_server_url(&extract_tag(body, "serverUrl").unwrap()).unwrap(),
            "https://na139.salesforce.com"
        );
    }

    #[test]
    fn escapes_credentials_in_login_envelope() {
        let envelope = login_envelope("user@example.com", "p<ss&word", "tok\"en");
        assert!(envelope.contains("p&lt;ss&amp;word"));
        assert!(envelope.contains("tok&quot;en"));
        assert!(!envelope.contains("p<ss&word"));
    }

    #[test]
    fn formats_rejection_from_error_array() {
        let body = r#"[{"message":"Required fields are missing: [Subject]","errorCode":"REQUIRED_FIELD_MISSING"}]"#;
        assert_eq!(
            rejection_message(body),
            "REQUIRED_FIELD_MISSING: Required fields are missing: [Subject]"
        );
    }

    #[test]
    fn falls_back_to_raw_body_for_unparseable_rejections() {
        assert_eq!(rejection_message("  gateway timeout  "), "gateway timeout");
    }
}
