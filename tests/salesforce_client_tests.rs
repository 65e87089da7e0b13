//! Salesforce client tests against a wiremock'd API
//!
//! These tests stand in a fake Salesforce: the SOAP login endpoint and the
//! REST sobjects/Case create endpoint, so the login/create contract is
//! verified without network access or real credentials.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use casebridge::salesforce::{
    CaseRequest, SalesforceClient, SalesforceCredentials, SalesforceError,
};

const SESSION_ID: &str = "00Dxx0000001gPL!session-token";

fn credentials(login_url: &str) -> SalesforceCredentials {
    SalesforceCredentials {
        username: "bridge@example.com".to_string(),
        password: "hunter2".to_string(),
        security_token: "TOKEN123".to_string(),
        login_url: login_url.to_string(),
    }
}

fn login_envelope(server_url: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <loginResponse>
      <result>
        <serverUrl>{server_url}/services/Soap/u/60.0/00Dxx0000001gPL</serverUrl>
        <sessionId>{SESSION_ID}</sessionId>
      </result>
    </loginResponse>
  </soapenv:Body>
</soapenv:Envelope>"#
    )
}

async fn mock_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/services/Soap/u/60.0"))
        .and(header("SOAPAction", "login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_envelope(&server.uri())))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_then_create_returns_remote_record_id() {
    let server = MockServer::start().await;
    mock_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/services/data/v60.0/sobjects/Case"))
        .and(header("authorization", format!("Bearer {SESSION_ID}").as_str()))
        .and(body_json(json!({
            "Subject": "Printer on fire",
            "Description": "Third floor, again.",
            "Priority": "High",
            "Status": "New",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "5003xyz",
            "success": true,
            "errors": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SalesforceClient::login(&credentials(&server.uri()))
        .await
        .expect("login should succeed");
    assert_eq!(client.instance_url(), server.uri());

    let record = client
        .create_case(&CaseRequest {
            subject: "Printer on fire".to_string(),
            description: "Third floor, again.".to_string(),
            priority: "High".to_string(),
        })
        .await
        .expect("create should succeed");

    assert_eq!(record.id, "5003xyz");
}

#[tokio::test]
async fn login_fault_is_an_authentication_error() {
    let server = MockServer::start().await;

    let fault = r#"<?xml version="1.0"?><soapenv:Envelope><soapenv:Body><soapenv:Fault>
        <faultcode>INVALID_LOGIN</faultcode>
        <faultstring>INVALID_LOGIN: Invalid username, password, security token; or user locked out.</faultstring>
    </soapenv:Fault></soapenv:Body></soapenv:Envelope>"#;

    Mock::given(method("POST"))
        .and(path("/services/Soap/u/60.0"))
        .respond_with(ResponseTemplate::new(500).set_body_string(fault))
        .mount(&server)
        .await;

    let err = SalesforceClient::login(&credentials(&server.uri()))
        .await
        .expect_err("login should fail");

    match err {
        SalesforceError::AuthenticationFailed(msg) => {
            assert!(msg.contains("INVALID_LOGIN"), "unexpected message: {msg}")
        }
        other => panic!("expected AuthenticationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn upstream_rejection_surfaces_status_and_message() {
    let server = MockServer::start().await;
    mock_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/services/data/v60.0/sobjects/Case"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!([{
            "message": "Required fields are missing: [Subject]",
            "errorCode": "REQUIRED_FIELD_MISSING",
        }])))
        .mount(&server)
        .await;

    let client = SalesforceClient::login(&credentials(&server.uri()))
        .await
        .expect("login should succeed");

    let err = client
        .create_case(&CaseRequest {
            subject: String::new(),
            description: "no subject".to_string(),
            priority: "Low".to_string(),
        })
        .await
        .expect_err("create should be rejected");

    match err {
        SalesforceError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(
                message,
                "REQUIRED_FIELD_MISSING: Required fields are missing: [Subject]"
            );
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn priority_is_forwarded_verbatim_without_validation() {
    let server = MockServer::start().await;
    mock_login(&server).await;

    // An out-of-enum priority still goes out on the wire untouched.
    Mock::given(method("POST"))
        .and(path("/services/data/v60.0/sobjects/Case"))
        .and(body_json(json!({
            "Subject": "s",
            "Description": "d",
            "Priority": "sev0 🔥",
            "Status": "New",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "500fwd",
            "success": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SalesforceClient::login(&credentials(&server.uri()))
        .await
        .expect("login should succeed");

    let record = client
        .create_case(&CaseRequest {
            subject: "s".to_string(),
            description: "d".to_string(),
            priority: "sev0 🔥".to_string(),
        })
        .await
        .expect("create should succeed");
    assert_eq!(record.id, "500fwd");
}
