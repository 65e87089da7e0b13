use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::salesforce::SalesforceCredentials;

/// Main configuration structure for casebridge
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CasebridgeConfig {
    /// Slack configuration
    pub slack: SlackConfig,
    /// Salesforce configuration
    pub salesforce: SalesforceConfig,
    /// HTTP server settings
    pub server: ServerConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlackConfig {
    /// Bot token for Web API calls (can be set via env var)
    pub bot_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SalesforceConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub security_token: Option<String>,
    /// Login host; switch to https://test.salesforce.com for sandboxes
    pub login_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address the Slack callback listener binds to
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,
}

impl Default for CasebridgeConfig {
    fn default() -> Self {
        Self {
            slack: SlackConfig { bot_token: None },
            salesforce: SalesforceConfig {
                username: None,
                password: None,
                security_token: None,
                login_url: "https://login.salesforce.com".to_string(),
            },
            server: ServerConfig {
                listen_addr: "0.0.0.0:3030".to_string(),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

impl CasebridgeConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (casebridge.toml)
    /// 3. Environment variables (prefixed with CASEBRIDGE_)
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("salesforce.login_url", defaults.salesforce.login_url)?
            .set_default("server.listen_addr", defaults.server.listen_addr)?
            .set_default("observability.log_level", defaults.observability.log_level)?;

        if Path::new("casebridge.toml").exists() {
            builder = builder.add_source(File::with_name("casebridge"));
        }

        builder = builder.add_source(
            Environment::with_prefix("CASEBRIDGE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut bridge_config: CasebridgeConfig = config.try_deserialize()?;

        // Special handling for credentials - fall back to the conventional
        // unprefixed environment variable names.
        if bridge_config.slack.bot_token.is_none() {
            if let Ok(token) = std::env::var("SLACK_BOT_TOKEN") {
                bridge_config.slack.bot_token = Some(token);
            }
        }
        if bridge_config.salesforce.username.is_none() {
            if let Ok(username) = std::env::var("SALESFORCE_USERNAME") {
                bridge_config.salesforce.username = Some(username);
            }
        }
        if bridge_config.salesforce.password.is_none() {
            if let Ok(password) = std::env::var("SALESFORCE_PASSWORD") {
                bridge_config.salesforce.password = Some(password);
            }
        }
        if bridge_config.salesforce.security_token.is_none() {
            if let Ok(token) = std::env::var("SALESFORCE_SECURITY_TOKEN") {
                bridge_config.salesforce.security_token = Some(token);
            }
        }

        Ok(bridge_config)
    }

    /// Required Salesforce credentials; missing values abort startup.
    pub fn salesforce_credentials(&self) -> Result<SalesforceCredentials> {
        Ok(SalesforceCredentials {
            username: required(&self.salesforce.username, "SALESFORCE_USERNAME")?,
            password: required(&self.salesforce.password, "SALESFORCE_PASSWORD")?,
            security_token: required(&self.salesforce.security_token, "SALESFORCE_SECURITY_TOKEN")?,
            login_url: self.salesforce.login_url.clone(),
        })
    }

    /// Required Slack bot token; missing value aborts startup of serve mode.
    pub fn slack_bot_token(&self) -> Result<String> {
        required(&self.slack.bot_token, "SLACK_BOT_TOKEN")
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

fn required(value: &Option<String>, env_name: &str) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Missing required credential: set {env_name}"))
}
