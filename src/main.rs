use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use casebridge::config::CasebridgeConfig;
use casebridge::salesforce::SalesforceClient;
use casebridge::slack::{AppState, SlackApiClient};
use casebridge::{selftest, telemetry};

#[derive(Parser)]
#[command(name = "casebridge")]
#[command(about = "Slack workflow step that files Salesforce support cases")]
#[command(
    long_about = "casebridge registers the 'update_salesforce_case_step' workflow step: \
                  a three-field form (subject, description, priority) whose execution \
                  creates a Salesforce Case and returns the new record id as 'case_id'."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Slack callback listener (default mode)
    Serve,
    /// Create one case with fixed test inputs and exit
    SelfTest,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    CasebridgeConfig::load_env_file()?;
    telemetry::init_telemetry()?;

    // With no subcommand, honor the MODE environment variable the way the
    // service has always been deployed: "test" runs the self-test, anything
    // else serves.
    let command = cli.command.unwrap_or_else(|| {
        match std::env::var("MODE").as_deref() {
            Ok("test") => Commands::SelfTest,
            _ => Commands::Serve,
        }
    });

    match command {
        Commands::Serve => tokio::runtime::Runtime::new()?.block_on(serve_command()),
        Commands::SelfTest => tokio::runtime::Runtime::new()?.block_on(self_test_command()),
    }
}

async fn serve_command() -> Result<()> {
    info!("Starting Slack callback listener...");
    let config = CasebridgeConfig::load()?;
    let salesforce = connect_salesforce(&config).await?;

    let state = AppState {
        creator: Arc::new(salesforce),
        slack: SlackApiClient::new(config.slack_bot_token()?),
    };

    casebridge::slack::serve(&config.server.listen_addr, state).await
}

async fn self_test_command() -> Result<()> {
    info!("Running in test mode");
    let config = CasebridgeConfig::load()?;
    let salesforce = connect_salesforce(&config).await?;

    selftest::run_self_test(&salesforce).await?;
    Ok(())
}

/// Login failures are fatal: logged and re-raised, never retried.
async fn connect_salesforce(config: &CasebridgeConfig) -> Result<SalesforceClient> {
    match SalesforceClient::login(&config.salesforce_credentials()?).await {
        Ok(client) => Ok(client),
        Err(e) => {
            error!(error = %e, "Error connecting to Salesforce");
            Err(e.into())
        }
    }
}
