use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use teamdeck::config::{load_config, TeamdeckConfig, CONFIG_ENV};
use teamdeck::credentials::ApiKeyCredentials;
use teamdeck::InputItem;
use teamdeck_node::registry::find_node;
use teamdeck_node::{verify_credentials, TeamdeckClient};
use tracing::info;

const NODE: &str = "teamdeck";

#[derive(Parser)]
#[command(name = "teamdeck-node")]
#[command(about = "Run the Teamdeck node outside a workflow host")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (defaults to $TEAMDECK_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Record failing items on the error channel instead of aborting
    #[arg(long, global = true)]
    continue_on_fail: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the node description and credential descriptor as JSON
    Describe,

    /// Check the API key against the credential test endpoint
    Verify,

    /// Execute a batch of items read from a JSON array
    Run {
        /// Input file, or "-" for stdin
        #[arg(short, long, default_value = "-")]
        input: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the JSON output only.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teamdeck_node=info,teamdeck=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;
    let node = find_node(NODE).context("Teamdeck node is not registered")?;

    match cli.command {
        Commands::Describe => {
            let description = serde_json::json!({
                "node": node.description(),
                "credential": node.credential(),
            });
            println!("{}", serde_json::to_string_pretty(&description)?);
        }
        Commands::Verify => {
            let client = client(&config)?;
            verify_credentials(&client)
                .await
                .context("Credential test failed")?;
            info!(base_url = %client.base_url(), "API key accepted");
            println!("{}", serde_json::json!({ "success": true }));
        }
        Commands::Run { input } => {
            let items = read_items(&input)?;
            let continue_on_fail = cli.continue_on_fail || config.execution.continue_on_fail;
            let client = client(&config)?;
            info!(
                items = items.len(),
                continue_on_fail,
                base_url = %client.base_url(),
                "Executing batch"
            );

            let output = node.execute(&client, &items, continue_on_fail).await?;
            println!("{}", serde_json::to_string_pretty(&output.to_channels()?)?);
        }
    }

    Ok(())
}

fn resolve_config(path: Option<&str>) -> Result<TeamdeckConfig> {
    let path = path
        .map(str::to_string)
        .or_else(|| std::env::var(CONFIG_ENV).ok());
    let config = match path {
        Some(path) => load_config(&path)?,
        None => TeamdeckConfig::default(),
    };
    Ok(config.apply_env())
}

fn client(config: &TeamdeckConfig) -> Result<TeamdeckClient> {
    let credentials = ApiKeyCredentials::from_env()?;
    TeamdeckClient::from_config(credentials, &config.api)
}

fn read_items(input: &str) -> Result<Vec<InputItem>> {
    let raw = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read items from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read input file: {}", input))?
    };
    serde_json::from_str(&raw).context("Input must be a JSON array of items")
}
