// Entry point: the composition root.
//
// This binary does not run the conversation itself. It:
// 1. Loads configuration (credentials file + environment overrides)
// 2. Wires the tool handler to the Google API clients
// 3. Prints the root agent definition as JSON for the agent runtime

use anyhow::Context;
use slide_gen_agent::agent::{root_agent, SlideToolHandler};
use slide_gen_agent::config::AgentConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = AgentConfig::from_env().context("Failed to load agent configuration")?;

    let handler = SlideToolHandler::from_config(&config);
    let agent = root_agent(&config, &handler);

    tracing::info!(
        "Agent '{}' ready with {} tools on {}",
        agent.name,
        agent.tools.len(),
        agent.model
    );

    let manifest =
        serde_json::to_string_pretty(&agent).context("Failed to serialize agent definition")?;
    println!("{}", manifest);

    Ok(())
}
