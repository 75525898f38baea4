//! Synapse HTTP Server Binary
//!
//! This is the main entry point for the Synapse REST API server.
//! It loads configuration, builds the model client and planner, and starts
//! serving requests.
//!
//! # Usage
//!
//! ```bash
//! GROQ_API_KEY=... cargo run --bin synapse-server
//!
//! # Against a local OpenAI-compatible server, no key required
//! LLM_BASE_URL=http://localhost:11434/v1 LLM_MODEL=llama3 cargo run --bin synapse-server
//! ```
//!
//! # Environment Variables
//!
//! - `SYNAPSE_CONFIG`: Path to a `synapse.toml` (default: searched)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `LLM_BASE_URL`, `LLM_MODEL`: Model endpoint overrides
//! - `GROQ_API_KEY`: API key (variable name set by `llm.api_key_env`)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use synapse::config::AppConfig;
use synapse::http::{create_router, AppState};
use synapse::llm::{OpenAiCompatibleClient, PromptBuilder};
use synapse::services::SchedulePlanner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Synapse HTTP Server");

    let config = AppConfig::load()?;

    let client_config = config.llm.client_config();
    if client_config.api_key.is_none() {
        warn!(
            "{} is not set; requests will be sent without authorization",
            config.llm.api_key_env
        );
    }
    let client = OpenAiCompatibleClient::new(client_config)?;
    info!("Model client ready: {} at {}", config.llm.model, config.llm.base_url);

    let prompts = PromptBuilder::new().with_preamble(config.llm.load_prompt_preamble()?);
    if prompts.preamble().is_some() {
        info!("Loaded prompt preamble");
    }

    let planner = SchedulePlanner::new(Arc::new(client), &config.planner).with_prompts(prompts);

    // Create application state
    let state = AppState::new(Arc::new(planner)).with_body_limit(config.server.body_limit_bytes);

    // Create router with all endpoints
    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
