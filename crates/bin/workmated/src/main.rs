//! # workmated: workmate daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize tracing
//! - Construct the outbound adapters (Gemini client, simulated executor)
//! - Construct application services, injecting adapters via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use workmate_adapter_gemini::GeminiClient;
use workmate_adapter_http_axum::state::AppState;
use workmate_adapter_virtual::SimulatedExecutor;
use workmate_app::conversation_log::InMemoryConversation;
use workmate_app::event_bus::InProcessEventBus;
use workmate_app::services::chat_service::ChatService;
use workmate_app::services::conversation_service::ConversationService;
use workmate_app::services::step_runner::StepRunner;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    if config.gemini.api_key.is_empty() {
        tracing::warn!("no Gemini API key configured; chat requests will fail");
    }

    // Event bus, shared between services and the SSE stream
    let event_bus = Arc::new(InProcessEventBus::new(256));

    // Outbound adapters
    let generator = GeminiClient::new(config.gemini.clone());
    let executor = SimulatedExecutor::with_delay(Duration::from_millis(config.runner.step_delay_ms));

    // Services
    let conversation_service = ConversationService::new(
        InMemoryConversation::default(),
        ChatService::new(generator),
        Arc::clone(&event_bus),
    );
    let step_runner = StepRunner::new(executor, Arc::clone(&event_bus));

    // HTTP
    let state = AppState::new(conversation_service, step_runner, event_bus);
    let app = workmate_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "workmated listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
