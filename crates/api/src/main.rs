//! Journaling assistant HTTP service.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use agent::{Agent, AgentConfig};
use database::Database;
use openai_engine::OpenAiEngine;

mod auth;
mod config;
mod error;
mod routes;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let engine = OpenAiEngine::from_env()?;
    let agent = Agent::new(Arc::new(engine), db.pool().clone(), AgentConfig::from_env());

    let state = AppState { db, agent };
    let app = routes::router(state);

    let addr: SocketAddr = config.addr.parse()?;
    info!(%addr, "Journal API listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
