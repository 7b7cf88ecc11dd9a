//! Shared application state.

use agent::Agent;
use database::Database;

/// State shared across handlers. Cheap to clone: the database wraps a
/// pool and the agent an `Arc`'d engine.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub agent: Agent,
}
