use std::sync::Arc;

use quickdeck_backend::BackendClient;
use quickdeck_core::gate::GatePolicy;
use quickdeck_events::EventBus;

use crate::auth::session::SessionCodec;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is a pooled client.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, resolved once at startup.
    pub config: Arc<ServerConfig>,
    /// Session signer/verifier.
    pub sessions: Arc<SessionCodec>,
    /// Routing policy applied by the gate middleware.
    pub gate: Arc<GatePolicy>,
    /// REST backend client.
    pub backend: BackendClient,
    /// Change signals for project mutations.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Assemble state from configuration with a fresh backend client and bus.
    pub fn from_config(config: ServerConfig) -> Self {
        let sessions = SessionCodec::new(&config.session);
        let backend = BackendClient::new(config.backend_url.clone());
        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            gate: Arc::new(GatePolicy::default()),
            backend,
            event_bus: Arc::new(EventBus::default()),
        }
    }
}
