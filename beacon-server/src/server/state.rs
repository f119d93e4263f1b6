use crate::room::RoomRegistry;
use crate::signaling::MessageRouter;
use std::sync::Arc;

/// Shared state handed to every WebSocket handler.
#[derive(Clone)]
pub struct RelayState {
    registry: Arc<RoomRegistry>,
    router: Arc<MessageRouter>,
}

impl RelayState {
    #[must_use]
    pub fn new() -> Self {
        let registry = RoomRegistry::new_shared();
        let router = Arc::new(MessageRouter::new(registry.clone()));
        Self { registry, router }
    }

    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    pub fn router(&self) -> &Arc<MessageRouter> {
        &self.router
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RelayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayState")
            .field("registry", &self.registry)
            .finish()
    }
}
