//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they can be exercised with any store behind them.

use std::sync::Arc;

use crate::domain::ports::{ChatStore, DocumentStore, JobBoard, UserDirectory};
use crate::domain::{ChatService, JobBoardService, UserDirectoryService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserDirectory>,
    pub jobs: Arc<dyn JobBoard>,
    pub chats: Arc<dyn ChatStore>,
}

impl HttpState {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        jobs: Arc<dyn JobBoard>,
        chats: Arc<dyn ChatStore>,
    ) -> Self {
        Self { users, jobs, chats }
    }

    /// Wire the three services around one shared store handle.
    pub fn from_store(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(
            Arc::new(UserDirectoryService::new(Arc::clone(&store))),
            Arc::new(JobBoardService::new(Arc::clone(&store))),
            Arc::new(ChatService::new(store)),
        )
    }
}
