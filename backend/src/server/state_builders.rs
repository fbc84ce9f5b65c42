//! Store bootstrap.
//!
//! The server binds only after [`build_store`] succeeds, so an unreachable
//! database stops the process before it accepts traffic.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::DocumentStore;
use crate::outbound::memory::InMemoryDocumentStore;
use crate::outbound::persistence::{DbPool, DieselDocumentStore, PoolError, run_migrations};

use super::config::StoreBackend;

/// Reasons the store could not be prepared.
#[derive(Debug, thiserror::Error)]
pub enum StoreBootstrapError {
    #[error("document store unavailable: {0}")]
    Unavailable(#[from] PoolError),
}

/// Build the store selected by `backend`, applying migrations first when it
/// is PostgreSQL.
///
/// # Errors
///
/// [`StoreBootstrapError::Unavailable`] when the database cannot be reached,
/// migrated or pinged.
pub async fn build_store(
    backend: StoreBackend,
) -> Result<Arc<dyn DocumentStore>, StoreBootstrapError> {
    match backend {
        StoreBackend::InMemory => {
            warn!("using the in-memory document store; data is lost on restart");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
        StoreBackend::Postgres(config) => {
            run_migrations(config.database_url()).await?;
            let pool = DbPool::connect(config).await?;
            info!("document store connected");
            Ok(Arc::new(DieselDocumentStore::new(pool)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Collection, Filter, Projection};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn in_memory_backend_starts_empty() {
        let store = build_store(StoreBackend::InMemory)
            .await
            .expect("in-memory store builds");
        let users = store
            .find(Collection::Users, &Filter::all(), &Projection::Full)
            .await
            .expect("find succeeds");
        assert!(users.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_database_fails_bootstrap() {
        use crate::outbound::persistence::PoolConfig;
        use std::time::Duration;

        let config = PoolConfig::new("postgres://jobbox@127.0.0.1:1/jobbox")
            .with_connection_timeout(Duration::from_secs(1));
        let result = build_store(StoreBackend::Postgres(config)).await;
        assert!(matches!(result, Err(StoreBootstrapError::Unavailable(_))));
    }
}
