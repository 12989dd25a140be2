//! Status service - registry and session summary

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::Identity;
use crate::ports::KeyValueStore;
use crate::services::auth::{SESSION_KEY, USERS_KEY};

/// Status service for store summaries
pub struct StatusService {
    store: Arc<dyn KeyValueStore>,
}

impl StatusService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Get the overall store summary
    pub async fn summary(&self) -> Result<StatusSummary> {
        let identities: Vec<Identity> = match self.store.get(USERS_KEY).await? {
            Some(json) => {
                let registry: BTreeMap<String, Identity> = serde_json::from_str(&json)?;
                registry.into_values().collect()
            }
            None => Vec::new(),
        };

        let current_user: Option<Identity> = match self.store.get(SESSION_KEY).await? {
            Some(json) => Some(serde_json::from_str(&json)?),
            None => None,
        };

        Ok(StatusSummary {
            total_identities: identities.len() as i64,
            signed_in: current_user.is_some(),
            current_user,
            identities,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub total_identities: i64,
    pub signed_in: bool,
    pub current_user: Option<Identity>,
    /// Registered identities in creation order
    pub identities: Vec<Identity>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::services::auth::{AuthService, Latency};

    #[tokio::test]
    async fn test_summary_on_empty_store() {
        let store = Arc::new(MemoryStore::new());
        let status = StatusService::new(store).summary().await.unwrap();

        assert_eq!(status.total_identities, 0);
        assert!(!status.signed_in);
        assert!(status.current_user.is_none());
        assert!(status.identities.is_empty());
    }

    #[tokio::test]
    async fn test_summary_after_signups() {
        let store = Arc::new(MemoryStore::new());
        let auth = AuthService::new(store.clone(), Latency::ZERO);
        auth.signup("a@x.com", "pw", "Ann").await.unwrap();
        auth.signup("b@x.com", "pw", "Ben").await.unwrap();

        let status = StatusService::new(store).summary().await.unwrap();
        assert_eq!(status.total_identities, 2);
        assert!(status.signed_in);
        assert_eq!(status.current_user.unwrap().email, "b@x.com");
        assert_eq!(status.identities[0].email, "a@x.com");
    }
}
