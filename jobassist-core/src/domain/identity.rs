//! Identity domain model

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Counter for generating unique ids within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A registered user account
///
/// The three fields are exactly what gets persisted: the registry stores
/// `{id, email, name}` snapshots keyed by id. Identities are never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    /// Display name
    pub name: String,
}

impl Identity {
    /// Create an identity with a freshly generated id
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            email: email.into(),
            name: name.into(),
        }
    }
}

/// Generate a time-based unique id
///
/// Lower 48 bits carry the unix millisecond timestamp (good for ~8900 years),
/// upper 16 bits a process-local counter (65536 unique ids per millisecond).
/// Ids created later compare greater, so a map keyed by id iterates in
/// creation order.
pub fn generate_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64;

    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    ((timestamp << 16) | counter).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_creation() {
        let identity = Identity::new("test@example.com", "Test User");
        assert!(!identity.id.is_empty());
        assert_eq!(identity.email, "test@example.com");
        assert_eq!(identity.name, "Test User");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serialized_shape() {
        let identity = Identity::new("a@x.com", "Ann");
        let value = serde_json::to_value(&identity).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("id"));
        assert!(obj.contains_key("email"));
        assert!(obj.contains_key("name"));
    }
}
