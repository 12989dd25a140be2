//! Auth service - signup/login/logout lifecycle
//!
//! Persists a registry of identities and a "current session" pointer under
//! two fixed keys:
//!
//! - `job-app-assistant-users` -> JSON object mapping id -> {id, email, name}
//! - `current-user`            -> JSON object {id, email, name}
//!
//! Every operation waits out its simulated network latency first, then does
//! a plain read-check-write against the store. There is no locking: two
//! interleaved signups with the same email can both pass the uniqueness
//! check, and the last persisted registry wins. `DoctorService` surfaces
//! the artifacts of that race without repairing them.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::domain::result::{Error, Result};
use crate::domain::Identity;
use crate::ports::KeyValueStore;

/// Storage key for the identity registry
pub const USERS_KEY: &str = "job-app-assistant-users";

/// Storage key for the current session
pub const SESSION_KEY: &str = "current-user";

/// Simulated network latency per operation
///
/// There is no backend; the delays stand in for the API round-trips the
/// product was built against. Zero everything out for deterministic tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub signup: Duration,
    pub login: Duration,
    pub logout: Duration,
}

impl Latency {
    /// No delay at all
    pub const ZERO: Latency = Latency {
        signup: Duration::ZERO,
        login: Duration::ZERO,
        logout: Duration::ZERO,
    };

    /// The same delay for every operation
    pub fn uniform(delay: Duration) -> Self {
        Self {
            signup: delay,
            login: delay,
            logout: delay,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            signup: Duration::from_millis(500),
            login: Duration::from_millis(500),
            logout: Duration::from_millis(300),
        }
    }
}

/// Identity registry as persisted: id -> identity
///
/// Keyed by the time-based id, so iteration runs in creation order and
/// "first identity with a matching email" is deterministic.
type Registry = BTreeMap<String, Identity>;

/// Auth service for the signup/login/logout lifecycle
///
/// Passwords are accepted by `signup` and `login` but never stored or
/// compared. This is demo-grade authentication; anything security-relevant
/// needs a real credential layer in front of this store.
pub struct AuthService {
    store: Arc<dyn KeyValueStore>,
    latency: Latency,
}

impl AuthService {
    pub fn new(store: Arc<dyn KeyValueStore>, latency: Latency) -> Self {
        Self { store, latency }
    }

    /// True iff a session is currently persisted
    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.load_session().await?.is_some())
    }

    /// The identity of the current session, if any
    ///
    /// Returns the session snapshot as persisted; it is not re-validated
    /// against the registry.
    pub async fn current_user(&self) -> Result<Option<Identity>> {
        self.load_session().await
    }

    /// Register a new identity and sign it in
    ///
    /// Fails with [`Error::AlreadyExists`] when the email is already in the
    /// registry. Email uniqueness is checked only here, never re-validated
    /// afterward.
    pub async fn signup(&self, email: &str, _password: &str, name: &str) -> Result<Identity> {
        sleep(self.latency.signup).await;

        let mut registry = self.load_registry().await?;
        if registry.values().any(|u| u.email == email) {
            return Err(Error::already_exists(email));
        }

        let identity = Identity::new(email, name);
        registry.insert(identity.id.clone(), identity.clone());
        self.save_registry(&registry).await?;
        self.save_session(&identity).await?;

        Ok(identity)
    }

    /// Sign in an existing identity by email
    ///
    /// Scans the registry for the first identity with a matching email and
    /// fails with [`Error::NotFound`] when there is none. The password is
    /// accepted but not verified.
    pub async fn login(&self, email: &str, _password: &str) -> Result<Identity> {
        sleep(self.latency.login).await;

        let registry = self.load_registry().await?;
        let identity = registry
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| Error::not_found(email))?;

        self.save_session(&identity).await?;
        Ok(identity)
    }

    /// Clear the current session
    pub async fn logout(&self) -> Result<()> {
        sleep(self.latency.logout).await;
        self.store.remove(SESSION_KEY).await
    }

    async fn load_registry(&self) -> Result<Registry> {
        match self.store.get(USERS_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Registry::new()),
        }
    }

    async fn save_registry(&self, registry: &Registry) -> Result<()> {
        let json = serde_json::to_string(registry)?;
        self.store.set(USERS_KEY, &json).await
    }

    async fn load_session(&self) -> Result<Option<Identity>> {
        match self.store.get(SESSION_KEY).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save_session(&self, identity: &Identity) -> Result<()> {
        let json = serde_json::to_string(identity)?;
        self.store.set(SESSION_KEY, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;

    fn service_with_store() -> (AuthService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let service = AuthService::new(store.clone(), Latency::ZERO);
        (service, store)
    }

    fn service() -> AuthService {
        service_with_store().0
    }

    #[tokio::test]
    async fn test_signup_creates_identity_and_session() {
        let service = service();

        let identity = service.signup("a@x.com", "pw", "Ann").await.unwrap();
        assert_eq!(identity.email, "a@x.com");
        assert_eq!(identity.name, "Ann");
        assert!(!identity.id.is_empty());

        assert!(service.is_authenticated().await.unwrap());
        assert_eq!(service.current_user().await.unwrap(), Some(identity));
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_fails() {
        let (service, store) = service_with_store();

        let first = service.signup("a@x.com", "pw", "Ann").await.unwrap();
        let err = service.signup("a@x.com", "other", "Ann2").await.unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));

        // The registry still holds exactly one identity for the email
        let raw = store.get(USERS_KEY).await.unwrap().unwrap();
        let registry: BTreeMap<String, Identity> = serde_json::from_str(&raw).unwrap();
        let matching: Vec<_> = registry.values().filter(|u| u.email == "a@x.com").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].id, first.id);
    }

    #[tokio::test]
    async fn test_failed_signup_keeps_previous_session() {
        let service = service();

        let first = service.signup("a@x.com", "pw", "Ann").await.unwrap();
        service.signup("a@x.com", "other", "Ann2").await.unwrap_err();

        assert_eq!(service.current_user().await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_login_unknown_email_fails() {
        let service = service();

        let err = service.login("nobody@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(!service.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_login_ignores_password() {
        let service = service();
        let identity = service.signup("a@x.com", "secret", "Ann").await.unwrap();
        service.logout().await.unwrap();

        let logged_in = service.login("a@x.com", "wrong-password").await.unwrap();
        assert_eq!(logged_in, identity);
        assert!(service.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let service = service();
        service.signup("a@x.com", "pw", "Ann").await.unwrap();

        service.logout().await.unwrap();
        assert!(!service.is_authenticated().await.unwrap());
        assert_eq!(service.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_without_session_is_ok() {
        let service = service();
        service.logout().await.unwrap();
        assert!(!service.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_login_switches_session() {
        let service = service();
        service.signup("a@x.com", "pw", "Ann").await.unwrap();
        service.signup("b@x.com", "pw", "Ben").await.unwrap();

        let user = service.login("a@x.com", "pw").await.unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_eq!(
            service.current_user().await.unwrap().unwrap().email,
            "a@x.com"
        );
    }
}
