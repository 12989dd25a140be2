//! Doctor service - persisted store health checks
//!
//! The store runs without locks or transactions, so interleaved writers can
//! leave artifacts behind: duplicate emails in the registry, a session
//! pointing at an identity that is no longer there. The checks here surface
//! those (plus plain corruption) without mutating anything.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::domain::result::Result;
use crate::domain::Identity;
use crate::ports::KeyValueStore;
use crate::services::auth::{SESSION_KEY, USERS_KEY};

/// Doctor service for store health checks
pub struct DoctorService {
    store: Arc<dyn KeyValueStore>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Run all health checks
    pub async fn run_checks(&self) -> Result<DoctorResult> {
        let mut checks = HashMap::new();

        // Registry: parses, keys consistent, emails unique
        let registry = match self.store.get(USERS_KEY).await? {
            None => {
                checks.insert(
                    "registry_parses".to_string(),
                    CheckResult {
                        status: "pass".to_string(),
                        message: "No registry persisted yet".to_string(),
                        details: None,
                    },
                );
                None
            }
            Some(raw) => match serde_json::from_str::<BTreeMap<String, Identity>>(&raw) {
                Ok(registry) => {
                    checks.insert(
                        "registry_parses".to_string(),
                        CheckResult {
                            status: "pass".to_string(),
                            message: format!("Registry parses ({} identities)", registry.len()),
                            details: None,
                        },
                    );
                    Some(registry)
                }
                Err(e) => {
                    checks.insert(
                        "registry_parses".to_string(),
                        CheckResult {
                            status: "error".to_string(),
                            message: format!("Registry is not valid JSON: {}", e),
                            details: None,
                        },
                    );
                    None
                }
            },
        };

        if let Some(registry) = &registry {
            let mismatched: Vec<serde_json::Value> = registry
                .iter()
                .filter(|(key, identity)| key.as_str() != identity.id.as_str())
                .map(|(key, identity)| json!({"key": key, "id": identity.id}))
                .collect();
            checks.insert(
                "registry_keys_consistent".to_string(),
                CheckResult {
                    status: if mismatched.is_empty() { "pass" } else { "error" }.to_string(),
                    message: if mismatched.is_empty() {
                        "All registry keys match their identity ids".to_string()
                    } else {
                        format!("{} registry entry(s) stored under the wrong key", mismatched.len())
                    },
                    details: if mismatched.is_empty() { None } else { Some(mismatched) },
                },
            );

            let mut seen: HashMap<&str, i64> = HashMap::new();
            for identity in registry.values() {
                *seen.entry(identity.email.as_str()).or_insert(0) += 1;
            }
            let duplicates: Vec<serde_json::Value> = seen
                .iter()
                .filter(|(_, count)| **count > 1)
                .map(|(email, count)| json!({"email": email, "count": count}))
                .collect();
            checks.insert(
                "duplicate_emails".to_string(),
                CheckResult {
                    status: if duplicates.is_empty() { "pass" } else { "warning" }.to_string(),
                    message: if duplicates.is_empty() {
                        "All registered emails are unique".to_string()
                    } else {
                        format!(
                            "{} email(s) registered more than once (interleaved signups)",
                            duplicates.len()
                        )
                    },
                    details: if duplicates.is_empty() { None } else { Some(duplicates) },
                },
            );
        }

        // Session: parses, references a registered identity
        match self.store.get(SESSION_KEY).await? {
            None => {
                checks.insert(
                    "session_parses".to_string(),
                    CheckResult {
                        status: "pass".to_string(),
                        message: "No session persisted".to_string(),
                        details: None,
                    },
                );
            }
            Some(raw) => match serde_json::from_str::<Identity>(&raw) {
                Ok(session) => {
                    checks.insert(
                        "session_parses".to_string(),
                        CheckResult {
                            status: "pass".to_string(),
                            message: "Session parses".to_string(),
                            details: None,
                        },
                    );

                    let registered = registry
                        .as_ref()
                        .map(|r| r.contains_key(&session.id))
                        .unwrap_or(false);
                    checks.insert(
                        "session_identity_registered".to_string(),
                        CheckResult {
                            status: if registered { "pass" } else { "warning" }.to_string(),
                            message: if registered {
                                "Session references a registered identity".to_string()
                            } else {
                                "Session references an identity that is not in the registry"
                                    .to_string()
                            },
                            details: if registered {
                                None
                            } else {
                                Some(vec![json!({"id": session.id})])
                            },
                        },
                    );
                }
                Err(e) => {
                    checks.insert(
                        "session_parses".to_string(),
                        CheckResult {
                            status: "error".to_string(),
                            message: format!("Session is not valid JSON: {}", e),
                            details: None,
                        },
                    );
                }
            },
        }

        let passed = checks.values().filter(|c| c.status == "pass").count() as i64;
        let warnings = checks.values().filter(|c| c.status == "warning").count() as i64;
        let errors = checks.values().filter(|c| c.status == "error").count() as i64;

        Ok(DoctorResult {
            checks,
            summary: DoctorSummary {
                passed,
                warnings,
                errors,
            },
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorResult {
    pub checks: HashMap<String, CheckResult>,
    pub summary: DoctorSummary,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
pub struct DoctorSummary {
    pub passed: i64,
    pub warnings: i64,
    pub errors: i64,
}
