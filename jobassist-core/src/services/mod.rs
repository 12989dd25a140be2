//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic over the storage port. Each service
//! focuses on a specific feature area.

pub mod auth;
mod doctor;
pub mod logging;
mod status;

pub use auth::{AuthService, Latency};
pub use doctor::{CheckResult, DoctorResult, DoctorService, DoctorSummary};
pub use logging::{LogEntry, LogEvent, LoggingService};
pub use status::{StatusService, StatusSummary};
