//! course-manager library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.

pub mod application;
pub mod infrastructure;

pub use application::error::RegistryError;
pub use application::record_store::{RecordStore, StoreError};
pub use application::registry::{CourseRegistry, InvariantViolation};
pub use application::session::{SessionUser, UserRef};
