//! Application layer: the course registry and its collaborators.
//!
//! The registry is the only component that mutates a user and a course in
//! the same call.  Domain types in `course_core` guard their own invariants;
//! this layer keeps the *relationships* between them symmetric.
//!
//! # Sub-modules
//!
//! - **`registry`**     – catalog, user lists, cascading removal, and the
//!   registry-level course mutators.
//! - **`session`**      – the login state machine and the session-scoped
//!   add / remove operations.
//! - **`persistence`**  – loading and saving the three record files through a
//!   [`record_store::RecordStore`].
//! - **`record_store`** – the storage port implemented by the infrastructure
//!   layer.
//! - **`error`**        – [`error::RegistryError`], the only error shape this
//!   layer exposes.
//!
//! No file system access happens here; every byte goes through the
//! `RecordStore` trait object handed to [`registry::CourseRegistry::new`].

pub mod error;
pub mod persistence;
pub mod record_store;
pub mod registry;
pub mod session;
