//! Infrastructure layer for the course manager.
//!
//! Contains the file-system adapters: the record store that backs the
//! registry's load/save calls and the TOML configuration file.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `course_core`, but MUST NOT be imported by the `application` layer.

pub mod storage;
