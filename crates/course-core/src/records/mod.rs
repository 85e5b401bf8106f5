//! Flat text records: the on-disk form of courses, students and faculty.
//!
//! The codec here is pure string handling.  Opening files, skipping bad lines
//! and resolving course names all happen in the manager crate.

pub mod codec;
