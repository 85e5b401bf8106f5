//! # course-core
//!
//! Domain model for university course enrollment: students register for
//! courses within a credit-hour ceiling, faculty take on courses within a
//! teaching load, and courses enforce a seat limit.
//!
//! This crate has no file system or terminal dependencies.  It is shared by
//! the `course-manager` registry and binary.
//!
//! - **`domain`** – entities, their invariants, and the error taxonomy.
//! - **`records`** – the comma-delimited line codec used by record files.
//! - **`credential`** – the password hashing function.

pub mod credential;
pub mod domain;
pub mod records;

pub use credential::{hash_password, verify_password};
pub use domain::course::{Course, Enrollable};
pub use domain::error::{DomainError, ErrorKind};
pub use domain::faculty::Faculty;
pub use domain::student::Student;
pub use domain::user::{CourseHolder, HeldCourse, Profile, UserId};
pub use records::codec::{FacultyRecord, RecordError, StudentRecord};
