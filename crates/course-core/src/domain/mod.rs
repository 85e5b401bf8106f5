//! Domain entities for course enrollment.
//!
//! Pure business rules with no file system, terminal, or clock access:
//!
//! - **`user`** – identity fields shared by every user and the
//!   [`user::CourseHolder`] capability.
//! - **`student`** / **`faculty`** – the two user variants and their load
//!   rules (credit sum vs. course count).
//! - **`course`** – seats, credit weight, instructor slot, roster, and the
//!   [`course::Enrollable`] capability.
//! - **`error`** – the domain error taxonomy.
//!
//! Relationships are stored by identifier on both sides.  No entity here ever
//! updates another; two-sided changes are the registry's responsibility.

pub mod course;
pub mod error;
pub mod faculty;
pub mod student;
pub mod user;
