//! Course domain entity and the enrollment capability it exposes.
//!
//! A course knows its roster and its instructor only by [`UserId`].  It never
//! owns a student or faculty member, and it never reaches across to update the
//! user's side of the relationship; the registry does both halves.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::error::{require_in_range, require_text_field, DomainError};
use crate::domain::user::UserId;

/// Fewest credit hours a course may carry.
pub const MIN_CREDITS: u32 = 1;
/// Most credit hours a course may carry.
pub const MAX_CREDITS: u32 = 4;

/// Something students can be enrolled in and dropped from.
pub trait Enrollable {
    /// Student ids currently enrolled, in enrollment order.
    fn enrolled_students(&self) -> &[UserId];

    /// `true` iff there is a free seat and `student` is not already enrolled.
    fn can_enroll(&self, student: &str) -> bool;

    /// Enrolls `student` if [`Enrollable::can_enroll`] holds.  The only path
    /// that adds to the roster.
    fn enroll(&mut self, student: &str) -> bool;

    /// Removes `user` from the roster if present.  Returns whether anything
    /// was removed.
    fn drop(&mut self, user: &str) -> bool;
}

/// An enrollable course.
///
/// Equality and hashing use the name only: two courses with the same name are
/// the same course regardless of credits or capacity.
#[derive(Debug, Clone)]
pub struct Course {
    name: String,
    credits: u32,
    capacity: u32,
    instructor: Option<UserId>,
    roster: Vec<UserId>,
}

impl Course {
    /// Creates a course with an empty roster and no instructor.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] for an empty name,
    /// [`DomainError::ContainsDelimiter`] for a name holding the record
    /// separator,
    /// [`DomainError::OutOfRange`] for credits outside
    /// `MIN_CREDITS..=MAX_CREDITS`, and [`DomainError::NotPositive`] for a
    /// zero capacity.
    pub fn new(name: impl Into<String>, credits: u32, capacity: u32) -> Result<Self, DomainError> {
        let name = name.into();
        require_text_field("course name", &name)?;
        Self::check_credits(credits)?;
        if capacity == 0 {
            return Err(DomainError::NotPositive { field: "capacity" });
        }
        Ok(Self {
            name,
            credits,
            capacity,
            instructor: None,
            roster: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] or [`DomainError::ContainsDelimiter`].
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        require_text_field("course name", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// # Errors
    ///
    /// Returns [`DomainError::OutOfRange`] outside `MIN_CREDITS..=MAX_CREDITS`.
    pub fn set_credits(&mut self, credits: u32) -> Result<(), DomainError> {
        Self::check_credits(credits)?;
        self.credits = credits;
        Ok(())
    }

    /// Checks a credit weight without touching any course.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OutOfRange`] outside `MIN_CREDITS..=MAX_CREDITS`.
    pub fn check_credits(credits: u32) -> Result<(), DomainError> {
        require_in_range("credits", credits, MIN_CREDITS, MAX_CREDITS)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Sets the seat limit.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotPositive`] for zero and
    /// [`DomainError::CapacityBelowEnrollment`] when `capacity` is below the
    /// current roster size.  Capacity, credits and roster are untouched on
    /// failure.
    pub fn set_capacity(&mut self, capacity: u32) -> Result<(), DomainError> {
        if capacity == 0 {
            return Err(DomainError::NotPositive { field: "capacity" });
        }
        if (capacity as usize) < self.roster.len() {
            return Err(DomainError::CapacityBelowEnrollment {
                requested: capacity,
                enrolled: self.roster.len(),
            });
        }
        self.capacity = capacity;
        Ok(())
    }

    /// Seats still free.
    pub fn open_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.roster.len() as u32)
    }

    /// Id of the assigned instructor, if any.
    pub fn instructor(&self) -> Option<&str> {
        self.instructor.as_deref()
    }

    /// `true` iff no instructor is assigned.
    pub fn can_add_faculty(&self) -> bool {
        self.instructor.is_none()
    }

    /// Assigns `faculty` as instructor.  Fails if one is already assigned.
    pub fn add_faculty(&mut self, faculty: &str) -> bool {
        if !self.can_add_faculty() {
            return false;
        }
        self.instructor = Some(faculty.to_string());
        true
    }

    /// Clears the instructor slot, returning whoever held it.
    pub fn remove_faculty(&mut self) -> Option<UserId> {
        self.instructor.take()
    }
}

impl Enrollable for Course {
    fn enrolled_students(&self) -> &[UserId] {
        &self.roster
    }

    fn can_enroll(&self, student: &str) -> bool {
        self.roster.len() < self.capacity as usize && !self.roster.iter().any(|s| s == student)
    }

    fn enroll(&mut self, student: &str) -> bool {
        if !self.can_enroll(student) {
            return false;
        }
        self.roster.push(student.to_string());
        true
    }

    fn drop(&mut self, user: &str) -> bool {
        match self.roster.iter().position(|s| s == user) {
            Some(idx) => {
                self.roster.remove(idx);
                true
            }
            None => false,
        }
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Canonical text form: `name,credits,capacity`.
impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.name, self.credits, self.capacity)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
