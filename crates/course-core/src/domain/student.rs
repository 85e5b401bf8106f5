//! Student: a user bounded by a credit-hour ceiling.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::course::Course;
use crate::domain::error::{require_in_range, DomainError};
use crate::domain::user::{CourseHolder, CourseLoad, HeldCourse, Profile};

/// Highest credit ceiling any student may have.
pub const MAX_CREDITS: u32 = 18;

/// A student and the courses they hold.
///
/// Invariant: the credit sum of held courses never exceeds `max_credits`.
/// Equality and hashing follow the identity fields only.
#[derive(Debug, Clone)]
pub struct Student {
    profile: Profile,
    max_credits: u32,
    courses: CourseLoad,
}

impl Student {
    /// Creates a student holding no courses.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OutOfRange`] if `max_credits` exceeds
    /// [`MAX_CREDITS`].
    pub fn new(profile: Profile, max_credits: u32) -> Result<Self, DomainError> {
        require_in_range("max credits", max_credits, 0, MAX_CREDITS)?;
        Ok(Self {
            profile,
            max_credits,
            courses: CourseLoad::default(),
        })
    }

    /// Creates a student with the full [`MAX_CREDITS`] ceiling.
    pub fn with_default_max(profile: Profile) -> Self {
        Self {
            profile,
            max_credits: MAX_CREDITS,
            courses: CourseLoad::default(),
        }
    }

    pub fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }

    pub fn max_credits(&self) -> u32 {
        self.max_credits
    }

    /// Credit sum of every held course.
    pub fn current_credits(&self) -> u32 {
        self.courses.total_credits()
    }

    /// Raises the credit ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OutOfRange`] outside `0..=MAX_CREDITS`, or
    /// [`DomainError::BoundLowered`] below the current ceiling.
    pub fn set_max_credits(&mut self, max_credits: u32) -> Result<(), DomainError> {
        require_in_range("max credits", max_credits, 0, MAX_CREDITS)?;
        if max_credits < self.max_credits {
            return Err(DomainError::BoundLowered {
                field: "max credits",
                current: self.max_credits,
                requested: max_credits,
            });
        }
        self.max_credits = max_credits;
        Ok(())
    }

    /// Whether the held course `name` could change to `credits` without
    /// breaking the ceiling.  A course that is not held always fits.
    pub fn can_reweigh_course(&self, name: &str, credits: u32) -> bool {
        match self.courses.as_slice().iter().find(|c| c.name() == name) {
            Some(held) => self.current_credits() - held.credits() + credits <= self.max_credits,
            None => true,
        }
    }

    /// Updates the cached credit weight of a held course.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CreditLimitExceeded`] if the new weight would
    /// push the student past their ceiling; nothing changes in that case.
    pub fn reweigh_course(&mut self, name: &str, credits: u32) -> Result<(), DomainError> {
        if !self.can_reweigh_course(name, credits) {
            return Err(DomainError::CreditLimitExceeded {
                student: self.profile.id().to_string(),
                max_credits: self.max_credits,
            });
        }
        if let Some(held) = self.courses.get_mut(name) {
            held.set_credits(credits);
        }
        Ok(())
    }
}

impl CourseHolder for Student {
    fn profile(&self) -> &Profile {
        &self.profile
    }

    fn courses(&self) -> &[HeldCourse] {
        self.courses.as_slice()
    }

    /// Rejects a course already held (by name), then checks that the credit
    /// sum including `course` stays within `max_credits`.
    fn can_add_course(&self, course: &Course) -> bool {
        if self.courses.holds(course.name()) {
            return false;
        }
        self.current_credits() + course.credits() <= self.max_credits
    }

    fn add_course(&mut self, course: &Course) -> bool {
        if !self.can_add_course(course) {
            return false;
        }
        self.courses.push(course);
        true
    }

    fn remove_course(&mut self, name: &str) -> bool {
        self.courses.remove(name)
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.profile == other.profile
    }
}

impl Eq for Student {}

impl Hash for Student {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.profile.hash(state);
    }
}

/// Canonical text form: `first,last,id,email,hash,maxCredits[,course]*`.
impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.profile, self.max_credits)?;
        for course in self.courses.as_slice() {
            write!(f, ",{}", course.name())?;
        }
        Ok(())
    }
}
