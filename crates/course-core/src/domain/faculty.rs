//! Faculty: a user bounded by a teaching-load course count.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::course::Course;
use crate::domain::error::{require_in_range, DomainError};
use crate::domain::user::{CourseHolder, CourseLoad, HeldCourse, Profile};

/// Smallest teaching load a faculty member may be configured with.
pub const MIN_COURSES: u32 = 1;
/// Largest teaching load a faculty member may be configured with.
pub const MAX_COURSES: u32 = 3;

/// A faculty member and the courses they teach.
///
/// Invariant: the number of held courses never exceeds `max_courses`.
#[derive(Debug, Clone)]
pub struct Faculty {
    profile: Profile,
    max_courses: u32,
    courses: CourseLoad,
}

impl Faculty {
    /// # Errors
    ///
    /// Returns [`DomainError::OutOfRange`] if `max_courses` is outside
    /// `MIN_COURSES..=MAX_COURSES`.
    pub fn new(profile: Profile, max_courses: u32) -> Result<Self, DomainError> {
        require_in_range("max courses", max_courses, MIN_COURSES, MAX_COURSES)?;
        Ok(Self {
            profile,
            max_courses,
            courses: CourseLoad::default(),
        })
    }

    pub fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }

    pub fn max_courses(&self) -> u32 {
        self.max_courses
    }

    /// Raises the teaching load.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OutOfRange`] outside the legal range, or
    /// [`DomainError::BoundLowered`] below the current load.
    pub fn set_max_courses(&mut self, max_courses: u32) -> Result<(), DomainError> {
        require_in_range("max courses", max_courses, MIN_COURSES, MAX_COURSES)?;
        if max_courses < self.max_courses {
            return Err(DomainError::BoundLowered {
                field: "max courses",
                current: self.max_courses,
                requested: max_courses,
            });
        }
        self.max_courses = max_courses;
        Ok(())
    }
}

impl CourseHolder for Faculty {
    fn profile(&self) -> &Profile {
        &self.profile
    }

    fn courses(&self) -> &[HeldCourse] {
        self.courses.as_slice()
    }

    fn can_add_course(&self, course: &Course) -> bool {
        (self.courses.len() as u32) < self.max_courses && !self.courses.holds(course.name())
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

impl PartialEq for Faculty {
    fn eq(&self, other: &Self) -> bool {
        self.profile == other.profile
    }
}

impl Eq for Faculty {}

impl Hash for Faculty {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.profile.hash(state);
    }
}

/// Canonical text form: `first,last,id,email,hash,maxCourses[,course]*`.
impl fmt::Display for Faculty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.profile, self.max_courses)?;
        for course in self.courses.as_slice() {
            write!(f, ",{}", course.name())?;
        }
        Ok(())
    }
}
