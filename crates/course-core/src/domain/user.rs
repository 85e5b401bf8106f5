//! Shared user identity and the "can hold courses" capability.
//!
//! Students and faculty share the same five identity fields, kept in a
//! [`Profile`].  What differs between them is the rule deciding whether one
//! more course fits their load; that rule lives behind the [`CourseHolder`]
//! trait, implemented once per variant.
//!
//! A holder only records *which* courses it holds.  It never touches the
//! course's own roster or instructor slot: keeping both sides in step is the
//! registry's job.

use std::fmt;

use crate::domain::course::Course;
use crate::domain::error::{require_text_field, DomainError};

/// Identifier of a student or faculty member (e.g. a unity id).
pub type UserId = String;

/// Identity and credential fields common to every user.
///
/// Equality and hashing are structural over all five fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Profile {
    first_name: String,
    last_name: String,
    id: UserId,
    email: String,
    password: String,
}

impl Profile {
    /// Creates a validated profile.
    ///
    /// `password` is the already-hashed credential; plaintext never reaches
    /// this type.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] for any empty field,
    /// [`DomainError::ContainsDelimiter`] for a field holding the record
    /// separator, and [`DomainError::InvalidEmail`] when the email fails the
    /// naive shape check.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        id: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let id = id.into();
        let email = email.into();
        let password = password.into();

        require_text_field("first name", &first_name)?;
        require_text_field("last name", &last_name)?;
        require_text_field("id", &id)?;
        validate_email(&email)?;
        require_text_field("password", &password)?;

        Ok(Self {
            first_name,
            last_name,
            id,
            email,
            password,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// The identifier.  It has no setter: it never changes after creation.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// The hashed credential.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] or [`DomainError::ContainsDelimiter`].
    pub fn set_first_name(&mut self, first_name: impl Into<String>) -> Result<(), DomainError> {
        let first_name = first_name.into();
        require_text_field("first name", &first_name)?;
        self.first_name = first_name;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] or [`DomainError::ContainsDelimiter`].
    pub fn set_last_name(&mut self, last_name: impl Into<String>) -> Result<(), DomainError> {
        let last_name = last_name.into();
        require_text_field("last name", &last_name)?;
        self.last_name = last_name;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`], [`DomainError::ContainsDelimiter`]
    /// or [`DomainError::InvalidEmail`].
    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), DomainError> {
        let email = email.into();
        validate_email(&email)?;
        self.email = email;
        Ok(())
    }

    /// Replaces the stored credential with another already-hashed value.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] or [`DomainError::ContainsDelimiter`].
    pub fn set_password(&mut self, password: impl Into<String>) -> Result<(), DomainError> {
        let password = password.into();
        require_text_field("password", &password)?;
        self.password = password;
        Ok(())
    }
}

/// Canonical text form: `firstName,lastName,id,email,hashedPassword`.
impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.first_name, self.last_name, self.id, self.email, self.password
        )
    }
}

/// Naive email check: an `@` must exist, and the last `.` must come after it.
fn validate_email(email: &str) -> Result<(), DomainError> {
    require_text_field("email", email)?;
    match (email.find('@'), email.rfind('.')) {
        (Some(at), Some(dot)) if dot > at => Ok(()),
        _ => Err(DomainError::InvalidEmail(email.to_string())),
    }
}

/// A course as seen from the holder's side: its name and credit weight.
///
/// The weight is cached so a student can sum its load without reaching back
/// into the catalog; the registry refreshes it whenever a course is
/// re-weighted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeldCourse {
    name: String,
    credits: u32,
}

impl HeldCourse {
    pub fn of(course: &Course) -> Self {
        Self {
            name: course.name().to_string(),
            credits: course.credits(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub(crate) fn set_credits(&mut self, credits: u32) {
        self.credits = credits;
    }
}

/// Ordered list of held courses (insertion order = enrollment order).
#[derive(Debug, Clone, Default)]
pub(crate) struct CourseLoad {
    courses: Vec<HeldCourse>,
}

impl CourseLoad {
    pub(crate) fn as_slice(&self) -> &[HeldCourse] {
        &self.courses
    }

    pub(crate) fn len(&self) -> usize {
        self.courses.len()
    }

    pub(crate) fn holds(&self, name: &str) -> bool {
        self.courses.iter().any(|c| c.name == name)
    }

    pub(crate) fn total_credits(&self) -> u32 {
        self.courses.iter().map(|c| c.credits).sum()
    }

    pub(crate) fn push(&mut self, course: &Course) {
        self.courses.push(HeldCourse::of(course));
    }

    pub(crate) fn remove(&mut self, name: &str) -> bool {
        match self.courses.iter().position(|c| c.name == name) {
            Some(idx) => {
                self.courses.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut HeldCourse> {
        self.courses.iter_mut().find(|c| c.name == name)
    }
}

/// The capability shared by students and faculty: holding courses.
///
/// Only `can_add_course` differs meaningfully between variants; the add and
/// remove paths are guarded by it and touch the holder alone.
pub trait CourseHolder {
    /// Identity of the holder.
    fn profile(&self) -> &Profile;

    /// Held courses in the order they were added.
    fn courses(&self) -> &[HeldCourse];

    /// Pure predicate: whether `course` fits this holder's load.  Never mutates.
    fn can_add_course(&self, course: &Course) -> bool;

    /// Adds `course` if [`CourseHolder::can_add_course`] holds.  Returns
    /// whether the add occurred.
    fn add_course(&mut self, course: &Course) -> bool;

    /// Removes the named course if held.  An unknown name yields `false`.
    fn remove_course(&mut self, name: &str) -> bool;

    /// The holder's identifier.
    fn id(&self) -> &str {
        self.profile().id()
    }

    /// Whether the named course is currently held.
    fn holds(&self, name: &str) -> bool {
        self.courses().iter().any(|c| c.name() == name)
    }

    /// Names of held courses, in order.
    fn course_names(&self) -> Vec<&str> {
        self.courses().iter().map(HeldCourse::name).collect()
    }
}
