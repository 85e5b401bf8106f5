//! Session state machine: `LoggedOut → LoggedIn → LoggedOut`.
//!
//! At most one user is logged in per registry.  Every session-scoped call
//! dispatches on the session user's variant and performs both halves of the
//! enrollment relationship after checking both halves' preconditions.

use course_core::{verify_password, CourseHolder, Enrollable, Faculty, Profile, Student, UserId};
use tracing::{debug, info};

use crate::application::error::RegistryError;
use crate::application::registry::CourseRegistry;

/// Who is logged in, by id and variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUser {
    Student(UserId),
    Faculty(UserId),
}

impl SessionUser {
    pub fn id(&self) -> &str {
        match self {
            SessionUser::Student(id) | SessionUser::Faculty(id) => id,
        }
    }
}

/// Borrowed view of the session user.
#[derive(Debug, Clone, Copy)]
pub enum UserRef<'a> {
    Student(&'a Student),
    Faculty(&'a Faculty),
}

impl<'a> UserRef<'a> {
    pub fn profile(&self) -> &'a Profile {
        match *self {
            UserRef::Student(s) => s.profile(),
            UserRef::Faculty(f) => f.profile(),
        }
    }

    /// The user as a course holder, whichever variant it is.
    pub fn as_holder(&self) -> &'a dyn CourseHolder {
        match *self {
            UserRef::Student(s) => s,
            UserRef::Faculty(f) => f,
        }
    }
}

impl CourseRegistry {
    /// Logs in the student or faculty member with `id` whose stored
    /// credential matches `password`.
    ///
    /// Students are searched first; a student whose id matches but whose
    /// credential does not ends the search.  Fails without touching the
    /// session when someone is already logged in.
    pub fn login(&mut self, id: &str, password: &str) -> bool {
        if self.session.is_some() {
            debug!(id, "login refused: a session is already active");
            return false;
        }

        if let Some(student) = self.get_student(id) {
            if !verify_password(password, student.profile().password()) {
                debug!(id, "login refused: credential mismatch");
                return false;
            }
            self.session = Some(SessionUser::Student(id.to_string()));
        } else if let Some(faculty) = self.get_faculty(id) {
            if !verify_password(password, faculty.profile().password()) {
                debug!(id, "login refused: credential mismatch");
                return false;
            }
            self.session = Some(SessionUser::Faculty(id.to_string()));
        } else {
            debug!(id, "login refused: unknown id");
            return false;
        }

        info!(id, "user logged in");
        true
    }

    /// Clears the session.  Calling it while logged out is a no-op.
    pub fn logout(&mut self) {
        if let Some(user) = self.session.take() {
            info!(id = user.id(), "user logged out");
        }
    }

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<UserRef<'_>> {
        match self.session.as_ref()? {
            SessionUser::Student(id) => self.get_student(id).map(UserRef::Student),
            SessionUser::Faculty(id) => self.get_faculty(id).map(UserRef::Faculty),
        }
    }

    /// Names of the session user's courses, in the order they were added.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NoSession`] while logged out.
    pub fn list_user_courses(&self) -> Result<Vec<&str>, RegistryError> {
        let user = self.current_user().ok_or(RegistryError::NoSession)?;
        Ok(user.as_holder().course_names())
    }

    /// Adds the session user to the named course.
    ///
    /// A student must fit the course within their credit ceiling and the
    /// course must have a seat; a faculty member must have room in their load
    /// and the course must lack an instructor.  Both sides are checked before
    /// either is changed.  Returns `Ok(false)` when a check fails or the
    /// course does not exist.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NoSession`] while logged out.
    pub fn add_user_to_course(&mut self, course_name: &str) -> Result<bool, RegistryError> {
        let user = self.session.clone().ok_or(RegistryError::NoSession)?;
        let Some(ci) = self.course_index(course_name) else {
            debug!(course = course_name, "add refused: unknown course");
            return Ok(false);
        };

        match user {
            SessionUser::Student(id) => {
                let Some(si) = self.student_index(&id) else {
                    return Ok(false);
                };
                let course = &self.courses[ci];
                if !(self.students[si].can_add_course(course) && course.can_enroll(&id)) {
                    debug!(id = %id, course = course_name, "enrollment refused");
                    return Ok(false);
                }
                self.students[si].add_course(&self.courses[ci]);
                self.courses[ci].enroll(&id);
                info!(id = %id, course = course_name, "student enrolled");
            }
            SessionUser::Faculty(id) => {
                let Some(fi) = self.faculty_index(&id) else {
                    return Ok(false);
                };
                let course = &self.courses[ci];
                if !(self.faculty[fi].can_add_course(course) && course.can_add_faculty()) {
                    debug!(id = %id, course = course_name, "assignment refused");
                    return Ok(false);
                }
                self.faculty[fi].add_course(&self.courses[ci]);
                self.courses[ci].add_faculty(&id);
                info!(id = %id, course = course_name, "instructor assigned");
            }
        }
        Ok(true)
    }

    /// Removes the session user from the named course.
    ///
    /// A student is dropped from the roster and the course removed from their
    /// list; the result is whether the student held it.  A faculty member is
    /// detached only if they are the course's instructor.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NoSession`] while logged out.
    pub fn remove_user_from_course(&mut self, course_name: &str) -> Result<bool, RegistryError> {
        let user = self.session.clone().ok_or(RegistryError::NoSession)?;
        let Some(ci) = self.course_index(course_name) else {
            return Ok(false);
        };

        let removed = match user {
            SessionUser::Student(id) => {
                self.courses[ci].drop(&id);
                self.student_index(&id)
                    .is_some_and(|si| self.students[si].remove_course(course_name))
            }
            SessionUser::Faculty(id) => {
                if self.courses[ci].instructor() != Some(id.as_str()) {
                    debug!(id = %id, course = course_name, "not the instructor of this course");
                    return Ok(false);
                }
                self.courses[ci].remove_faculty();
                self.faculty_index(&id)
                    .is_some_and(|fi| self.faculty[fi].remove_course(course_name))
            }
        };
        if removed {
            info!(course = course_name, "user removed from course");
        }
        Ok(removed)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
