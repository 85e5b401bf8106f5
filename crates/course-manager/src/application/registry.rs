//! CourseRegistry: the catalog, the user lists, and every two-sided mutation.
//!
//! Courses know their roster and instructor by id, and users know their
//! courses by name.  The registry is the one place that updates both sides,
//! so after every public call the following hold:
//!
//! - a student holds course C iff C's roster lists that student;
//! - a faculty member holds C iff C's instructor is that faculty member;
//! - no roster exceeds its course's capacity;
//! - no student exceeds their credit ceiling, and no faculty member their load.
//!
//! Session handling lives in [`super::session`] and record-file handling in
//! [`super::persistence`]; both extend this same type.

use std::path::PathBuf;
use std::sync::Arc;

use course_core::{Course, CourseHolder, DomainError, Enrollable, Faculty, Student};
use thiserror::Error;
use tracing::debug;

use crate::application::error::RegistryError;
use crate::application::record_store::RecordStore;
use crate::application::session::SessionUser;

/// Remembered source locations of the three record files.
#[derive(Debug, Clone, Default)]
pub(super) struct RecordFiles {
    pub(super) courses: Option<PathBuf>,
    pub(super) students: Option<PathBuf>,
    pub(super) faculty: Option<PathBuf>,
}

/// A broken relationship or bound found by [`CourseRegistry::check_invariants`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("course {course} has {enrolled} students but capacity {capacity}")]
    RosterOverCapacity {
        course: String,
        enrolled: usize,
        capacity: u32,
    },

    #[error("student {student} holds {credits} credits, above the ceiling of {max_credits}")]
    CreditsOverLimit {
        student: String,
        credits: u32,
        max_credits: u32,
    },

    #[error("faculty {faculty} teaches {courses} courses, above the load of {max_courses}")]
    LoadOverLimit {
        faculty: String,
        courses: usize,
        max_courses: u32,
    },

    #[error("student {student} and course {course} disagree about enrollment")]
    RosterMismatch { course: String, student: String },

    #[error("faculty {faculty} and course {course} disagree about the instructor")]
    InstructorMismatch { course: String, faculty: String },

    #[error("student {student} caches {cached} credits for {course}, which carries {actual}")]
    StaleCredits {
        student: String,
        course: String,
        cached: u32,
        actual: u32,
    },

    #[error("{user} holds {course}, which is not in the catalog")]
    UnknownCourse { user: String, course: String },
}

/// The registry of courses, students and faculty for one process.
///
/// Owned by the caller and passed by reference; there is no global instance.
/// Every operation is synchronous and runs to completion.  A caller sharing a
/// registry between threads must serialize access itself (e.g. one `Mutex`
/// around the whole registry).
pub struct CourseRegistry {
    pub(super) courses: Vec<Course>,
    pub(super) students: Vec<Student>,
    pub(super) faculty: Vec<Faculty>,
    pub(super) session: Option<SessionUser>,
    pub(super) files: RecordFiles,
    pub(super) store: Arc<dyn RecordStore>,
}

impl CourseRegistry {
    /// Creates an empty registry that loads and saves through `store`.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            courses: Vec::new(),
            students: Vec::new(),
            faculty: Vec::new(),
            session: None,
            files: RecordFiles::default(),
            store,
        }
    }

    // ── Catalog ──────────────────────────────────────────────────────────────

    /// Registers `course` unless a course with the same name exists.
    ///
    /// The course enters the catalog detached: any roster or instructor it
    /// carries is discarded, since only the registry may link courses and
    /// users.  Returns `false` on a duplicate name.
    pub fn add_course(&mut self, mut course: Course) -> bool {
        if self.courses.contains(&course) {
            debug!(course = course.name(), "duplicate course ignored");
            return false;
        }
        course.remove_faculty();
        let roster: Vec<String> = course.enrolled_students().to_vec();
        for id in &roster {
            course.drop(id);
        }
        self.courses.push(course);
        true
    }

    /// Removes the named course, detaching it from its instructor and every
    /// enrolled student first.  Returns `false` if no such course exists.
    pub fn remove_course(&mut self, name: &str) -> bool {
        let Some(idx) = self.course_index(name) else {
            return false;
        };
        let course = self.courses.remove(idx);

        if let Some(instructor) = course.instructor() {
            if let Some(faculty) = self.faculty.iter_mut().find(|f| f.id() == instructor) {
                faculty.remove_course(name);
            }
        }
        for student in self
            .students
            .iter_mut()
            .filter(|s| course.enrolled_students().iter().any(|id| id == s.id()))
        {
            student.remove_course(name);
        }
        debug!(course = name, "course removed from catalog");
        true
    }

    /// Looks a course up by name.  Absence is not an error.
    pub fn get_course_by_name(&self, name: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.name() == name)
    }

    /// Every course, in registration order.
    pub fn list_all_courses(&self) -> &[Course] {
        &self.courses
    }

    /// Changes a course's seat limit.  Returns `Ok(false)` for an unknown
    /// course.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotPositive`] for zero and
    /// [`DomainError::CapacityBelowEnrollment`] below the current roster.
    pub fn set_course_capacity(
        &mut self,
        name: &str,
        capacity: u32,
    ) -> Result<bool, RegistryError> {
        let Some(idx) = self.course_index(name) else {
            return Ok(false);
        };
        self.courses[idx].set_capacity(capacity)?;
        Ok(true)
    }

    /// Changes a course's credit weight and refreshes the weight every
    /// enrolled student holds for it.  Returns `Ok(false)` for an unknown
    /// course.
    ///
    /// # Errors
    ///
    /// [`DomainError::OutOfRange`] outside 1–4, or
    /// [`DomainError::CreditLimitExceeded`] naming the first enrolled student
    /// the new weight would push past their ceiling.  Nothing changes on
    /// error.
    pub fn set_course_credits(&mut self, name: &str, credits: u32) -> Result<bool, RegistryError> {
        let Some(idx) = self.course_index(name) else {
            return Ok(false);
        };
        Course::check_credits(credits)?;

        let roster = self.courses[idx].enrolled_students();
        if let Some(blocked) = self
            .students
            .iter()
            .filter(|s| roster.iter().any(|id| id == s.id()))
            .find(|s| !s.can_reweigh_course(name, credits))
        {
            return Err(DomainError::CreditLimitExceeded {
                student: blocked.id().to_string(),
                max_credits: blocked.max_credits(),
            }
            .into());
        }

        self.courses[idx].set_credits(credits)?;
        let roster = self.courses[idx].enrolled_students();
        for student in self
            .students
            .iter_mut()
            .filter(|s| roster.iter().any(|id| id == s.id()))
        {
            student.reweigh_course(name, credits)?;
        }
        Ok(true)
    }

    // ── Users ────────────────────────────────────────────────────────────────

    /// Registers `student` unless a student with the same id exists.
    ///
    /// Courses the student already holds are re-attached through the catalog
    /// as a unit: every one must exist, fit the student's ceiling, and have a
    /// free seat, or the student is not registered at all.
    pub fn add_student(&mut self, mut student: Student) -> bool {
        let names: Vec<String> = student
            .course_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        for name in &names {
            student.remove_course(name);
        }
        self.admit_student(student, &names)
    }

    /// Registers `faculty` unless a faculty member with the same id exists.
    /// Held courses are re-attached as a unit, as for [`Self::add_student`].
    pub fn add_faculty(&mut self, mut faculty: Faculty) -> bool {
        let names: Vec<String> = faculty
            .course_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        for name in &names {
            faculty.remove_course(name);
        }
        self.admit_faculty(faculty, &names)
    }

    pub fn get_student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == id)
    }

    pub fn get_faculty(&self, id: &str) -> Option<&Faculty> {
        self.faculty.iter().find(|f| f.id() == id)
    }

    /// Every student, in registration order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Every faculty member, in registration order.
    pub fn faculty(&self) -> &[Faculty] {
        &self.faculty
    }

    /// Resets the registry to its freshly constructed state: no courses, no
    /// users, no session, no remembered file names.
    pub fn clear_data(&mut self) {
        self.courses.clear();
        self.students.clear();
        self.faculty.clear();
        self.session = None;
        self.files = RecordFiles::default();
    }

    /// Verifies every relationship and bound across the registry, returning
    /// the first violation found.
    ///
    /// # Errors
    ///
    /// The first [`InvariantViolation`] encountered.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for course in &self.courses {
            let enrolled = course.enrolled_students().len();
            if enrolled > course.capacity() as usize {
                return Err(InvariantViolation::RosterOverCapacity {
                    course: course.name().to_string(),
                    enrolled,
                    capacity: course.capacity(),
                });
            }
            for id in course.enrolled_students() {
                if !self.get_student(id).is_some_and(|s| s.holds(course.name())) {
                    return Err(InvariantViolation::RosterMismatch {
                        course: course.name().to_string(),
                        student: id.clone(),
                    });
                }
            }
            if let Some(id) = course.instructor() {
                if !self.get_faculty(id).is_some_and(|f| f.holds(course.name())) {
                    return Err(InvariantViolation::InstructorMismatch {
                        course: course.name().to_string(),
                        faculty: id.to_string(),
                    });
                }
            }
        }

        for student in &self.students {
            if student.current_credits() > student.max_credits() {
                return Err(InvariantViolation::CreditsOverLimit {
                    student: student.id().to_string(),
                    credits: student.current_credits(),
                    max_credits: student.max_credits(),
                });
            }
            for held in student.courses() {
                let Some(course) = self.get_course_by_name(held.name()) else {
                    return Err(InvariantViolation::UnknownCourse {
                        user: student.id().to_string(),
                        course: held.name().to_string(),
                    });
                };
                if !course.enrolled_students().iter().any(|id| id == student.id()) {
                    return Err(InvariantViolation::RosterMismatch {
                        course: course.name().to_string(),
                        student: student.id().to_string(),
                    });
                }
                if held.credits() != course.credits() {
                    return Err(InvariantViolation::StaleCredits {
                        student: student.id().to_string(),
                        course: course.name().to_string(),
                        cached: held.credits(),
                        actual: course.credits(),
                    });
                }
            }
        }

        for faculty in &self.faculty {
            let courses = faculty.courses().len();
            if courses > faculty.max_courses() as usize {
                return Err(InvariantViolation::LoadOverLimit {
                    faculty: faculty.id().to_string(),
                    courses,
                    max_courses: faculty.max_courses(),
                });
            }
            for held in faculty.courses() {
                let Some(course) = self.get_course_by_name(held.name()) else {
                    return Err(InvariantViolation::UnknownCourse {
                        user: faculty.id().to_string(),
                        course: held.name().to_string(),
                    });
                };
                if course.instructor() != Some(faculty.id()) {
                    return Err(InvariantViolation::InstructorMismatch {
                        course: course.name().to_string(),
                        faculty: faculty.id().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    // ── Internal helpers shared with session and persistence ─────────────────

    pub(super) fn course_index(&self, name: &str) -> Option<usize> {
        self.courses.iter().position(|c| c.name() == name)
    }

    pub(super) fn student_index(&self, id: &str) -> Option<usize> {
        self.students.iter().position(|s| s.id() == id)
    }

    pub(super) fn faculty_index(&self, id: &str) -> Option<usize> {
        self.faculty.iter().position(|f| f.id() == id)
    }

    /// Registers a student holding nothing yet and enrolls it in `names`.
    ///
    /// All courses are checked against the growing load and their own seat
    /// limit before any roster is touched; one failure rejects the student.
    pub(super) fn admit_student(&mut self, mut student: Student, names: &[String]) -> bool {
        if self.student_index(student.id()).is_some() {
            debug!(id = student.id(), "duplicate student ignored");
            return false;
        }
        let mut targets = Vec::with_capacity(names.len());
        for name in names {
            let Some(idx) = self.course_index(name) else {
                debug!(id = student.id(), course = %name, "student references unknown course");
                return false;
            };
            let course = &self.courses[idx];
            if !course.can_enroll(student.id()) || !student.add_course(course) {
                debug!(id = student.id(), course = %name, "student does not fit course");
                return false;
            }
            targets.push(idx);
        }
        for idx in targets {
            self.courses[idx].enroll(student.id());
        }
        self.students.push(student);
        true
    }

    /// Registers a faculty member holding nothing yet and assigns them to
    /// `names`, all or nothing.
    pub(super) fn admit_faculty(&mut self, mut faculty: Faculty, names: &[String]) -> bool {
        if self.faculty_index(faculty.id()).is_some() {
            debug!(id = faculty.id(), "duplicate faculty ignored");
            return false;
        }
        let mut targets = Vec::with_capacity(names.len());
        for name in names {
            let Some(idx) = self.course_index(name) else {
                debug!(id = faculty.id(), course = %name, "faculty references unknown course");
                return false;
            };
            let course = &self.courses[idx];
            if !course.can_add_faculty() || !faculty.add_course(course) {
                debug!(id = faculty.id(), course = %name, "faculty cannot take course");
                return false;
            }
            targets.push(idx);
        }
        for idx in targets {
            self.courses[idx].add_faculty(faculty.id());
        }
        self.faculty.push(faculty);
        true
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::record_store::MockRecordStore;
    use course_core::{hash_password, ErrorKind, Profile};

    fn registry() -> CourseRegistry {
        CourseRegistry::new(Arc::new(MockRecordStore::new()))
    }

    fn course(name: &str, credits: u32, capacity: u32) -> Course {
        Course::new(name, credits, capacity).unwrap()
    }

    fn profile(id: &str) -> Profile {
        Profile::new("First", "Last", id, format!("{id}@ncsu.edu"), hash_password("pw")).unwrap()
    }

    fn student(id: &str, max_credits: u32) -> Student {
        Student::new(profile(id), max_credits).unwrap()
    }

    fn faculty(id: &str, max_courses: u32) -> Faculty {
        Faculty::new(profile(id), max_courses).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // ── catalog ───────────────────────────────────────────────────────────────

    #[test]
    fn test_add_course_rejects_duplicate_name() {
        // Arrange
        let mut reg = registry();
        assert!(reg.add_course(course("CSC216", 3, 10)));

        // Act
        let added = reg.add_course(course("CSC216", 4, 2));

        // Assert
        assert!(!added);
        assert_eq!(reg.list_all_courses().len(), 1);
        assert_eq!(reg.get_course_by_name("CSC216").unwrap().credits(), 3);
    }

    #[test]
    fn test_add_course_discards_foreign_associations() {
        let mut reg = registry();
        let mut c = course("CSC216", 3, 10);
        c.enroll("ghost");
        c.add_faculty("phantom");

        reg.add_course(c);

        let stored = reg.get_course_by_name("CSC216").unwrap();
        assert!(stored.enrolled_students().is_empty());
        assert!(stored.instructor().is_none());
        assert!(reg.check_invariants().is_ok());
    }

    #[test]
    fn test_get_course_by_name_absent_is_none() {
        let reg = registry();
        assert!(reg.get_course_by_name("CSC999").is_none());
    }

    #[test]
    fn test_remove_course_cascades_to_students_and_instructor() {
        // Arrange
        let mut reg = registry();
        reg.add_course(course("CSC216", 3, 10));
        reg.add_course(course("CSC226", 3, 10));
        assert!(reg.admit_student(student("alice", 18), &names(&["CSC216", "CSC226"])));
        assert!(reg.admit_student(student("bob", 18), &names(&["CSC216"])));
        assert!(reg.admit_faculty(faculty("fmeadow", 2), &names(&["CSC216"])));

        // Act
        let removed = reg.remove_course("CSC216");

        // Assert
        assert!(removed);
        assert!(reg.get_course_by_name("CSC216").is_none());
        assert_eq!(reg.get_student("alice").unwrap().course_names(), vec!["CSC226"]);
        assert!(reg.get_student("bob").unwrap().courses().is_empty());
        assert!(reg.get_faculty("fmeadow").unwrap().courses().is_empty());
        assert!(reg.check_invariants().is_ok());
    }

    #[test]
    fn test_remove_course_absent_returns_false() {
        let mut reg = registry();
        assert!(!reg.remove_course("CSC999"));
    }

    #[test]
    fn test_set_course_capacity_below_roster_fails_with_capacity_kind() {
        let mut reg = registry();
        reg.add_course(course("CSC216", 3, 5));
        reg.admit_student(student("alice", 18), &names(&["CSC216"]));
        reg.admit_student(student("bob", 18), &names(&["CSC216"]));

        let err = reg.set_course_capacity("CSC216", 1).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Capacity);
        assert_eq!(reg.get_course_by_name("CSC216").unwrap().capacity(), 5);
    }

    #[test]
    fn test_set_course_capacity_unknown_course_is_false() {
        let mut reg = registry();
        assert!(!reg.set_course_capacity("CSC999", 5).unwrap());
    }

    #[test]
    fn test_set_course_credits_refreshes_student_weights() {
        let mut reg = registry();
        reg.add_course(course("CSC216", 3, 5));
        reg.admit_student(student("alice", 18), &names(&["CSC216"]));

        assert!(reg.set_course_credits("CSC216", 4).unwrap());

        assert_eq!(reg.get_course_by_name("CSC216").unwrap().credits(), 4);
        assert_eq!(reg.get_student("alice").unwrap().current_credits(), 4);
        assert!(reg.check_invariants().is_ok());
    }

    #[test]
    fn test_set_course_credits_rejects_overloading_a_student() {
        // Arrange: alice is at her 6-credit ceiling.
        let mut reg = registry();
        reg.add_course(course("CSC216", 3, 5));
        reg.add_course(course("CSC226", 3, 5));
        reg.admit_student(student("alice", 6), &names(&["CSC216", "CSC226"]));

        // Act
        let err = reg.set_course_credits("CSC216", 4).unwrap_err();

        // Assert
        assert!(matches!(
            err,
            RegistryError::Domain(DomainError::CreditLimitExceeded { ref student, max_credits: 6 })
                if student == "alice"
        ));
        assert_eq!(reg.get_course_by_name("CSC216").unwrap().credits(), 3);
        assert_eq!(reg.get_student("alice").unwrap().current_credits(), 6);
    }

    #[test]
    fn test_set_course_credits_rejects_out_of_range() {
        let mut reg = registry();
        reg.add_course(course("CSC216", 3, 5));
        let err = reg.set_course_credits("CSC216", 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    // ── users ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_add_student_deduplicates_by_id() {
        let mut reg = registry();
        assert!(reg.add_student(student("alice", 18)));
        assert!(!reg.add_student(student("alice", 12)));
        assert_eq!(reg.students().len(), 1);
        assert_eq!(reg.get_student("alice").unwrap().max_credits(), 18);
    }

    #[test]
    fn test_add_faculty_deduplicates_by_id() {
        let mut reg = registry();
        assert!(reg.add_faculty(faculty("fmeadow", 2)));
        assert!(!reg.add_faculty(faculty("fmeadow", 3)));
        assert_eq!(reg.faculty().len(), 1);
    }

    #[test]
    fn test_add_student_attaches_held_courses_through_catalog() {
        // Arrange: the student arrives holding a course the registry knows.
        let mut reg = registry();
        let c = course("CSC216", 3, 10);
        reg.add_course(c.clone());
        let mut s = student("alice", 18);
        s.add_course(&c);

        // Act
        let added = reg.add_student(s);

        // Assert
        assert!(added);
        let stored = reg.get_course_by_name("CSC216").unwrap();
        assert_eq!(stored.enrolled_students(), ["alice"]);
        assert!(reg.check_invariants().is_ok());
    }

    #[test]
    fn test_add_student_holding_unknown_course_is_rejected_whole() {
        let mut reg = registry();
        reg.add_course(course("CSC216", 3, 10));
        let mut s = student("alice", 18);
        s.add_course(&course("CSC216", 3, 10));
        s.add_course(&course("CSC999", 3, 10));

        assert!(!reg.add_student(s));
        assert!(reg.students().is_empty());
        assert!(reg
            .get_course_by_name("CSC216")
            .unwrap()
            .enrolled_students()
            .is_empty());
    }

    #[test]
    fn test_admit_student_rejects_line_when_course_full() {
        let mut reg = registry();
        reg.add_course(course("CSC216", 3, 10));
        reg.add_course(course("CSC230", 3, 1));
        reg.admit_student(student("bob", 18), &names(&["CSC230"]));

        let admitted = reg.admit_student(student("alice", 18), &names(&["CSC216", "CSC230"]));

        assert!(!admitted);
        assert!(reg.get_student("alice").is_none());
        assert!(reg
            .get_course_by_name("CSC216")
            .unwrap()
            .enrolled_students()
            .is_empty());
    }

    #[test]
    fn test_admit_faculty_rejects_course_with_instructor() {
        let mut reg = registry();
        reg.add_course(course("CSC216", 3, 10));
        reg.admit_faculty(faculty("fmeadow", 3), &names(&["CSC216"]));

        assert!(!reg.admit_faculty(faculty("bbrewer", 3), &names(&["CSC216"])));
        assert_eq!(
            reg.get_course_by_name("CSC216").unwrap().instructor(),
            Some("fmeadow")
        );
    }

    #[test]
    fn test_admit_faculty_rejects_more_courses_than_load() {
        let mut reg = registry();
        reg.add_course(course("CSC216", 3, 10));
        reg.add_course(course("CSC226", 3, 10));

        assert!(!reg.admit_faculty(faculty("fmeadow", 1), &names(&["CSC216", "CSC226"])));
        assert!(reg.get_course_by_name("CSC216").unwrap().can_add_faculty());
    }

    #[test]
    fn test_clear_data_resets_everything() {
        let mut reg = registry();
        reg.add_course(course("CSC216", 3, 10));
        reg.add_student(student("alice", 18));
        reg.set_course_file("courses.txt");

        reg.clear_data();

        assert!(reg.list_all_courses().is_empty());
        assert!(reg.students().is_empty());
        assert!(reg.faculty().is_empty());
        assert!(reg.current_user().is_none());
        assert!(reg.course_file().is_none());
    }

    // ── invariants ────────────────────────────────────────────────────────────

    #[test]
    fn test_check_invariants_passes_on_empty_registry() {
        assert_eq!(registry().check_invariants(), Ok(()));
    }

    #[test]
    fn test_check_invariants_detects_one_sided_enrollment() {
        // Arrange: reach past the registry to break symmetry on purpose.
        let mut reg = registry();
        reg.add_course(course("CSC216", 3, 10));
        reg.add_student(student("alice", 18));
        reg.courses[0].enroll("alice");

        // Act / Assert
        assert_eq!(
            reg.check_invariants(),
            Err(InvariantViolation::RosterMismatch {
                course: "CSC216".to_string(),
                student: "alice".to_string(),
            })
        );
    }

    #[test]
    fn test_check_invariants_detects_one_sided_instructor() {
        let mut reg = registry();
        reg.add_course(course("CSC216", 3, 10));
        reg.add_faculty(faculty("fmeadow", 1));
        let c = reg.courses[0].clone();
        reg.faculty[0].add_course(&c);

        assert!(matches!(
            reg.check_invariants(),
            Err(InvariantViolation::InstructorMismatch { .. })
        ));
    }
}
