//! Loading and saving the three record files.
//!
//! Loading remembers the file name, pulls raw lines from the
//! [`RecordStore`](crate::RecordStore), and decodes them with the
//! `course_core` codec.  A line that is malformed, names a course the catalog
//! lacks, or does not fit its user's load or the course's limits is skipped
//! in full.  Only a missing or unreadable file fails the whole load.
//!
//! Courses must be loaded before the users that reference them.

use std::path::{Path, PathBuf};

use course_core::records::codec::{decode_course, decode_faculty, decode_student, encode_lines};
use tracing::{debug, info, warn};

use crate::application::error::RegistryError;
use crate::application::registry::CourseRegistry;

impl CourseRegistry {
    /// Loads courses from `path`, registering each new one.  Returns how many
    /// were added.
    ///
    /// # Errors
    ///
    /// [`RegistryError::FileNotFound`] or [`RegistryError::ReadFailed`].
    pub fn load_courses(&mut self, path: impl Into<PathBuf>) -> Result<usize, RegistryError> {
        let path = path.into();
        self.files.courses = Some(path.clone());
        let lines = self.store.read_lines(&path)?;

        let mut added = 0;
        for (number, line) in lines.iter().enumerate() {
            match decode_course(line) {
                Ok(course) => {
                    if self.add_course(course) {
                        added += 1;
                    }
                }
                Err(e) => debug!(line = number + 1, error = %e, "skipping course record"),
            }
        }
        info!(path = %path.display(), added, total = lines.len(), "courses loaded");
        Ok(added)
    }

    /// Loads students from `path`, enrolling each in the courses its line
    /// lists.  Returns how many were added.
    ///
    /// # Errors
    ///
    /// [`RegistryError::FileNotFound`] or [`RegistryError::ReadFailed`].
    pub fn load_students(&mut self, path: impl Into<PathBuf>) -> Result<usize, RegistryError> {
        let path = path.into();
        self.files.students = Some(path.clone());
        let lines = self.store.read_lines(&path)?;

        let mut added = 0;
        for (number, line) in lines.iter().enumerate() {
            match decode_student(line) {
                Ok(record) => {
                    if self.admit_student(record.student, &record.course_names) {
                        added += 1;
                    } else {
                        debug!(line = number + 1, "student record rejected by registry");
                    }
                }
                Err(e) => debug!(line = number + 1, error = %e, "skipping student record"),
            }
        }
        info!(path = %path.display(), added, total = lines.len(), "students loaded");
        Ok(added)
    }

    /// Loads faculty from `path`, assigning each to the courses its line
    /// lists.  Returns how many were added.
    ///
    /// # Errors
    ///
    /// [`RegistryError::FileNotFound`] or [`RegistryError::ReadFailed`].
    pub fn load_faculty(&mut self, path: impl Into<PathBuf>) -> Result<usize, RegistryError> {
        let path = path.into();
        self.files.faculty = Some(path.clone());
        let lines = self.store.read_lines(&path)?;

        let mut added = 0;
        for (number, line) in lines.iter().enumerate() {
            match decode_faculty(line) {
                Ok(record) => {
                    if self.admit_faculty(record.faculty, &record.course_names) {
                        added += 1;
                    } else {
                        debug!(line = number + 1, "faculty record rejected by registry");
                    }
                }
                Err(e) => debug!(line = number + 1, error = %e, "skipping faculty record"),
            }
        }
        info!(path = %path.display(), added, total = lines.len(), "faculty loaded");
        Ok(added)
    }

    /// Writes every course to the remembered course file.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NoRecordFile`] if no course file is set, or
    /// [`RegistryError::WriteFailed`].
    pub fn save_courses(&self) -> Result<(), RegistryError> {
        let path = self.files.courses.as_deref().ok_or(RegistryError::NoRecordFile("course"))?;
        self.write_records(path, encode_lines(&self.courses), "courses")
    }

    /// Writes every student, with their course names, to the remembered
    /// student file.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NoRecordFile`] or [`RegistryError::WriteFailed`].
    pub fn save_students(&self) -> Result<(), RegistryError> {
        let path = self.files.students.as_deref().ok_or(RegistryError::NoRecordFile("student"))?;
        self.write_records(path, encode_lines(&self.students), "students")
    }

    /// Writes every faculty member to the remembered faculty file.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NoRecordFile`] or [`RegistryError::WriteFailed`].
    pub fn save_faculty(&self) -> Result<(), RegistryError> {
        let path = self.files.faculty.as_deref().ok_or(RegistryError::NoRecordFile("faculty"))?;
        self.write_records(path, encode_lines(&self.faculty), "faculty")
    }

    pub fn course_file(&self) -> Option<&Path> {
        self.files.courses.as_deref()
    }

    pub fn set_course_file(&mut self, path: impl Into<PathBuf>) {
        self.files.courses = Some(path.into());
    }

    pub fn student_file(&self) -> Option<&Path> {
        self.files.students.as_deref()
    }

    pub fn set_student_file(&mut self, path: impl Into<PathBuf>) {
        self.files.students = Some(path.into());
    }

    pub fn faculty_file(&self) -> Option<&Path> {
        self.files.faculty.as_deref()
    }

    pub fn set_faculty_file(&mut self, path: impl Into<PathBuf>) {
        self.files.faculty = Some(path.into());
    }

    fn write_records(
        &self,
        path: &Path,
        lines: Vec<String>,
        what: &'static str,
    ) -> Result<(), RegistryError> {
        match self.store.write_lines(path, &lines) {
            Ok(()) => {
                info!(path = %path.display(), count = lines.len(), "{what} saved");
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to save {what}");
                Err(e.into())
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::record_store::{MockRecordStore, StoreError};
    use course_core::{hash_password, CourseHolder, Enrollable, ErrorKind};
    use mockall::predicate::eq;
    use std::io;
    use std::sync::Arc;

    fn student_line(id: &str, max: u32, courses: &[&str]) -> String {
        let mut line = format!("First,Last,{id},{id}@ncsu.edu,{},{max}", hash_password("pw"));
        for c in courses {
            line.push(',');
            line.push_str(c);
        }
        line
    }

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_load_courses_skips_malformed_and_duplicate_lines() {
        // Arrange
        let mut store = MockRecordStore::new();
        store
            .expect_read_lines()
            .with(eq(Path::new("courses.txt")))
            .times(1)
            .returning(|_| {
                Ok(lines(&[
                    "CSC116,3,7",
                    "not a course",
                    "CSC216,9,10",
                    "CSC116,4,2",
                    "",
                    "CSC226,3,10",
                ]))
            });
        let mut reg = CourseRegistry::new(Arc::new(store));

        // Act
        let added = reg.load_courses("courses.txt").unwrap();

        // Assert
        assert_eq!(added, 2);
        let names: Vec<&str> = reg.list_all_courses().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["CSC116", "CSC226"]);
        assert_eq!(reg.course_file(), Some(Path::new("courses.txt")));
    }

    #[test]
    fn test_load_courses_missing_file_reports_file_not_found() {
        let mut store = MockRecordStore::new();
        store.expect_read_lines().returning(|p| {
            Err(StoreError::NotFound {
                path: p.to_path_buf(),
            })
        });
        let mut reg = CourseRegistry::new(Arc::new(store));

        let err = reg.load_courses("missing.txt").unwrap_err();

        assert!(matches!(err, RegistryError::FileNotFound { .. }));
        assert_eq!(err.kind(), ErrorKind::Io);
        // The name is remembered even though the load failed.
        assert_eq!(reg.course_file(), Some(Path::new("missing.txt")));
    }

    #[test]
    fn test_load_students_drops_line_with_unknown_course_entirely() {
        // Arrange
        let mut store = MockRecordStore::new();
        store
            .expect_read_lines()
            .with(eq(Path::new("courses.txt")))
            .returning(|_| Ok(lines(&["CSC216,3,10", "CSC226,3,10"])));
        let good = student_line("alice", 18, &["CSC216", "CSC226"]);
        let bad = student_line("bob", 18, &["CSC216", "CSC999"]);
        store
            .expect_read_lines()
            .with(eq(Path::new("students.txt")))
            .returning(move |_| Ok(vec![good.clone(), bad.clone()]));
        let mut reg = CourseRegistry::new(Arc::new(store));
        reg.load_courses("courses.txt").unwrap();

        // Act
        let added = reg.load_students("students.txt").unwrap();

        // Assert
        assert_eq!(added, 1);
        assert!(reg.get_student("bob").is_none());
        let csc216 = reg.get_course_by_name("CSC216").unwrap();
        assert_eq!(csc216.enrolled_students(), ["alice"]);
        assert!(reg.check_invariants().is_ok());
    }

    #[test]
    fn test_load_students_skips_line_over_credit_ceiling() {
        let mut store = MockRecordStore::new();
        store
            .expect_read_lines()
            .with(eq(Path::new("courses.txt")))
            .returning(|_| Ok(lines(&["CSC216,3,10", "CSC226,3,10"])));
        let over = student_line("alice", 3, &["CSC216", "CSC226"]);
        store
            .expect_read_lines()
            .with(eq(Path::new("students.txt")))
            .returning(move |_| Ok(vec![over.clone()]));
        let mut reg = CourseRegistry::new(Arc::new(store));
        reg.load_courses("courses.txt").unwrap();

        assert_eq!(reg.load_students("students.txt").unwrap(), 0);
        assert!(reg
            .get_course_by_name("CSC216")
            .unwrap()
            .enrolled_students()
            .is_empty());
    }

    #[test]
    fn test_load_faculty_assigns_instructors() {
        let mut store = MockRecordStore::new();
        store
            .expect_read_lines()
            .with(eq(Path::new("courses.txt")))
            .returning(|_| Ok(lines(&["CSC216,3,10", "CSC230,3,10"])));
        let line = format!(
            "Fiona,Meadows,fmeadow,fm@ncsu.edu,{},2,CSC216,CSC230",
            hash_password("pw")
        );
        store
            .expect_read_lines()
            .with(eq(Path::new("faculty.txt")))
            .returning(move |_| Ok(vec![line.clone()]));
        let mut reg = CourseRegistry::new(Arc::new(store));
        reg.load_courses("courses.txt").unwrap();

        assert_eq!(reg.load_faculty("faculty.txt").unwrap(), 1);

        assert_eq!(
            reg.get_course_by_name("CSC230").unwrap().instructor(),
            Some("fmeadow")
        );
        assert_eq!(
            reg.get_faculty("fmeadow").unwrap().course_names(),
            vec!["CSC216", "CSC230"]
        );
    }

    #[test]
    fn test_save_courses_writes_canonical_lines() {
        // Arrange
        let mut store = MockRecordStore::new();
        store
            .expect_read_lines()
            .returning(|_| Ok(lines(&["CSC216,3,10,ignored", "CSC116,3,7"])));
        store
            .expect_write_lines()
            .withf(|path, lines| {
                path == Path::new("courses.txt")
                    && lines == ["CSC216,3,10".to_string(), "CSC116,3,7".to_string()]
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let mut reg = CourseRegistry::new(Arc::new(store));
        reg.load_courses("courses.txt").unwrap();

        // Act / Assert
        reg.save_courses().unwrap();
    }

    #[test]
    fn test_save_without_remembered_file_fails() {
        let reg = CourseRegistry::new(Arc::new(MockRecordStore::new()));
        let err = reg.save_students().unwrap_err();
        assert!(matches!(err, RegistryError::NoRecordFile("student")));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_save_write_failure_surfaces_cause() {
        let mut store = MockRecordStore::new();
        store.expect_write_lines().returning(|p, _| {
            Err(StoreError::Write {
                path: p.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "disk is read-only"),
            })
        });
        let mut reg = CourseRegistry::new(Arc::new(store));
        reg.set_faculty_file("faculty.txt");

        let err = reg.save_faculty().unwrap_err();

        assert!(matches!(err, RegistryError::WriteFailed { .. }));
        assert!(err.to_string().contains("disk is read-only"));
    }

    #[test]
    fn test_file_name_setters_round_trip() {
        let mut reg = CourseRegistry::new(Arc::new(MockRecordStore::new()));
        reg.set_course_file("c.txt");
        reg.set_student_file("s.txt");
        reg.set_faculty_file("f.txt");
        assert_eq!(reg.course_file(), Some(Path::new("c.txt")));
        assert_eq!(reg.student_file(), Some(Path::new("s.txt")));
        assert_eq!(reg.faculty_file(), Some(Path::new("f.txt")));
    }
}
