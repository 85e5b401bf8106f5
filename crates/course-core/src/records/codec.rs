//! Line codec for the comma-delimited record files.
//!
//! Record formats, one entity per line:
//! ```text
//! course:   name,credits,capacity
//! student:  firstName,lastName,id,email,hashedPassword,maxCredits[,courseName]*
//! faculty:  firstName,lastName,id,email,hashedPassword,maxCourses[,courseName]*
//! ```
//!
//! Encoding is each entity's `Display` impl.  Decoding produces the entity
//! *without* any held courses: a student or faculty line only names courses,
//! and resolving those names against a catalog belongs to whoever owns the
//! catalog (the registry).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::course::Course;
use crate::domain::error::DomainError;
use crate::domain::faculty::Faculty;
use crate::domain::student::Student;
use crate::domain::user::Profile;

/// Field separator used by every record kind.
pub const DELIMITER: char = ',';

/// Errors produced while decoding a single record line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The line ended before a required field.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A numeric field did not parse as a non-negative integer.
    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A course reference was empty.
    #[error("empty course reference")]
    EmptyCourseName,

    /// All fields parsed but the entity failed validation.
    #[error("invalid record: {0}")]
    Invalid(#[from] DomainError),
}

/// A decoded student line: the student (holding nothing yet) plus the course
/// names the line lists, in order.
#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub student: Student,
    pub course_names: Vec<String>,
}

/// A decoded faculty line: the faculty member plus listed course names.
#[derive(Debug, Clone)]
pub struct FacultyRecord {
    pub faculty: Faculty,
    pub course_names: Vec<String>,
}

/// Decodes `name,credits,capacity`.  Fields after the third are ignored.
///
/// # Errors
///
/// Returns [`RecordError`] for missing or non-numeric fields, or a course that
/// fails validation.
pub fn decode_course(line: &str) -> Result<Course, RecordError> {
    let mut fields = line.split(DELIMITER);
    let name = next_field(&mut fields, "name")?;
    let credits = next_number(&mut fields, "credits")?;
    let capacity = next_number(&mut fields, "capacity")?;
    Ok(Course::new(name, credits, capacity)?)
}

/// Decodes a student line.
///
/// # Errors
///
/// Returns [`RecordError`] for missing or non-numeric fields, invalid identity
/// fields, an out-of-range credit ceiling, or an empty course reference.
pub fn decode_student(line: &str) -> Result<StudentRecord, RecordError> {
    let mut fields = line.split(DELIMITER);
    let profile = decode_profile(&mut fields)?;
    let max_credits = next_number(&mut fields, "max credits")?;
    let student = Student::new(profile, max_credits)?;
    let course_names = collect_course_names(fields)?;
    Ok(StudentRecord {
        student,
        course_names,
    })
}

/// Decodes a faculty line.
///
/// # Errors
///
/// Same failure modes as [`decode_student`], with the teaching-load bound in
/// place of the credit ceiling.
pub fn decode_faculty(line: &str) -> Result<FacultyRecord, RecordError> {
    let mut fields = line.split(DELIMITER);
    let profile = decode_profile(&mut fields)?;
    let max_courses = next_number(&mut fields, "max courses")?;
    let faculty = Faculty::new(profile, max_courses)?;
    let course_names = collect_course_names(fields)?;
    Ok(FacultyRecord {
        faculty,
        course_names,
    })
}

/// Encodes each item with its canonical text form, one line per item.
pub fn encode_lines<T: fmt::Display>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

impl FromStr for Course {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_course(s)
    }
}

impl FromStr for StudentRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_student(s)
    }
}

impl FromStr for FacultyRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_faculty(s)
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn decode_profile<'a>(fields: &mut impl Iterator<Item = &'a str>) -> Result<Profile, RecordError> {
    let first_name = next_field(fields, "first name")?;
    let last_name = next_field(fields, "last name")?;
    let id = next_field(fields, "id")?;
    let email = next_field(fields, "email")?;
    let password = next_field(fields, "password")?;
    Ok(Profile::new(first_name, last_name, id, email, password)?)
}

fn next_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<&'a str, RecordError> {
    fields.next().ok_or(RecordError::MissingField(name))
}

fn next_number<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<u32, RecordError> {
    let raw = next_field(fields, name)?;
    raw.parse().map_err(|_| RecordError::InvalidNumber {
        field: name,
        value: raw.to_string(),
    })
}

fn collect_course_names<'a>(
    fields: impl Iterator<Item = &'a str>,
) -> Result<Vec<String>, RecordError> {
    fields
        .map(|name| {
            if name.is_empty() {
                Err(RecordError::EmptyCourseName)
            } else {
                Ok(name.to_string())
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
