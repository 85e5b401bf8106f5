//! Course Manager — command-line entry point.
//!
//! Loads the course, student and faculty record files into a fresh
//! [`CourseRegistry`], runs one command, and writes the records back when the
//! command changed anything.
//!
//! # Usage
//!
//! ```text
//! course-manager [OPTIONS] <COMMAND>
//!
//! Commands:
//!   courses    List every course with its enrollment and instructor
//!   schedule   Log in and list the user's courses
//!   add        Log in and add the user to a course
//!   drop       Log in and remove the user from a course
//!   hash       Print the stored credential form of a password
//!
//! Options:
//!   --config        <PATH>  Configuration file [default: platform config dir]
//!   --course-file   <PATH>  Overrides [data] course_file
//!   --student-file  <PATH>  Overrides [data] student_file
//!   --faculty-file  <PATH>  Overrides [data] faculty_file
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                   | Flag              |
//! |----------------------------|-------------------|
//! | `COURSE_MANAGER_CONFIG`    | `--config`        |
//! | `COURSE_MANAGER_COURSES`   | `--course-file`   |
//! | `COURSE_MANAGER_STUDENTS`  | `--student-file`  |
//! | `COURSE_MANAGER_FACULTY`   | `--faculty-file`  |
//! | `COURSE_MANAGER_PASSWORD`  | `--password`      |
//!
//! CLI args take precedence when both are present.  `RUST_LOG` takes
//! precedence over `[logging] level`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use course_core::{hash_password, Enrollable};
use course_manager::infrastructure::storage::config::{load_config, load_config_from, AppConfig};
use course_manager::infrastructure::storage::FileRecordStore;
use course_manager::CourseRegistry;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// University course enrollment manager.
#[derive(Debug, Parser)]
#[command(
    name = "course-manager",
    about = "Register students and faculty for courses from the record files",
    version
)]
struct Cli {
    /// Configuration file.  Defaults to the platform config directory.
    #[arg(long, env = "COURSE_MANAGER_CONFIG")]
    config: Option<PathBuf>,

    /// Course record file; overrides the configured value.
    #[arg(long, env = "COURSE_MANAGER_COURSES")]
    course_file: Option<PathBuf>,

    /// Student record file; overrides the configured value.
    #[arg(long, env = "COURSE_MANAGER_STUDENTS")]
    student_file: Option<PathBuf>,

    /// Faculty record file; overrides the configured value.
    #[arg(long, env = "COURSE_MANAGER_FACULTY")]
    faculty_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every course with its enrollment and instructor.
    Courses,
    /// Log in and list the user's courses.
    Schedule(Credentials),
    /// Log in and add the user to a course.
    Add {
        #[command(flatten)]
        login: Credentials,
        /// Course name, e.g. `CSC216`.
        #[arg(long)]
        course: String,
    },
    /// Log in and remove the user from a course.
    Drop {
        #[command(flatten)]
        login: Credentials,
        /// Course name, e.g. `CSC216`.
        #[arg(long)]
        course: String,
    },
    /// Print the stored credential form of a password.
    Hash {
        plaintext: String,
    },
}

#[derive(Debug, Args)]
struct Credentials {
    /// Student or faculty id.
    #[arg(long)]
    id: String,
    /// Plaintext password; hashed before comparison and never stored.
    #[arg(long, env = "COURSE_MANAGER_PASSWORD", hide_env_values = true)]
    password: String,
}

impl Cli {
    /// Loads the configuration file and applies the command-line overrides.
    fn resolve_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => load_config().context("failed to load config")?,
        };
        if let Some(path) = &self.course_file {
            config.data.course_file = path.clone();
        }
        if let Some(path) = &self.student_file {
            config.data.student_file = path.clone();
        }
        if let Some(path) = &self.faculty_file {
            config.data.faculty_file = path.clone();
        }
        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Hash { plaintext } = &cli.command {
        println!("{}", hash_password(plaintext));
        return Ok(());
    }

    let config = cli.resolve_config()?;

    // `RUST_LOG` wins; otherwise use the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let mut registry = CourseRegistry::new(Arc::new(FileRecordStore::new()));
    load_records(&mut registry, &config)?;

    match cli.command {
        Command::Courses => print_courses(&registry),
        Command::Schedule(login) => {
            log_in(&mut registry, &login)?;
            for name in registry.list_user_courses()? {
                println!("{name}");
            }
        }
        Command::Add { login, course } => {
            log_in(&mut registry, &login)?;
            if !registry.add_user_to_course(&course)? {
                bail!("{} could not be added to {course}", login.id);
            }
            save_records(&registry)?;
            println!("{} added to {course}", login.id);
        }
        Command::Drop { login, course } => {
            log_in(&mut registry, &login)?;
            if !registry.remove_user_from_course(&course)? {
                bail!("{} is not in {course}", login.id);
            }
            save_records(&registry)?;
            println!("{} removed from {course}", login.id);
        }
        Command::Hash { .. } => {}
    }

    registry.logout();
    Ok(())
}

/// Loads courses first so that student and faculty lines can resolve the
/// course names they list.
fn load_records(registry: &mut CourseRegistry, config: &AppConfig) -> anyhow::Result<()> {
    let data = &config.data;
    registry
        .load_courses(&data.course_file)
        .with_context(|| format!("loading courses from {}", data.course_file.display()))?;
    registry
        .load_students(&data.student_file)
        .with_context(|| format!("loading students from {}", data.student_file.display()))?;
    registry
        .load_faculty(&data.faculty_file)
        .with_context(|| format!("loading faculty from {}", data.faculty_file.display()))?;
    info!(
        courses = registry.list_all_courses().len(),
        students = registry.students().len(),
        faculty = registry.faculty().len(),
        "records loaded"
    );
    Ok(())
}

fn save_records(registry: &CourseRegistry) -> anyhow::Result<()> {
    registry.save_courses().context("saving courses")?;
    registry.save_students().context("saving students")?;
    registry.save_faculty().context("saving faculty")?;
    Ok(())
}

fn log_in(registry: &mut CourseRegistry, login: &Credentials) -> anyhow::Result<()> {
    if !registry.login(&login.id, &login.password) {
        bail!("login failed for {}", login.id);
    }
    Ok(())
}

fn print_courses(registry: &CourseRegistry) {
    for course in registry.list_all_courses() {
        println!(
            "{course}  enrolled {}/{}  instructor {}",
            course.enrolled_students().len(),
            course.capacity(),
            course.instructor().unwrap_or("-")
        );
    }
}
