//! Classwork: small console and HTTP exercises around a student grade tracker.
//!
//! The core is an in-memory [`Roster`] driven by a console [`Menu`]. Alongside
//! it live a profile builder, a SQLite script runner and a books CRUD API.
//!
//! # Example
//!
//! ```
//! use classwork::{GradeEntry, Roster};
//!
//! let mut roster = Roster::new();
//! roster.add_student("Alice").unwrap();
//! roster.add_student("Bob").unwrap();
//!
//! let alice = roster.find_student_mut("Alice").unwrap();
//! assert_eq!(alice.add_grade("90").unwrap(), GradeEntry::Grade(90));
//! assert!(alice.add_grade("abc").is_err());
//! assert_eq!(alice.add_grade("done").unwrap(), GradeEntry::Done);
//!
//! let report = roster.report().unwrap();
//! assert_eq!(report.entries[1].average, None);
//! assert_eq!(roster.top_performer().unwrap().student.name(), "Alice");
//! ```

mod console;
mod roster;
mod types;

pub mod bootstrap;
pub mod books;
pub mod menu;
pub mod profile;
pub mod server;

// Re-export public API
pub use books::BookStore;
pub use console::Console;
pub use menu::{Command, Flow, Menu};
pub use profile::{LifeStage, Profile, ProfileError, life_stage};
pub use roster::{
    GradeEntry, Report, ReportEntry, Roster, RosterError, Student, Summary, TopPerformer, average, parse_grade,
};
pub use server::{AppState, ServerConfig};
pub use types::{Book, BookCreate, BookQuery, BookUpdate, ValidationError};
