//! Shared test infrastructure for Classwork integration tests.
//!
//! Provides scripted console sessions and a seeded book store.

#![allow(dead_code)]

use classwork::{BookCreate, BookStore, Book, Menu, Roster};
use tempfile::TempDir;

/// Result of driving the grade tracker with a scripted input.
pub struct Session {
    pub roster: Roster,
    pub output: String,
}

impl Session {
    /// Run the menu over `lines`, joined with newlines.
    pub fn run(lines: &[&str]) -> Self {
        Self::run_with(Roster::new(), lines)
    }

    /// Run the menu over `lines` starting from an existing roster.
    pub fn run_with(roster: Roster, lines: &[&str]) -> Self {
        let mut script = lines.join("\n");
        script.push('\n');

        let mut menu = Menu::with_roster(roster, script.as_bytes(), Vec::new());
        menu.run().expect("Menu session failed");
        let (roster, output) = menu.into_parts();

        Self {
            roster,
            output: String::from_utf8(output).expect("Output was not UTF-8"),
        }
    }

    /// Grades recorded for `name`.
    pub fn grades_of(&self, name: &str) -> Vec<u8> {
        self.roster
            .find_student(name)
            .unwrap_or_else(|| panic!("Student {} not on roster", name))
            .grades()
            .to_vec()
    }

    /// Count occurrences of `needle` in the output.
    pub fn count(&self, needle: &str) -> usize {
        self.output.matches(needle).count()
    }

    /// Assert the output contains `needle`.
    pub fn assert_printed(&self, needle: &str) {
        assert!(
            self.output.contains(needle),
            "Expected output to contain {:?}, got:\n{}",
            needle,
            self.output
        );
    }
}

/// Build a roster directly from names and grades.
pub fn roster_with(students: &[(&str, &[u8])]) -> Roster {
    let mut roster = Roster::new();
    for (name, grades) in students {
        roster.add_student(name).expect("Failed to add student");
        let student = roster.find_student_mut(name).expect("Student vanished");
        for &grade in *grades {
            student.push_grade(grade).expect("Failed to push grade");
        }
    }
    roster
}

/// A file-backed book store in a temp dir.
pub struct BookEnv {
    pub temp_dir: TempDir,
    pub store: BookStore,
}

impl BookEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = BookStore::open(&temp_dir.path().join("books.db")).expect("Failed to open store");
        Self { temp_dir, store }
    }

    /// Create a book without going through validation.
    pub fn add(&mut self, title: &str, author: &str, year: i32) -> Book {
        self.store
            .create(&BookCreate {
                title: title.to_string(),
                author: author.to_string(),
                year,
            })
            .expect("Failed to create book")
    }
}

impl Default for BookEnv {
    fn default() -> Self {
        Self::new()
    }
}
