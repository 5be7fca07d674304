//! Integration tests for the grade tracker menu.
//!
//! Each test drives a full console session from scripted input.

mod common;

use classwork::{Roster, RosterError};
use common::{Session, roster_with};

// =============================================================================
// Adding Students
// =============================================================================

#[test]
fn test_add_students() {
    let session = Session::run(&["1", "Alice", "1", "  Bob  ", "5"]);

    assert_eq!(session.roster.len(), 2);
    session.assert_printed("Student 'Alice' successfully added.");
    session.assert_printed("Student 'Bob' successfully added.");
}

#[test]
fn test_duplicate_student_rejected() {
    let session = Session::run(&["1", "Alice", "1", " Alice", "5"]);

    assert_eq!(session.roster.len(), 1);
    session.assert_printed("Student 'Alice' already exists.");
}

#[test]
fn test_duplicate_returns_error_signal() {
    let mut roster = Roster::new();
    roster.add_student("Alice").unwrap();
    assert_eq!(
        roster.add_student("Alice").unwrap_err(),
        RosterError::DuplicateName("Alice".to_string())
    );
    assert_eq!(roster.len(), 1);
}

// =============================================================================
// Grade Entry
// =============================================================================

#[test]
fn test_grade_entry_skips_invalid_tokens() {
    let session = Session::run(&["1", "Alice", "2", "Alice", "abc", "150", "90", "-3", "80", "done", "5"]);

    assert_eq!(session.grades_of("Alice"), vec![90, 80]);
    session.assert_printed("Enter grades for Alice (0 to 100). Type 'done' to finish.");
    assert_eq!(session.count("Invalid input. Grade must be a number."), 2);
    assert_eq!(session.count("Invalid input. Grade must be between 0 and 100."), 1);
    session.assert_printed("Grade 90 added.");
    session.assert_printed("Grade 80 added.");
}

#[test]
fn test_done_sentinel_is_case_insensitive() {
    let session = Session::run(&["1", "Alice", "2", "Alice", "77", "  DONE ", "5"]);

    assert_eq!(session.grades_of("Alice"), vec![77]);
    session.assert_printed("Program terminated.");
}

#[test]
fn test_grades_for_unknown_student() {
    let session = Session::run(&["1", "Alice", "2", "Carol", "5"]);

    session.assert_printed("Student 'Carol' not found.");
    assert!(session.grades_of("Alice").is_empty());
}

#[test]
fn test_grades_on_empty_roster() {
    let session = Session::run(&["2", "5"]);
    session.assert_printed("Student list is empty. Please add a student first.");
}

#[test]
fn test_grades_accumulate_across_entries() {
    let session = Session::run(&[
        "1", "Alice", "2", "Alice", "70", "done", "2", "Alice", "90", "done", "5",
    ]);
    assert_eq!(session.grades_of("Alice"), vec![70, 90]);
}

// =============================================================================
// Report
// =============================================================================

#[test]
fn test_report_mixed_roster() {
    let roster = roster_with(&[("A", &[90, 80]), ("B", &[]), ("C", &[70])]);
    let session = Session::run_with(roster, &["3", "5"]);

    session.assert_printed("--- Student Report ---");
    session.assert_printed("A's average grade is 85.0");
    session.assert_printed("B's average grade is N/A");
    session.assert_printed("C's average grade is 70.0");
    session.assert_printed("Max average: 85.0");
    session.assert_printed("Min average: 70.0");
    session.assert_printed("Overall average: 80.0");
}

#[test]
fn test_report_lines_follow_roster_order() {
    let roster = roster_with(&[("Zed", &[50]), ("Amy", &[60])]);
    let session = Session::run_with(roster, &["3", "5"]);

    let zed = session.output.find("Zed's average").unwrap();
    let amy = session.output.find("Amy's average").unwrap();
    assert!(zed < amy);
}

#[test]
fn test_report_without_grades() {
    let roster = roster_with(&[("A", &[]), ("B", &[])]);
    let session = Session::run_with(roster, &["3", "5"]);

    session.assert_printed("No grades available to calculate statistics.");
    assert_eq!(session.count("average grade is N/A"), 2);
}

#[test]
fn test_report_on_empty_roster() {
    let session = Session::run(&["3", "5"]);
    session.assert_printed("Student list is empty.");
    assert!(!session.output.contains("--- Student Report ---"));
}

#[test]
fn test_report_rounds_to_one_decimal() {
    let roster = roster_with(&[("A", &[100, 90, 90])]);
    let session = Session::run_with(roster, &["3", "5"]);
    session.assert_printed("A's average grade is 93.3");
}

// =============================================================================
// Top Performer
// =============================================================================

#[test]
fn test_top_performer() {
    let roster = roster_with(&[("A", &[60]), ("B", &[95, 85])]);
    let session = Session::run_with(roster, &["4", "5"]);

    session.assert_printed("--- Top Performer ---");
    session.assert_printed("Name: B");
    session.assert_printed("Average Grade: 90.0");
}

#[test]
fn test_top_performer_without_grades_continues() {
    let roster = roster_with(&[("A", &[]), ("B", &[])]);
    let session = Session::run_with(roster, &["4", "1", "C", "5"]);

    session.assert_printed("No students have grades recorded.");
    assert_eq!(session.roster.len(), 3);
}

#[test]
fn test_top_performer_on_empty_roster() {
    let session = Session::run(&["4", "5"]);
    session.assert_printed("Student list is empty.");
}

// =============================================================================
// Full Session
// =============================================================================

#[test]
fn test_full_session() {
    let session = Session::run(&[
        "1", "Alice", "1", "Bob", "1", "Carol", "2", "Alice", "90", "80", "done", "2", "Carol", "70", "done",
        "7", "3", "4", "5",
    ]);

    session.assert_printed("Invalid choice. Please enter a number from 1 to 5.");
    session.assert_printed("Bob's average grade is N/A");
    session.assert_printed("Overall average: 80.0");
    session.assert_printed("Name: Alice");
    assert!(session.output.ends_with("Program terminated.\n"));
}
