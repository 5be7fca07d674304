//! Integration tests for the book store and its validation rules.

mod common;

use classwork::{BookCreate, BookQuery, BookUpdate, ValidationError};
use common::BookEnv;

// =============================================================================
// CRUD
// =============================================================================

#[test]
fn test_empty_store_lists_nothing() {
    let env = BookEnv::new();
    assert!(env.store.list().unwrap().is_empty());
}

#[test]
fn test_create_get_delete() {
    let mut env = BookEnv::new();
    let book = env.add("Neuromancer", "William Gibson", 1984);

    assert_eq!(env.store.get(book.id).unwrap(), Some(book.clone()));
    assert!(env.store.delete(book.id).unwrap());
    assert_eq!(env.store.get(book.id).unwrap(), None);
}

#[test]
fn test_update_empty_body_is_noop() {
    let mut env = BookEnv::new();
    let book = env.add("Neuromancer", "William Gibson", 1984);

    let unchanged = env.store.update(book.id, &BookUpdate::default()).unwrap();
    assert_eq!(unchanged, Some(book));
}

#[test]
fn test_data_survives_reopen() {
    let mut env = BookEnv::new();
    env.add("Neuromancer", "William Gibson", 1984);

    let reopened = classwork::BookStore::open(&env.temp_dir.path().join("books.db")).unwrap();
    assert_eq!(reopened.list().unwrap().len(), 1);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_by_year_only() {
    let mut env = BookEnv::new();
    env.add("Neuromancer", "William Gibson", 1984);
    env.add("1984", "George Orwell", 1949);

    let query = BookQuery {
        year: Some(1984),
        ..Default::default()
    };
    let books = env.store.search(&query).unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Neuromancer");
}

#[test]
fn test_search_no_match() {
    let mut env = BookEnv::new();
    env.add("Neuromancer", "William Gibson", 1984);

    let query = BookQuery {
        author: Some("austen".to_string()),
        ..Default::default()
    };
    assert!(env.store.search(&query).unwrap().is_empty());
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_create_payload_deserialization_requires_all_fields() {
    let result: Result<BookCreate, _> = serde_json::from_str(r#"{"title": "T", "author": "A"}"#);
    assert!(result.is_err());
}

#[test]
fn test_create_payload_limits() {
    let payload: BookCreate =
        serde_json::from_str(&format!(r#"{{"title": "{}", "author": "A", "year": 2000}}"#, "t".repeat(201))).unwrap();
    assert_eq!(payload.validate(), Err(ValidationError::TitleTooLong));
}

#[test]
fn test_validation_messages() {
    assert_eq!(
        ValidationError::YearOutOfRange(3000).to_string(),
        "year 3000 is out of range 0-2100"
    );
}
