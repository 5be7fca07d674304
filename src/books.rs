//! SQLite-backed storage for the books API.

use crate::types::{Book, BookCreate, BookQuery, BookUpdate};
use eyre::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter, types::Value};
use std::path::Path;

/// Default database file for the books API.
pub const DEFAULT_DB: &str = "books.db";

const SELECT_BOOK: &str = "SELECT id, title, author, year FROM books";

/// Storage handle for the `books` table.
pub struct BookStore {
    db: Connection,
}

impl BookStore {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Connection::open(path)
            .with_context(|| format!("Failed to open books database {}", path.display()))?;
        Self::with_connection(db)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::with_connection(db)
    }

    fn with_connection(db: Connection) -> Result<Self> {
        let store = Self { db };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.db
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS books (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title VARCHAR(200) NOT NULL,
                    author VARCHAR(100) NOT NULL,
                    year INTEGER NOT NULL
                );
            "#,
            )
            .context("Failed to initialize books schema")
    }

    /// Insert a book and return it with its new id.
    ///
    /// Callers validate the payload first.
    pub fn create(&mut self, book: &BookCreate) -> Result<Book> {
        self.db
            .execute(
                "INSERT INTO books (title, author, year) VALUES (?, ?, ?)",
                params![book.title, book.author, book.year],
            )
            .context("Failed to insert book")?;

        let id = self.db.last_insert_rowid();
        log::info!("Created book {} {:?}", id, book.title);

        Ok(Book {
            id,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
        })
    }

    /// All books ordered by id.
    pub fn list(&self) -> Result<Vec<Book>> {
        let mut stmt = self.db.prepare(&format!("{} ORDER BY id", SELECT_BOOK))?;
        let books = stmt
            .query_map([], Self::row_to_book)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list books")?;
        Ok(books)
    }

    /// Get a book by id.
    pub fn get(&self, id: i64) -> Result<Option<Book>> {
        let mut stmt = self.db.prepare(&format!("{} WHERE id = ?", SELECT_BOOK))?;
        let book = stmt
            .query_row(params![id], Self::row_to_book)
            .optional()
            .context("Failed to get book")?;
        Ok(book)
    }

    /// Apply a partial update. Returns `None` if the book does not exist.
    pub fn update(&mut self, id: i64, update: &BookUpdate) -> Result<Option<Book>> {
        let Some(mut book) = self.get(id)? else {
            return Ok(None);
        };

        if update.is_empty() {
            return Ok(Some(book));
        }

        update.apply_to(&mut book);
        self.db
            .execute(
                "UPDATE books SET title = ?, author = ?, year = ? WHERE id = ?",
                params![book.title, book.author, book.year, book.id],
            )
            .context("Failed to update book")?;

        log::info!("Updated book {}", id);
        Ok(Some(book))
    }

    /// Delete a book. Returns false if nothing was deleted.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let deleted = self
            .db
            .execute("DELETE FROM books WHERE id = ?", params![id])
            .context("Failed to delete book")?;

        if deleted > 0 {
            log::info!("Deleted book {}", id);
        }
        Ok(deleted > 0)
    }

    /// Books matching every filter present in `query`, ordered by id.
    ///
    /// Title and author match case-insensitively on a substring.
    pub fn search(&self, query: &BookQuery) -> Result<Vec<Book>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(title) = query.title_filter() {
            clauses.push("title LIKE ? ESCAPE '\\'");
            values.push(Value::Text(like_pattern(title)));
        }
        if let Some(author) = query.author_filter() {
            clauses.push("author LIKE ? ESCAPE '\\'");
            values.push(Value::Text(like_pattern(author)));
        }
        if let Some(year) = query.year {
            clauses.push("year = ?");
            values.push(Value::Integer(i64::from(year)));
        }

        let mut sql = SELECT_BOOK.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        log::debug!("Book search: {}", sql);
        let mut stmt = self.db.prepare(&sql)?;
        let books = stmt
            .query_map(params_from_iter(values), Self::row_to_book)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to search books")?;
        Ok(books)
    }

    fn row_to_book(row: &rusqlite::Row) -> rusqlite::Result<Book> {
        Ok(Book {
            id: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            year: row.get(3)?,
        })
    }
}

/// Wrap `needle` as a `%needle%` LIKE pattern, escaping wildcards.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
