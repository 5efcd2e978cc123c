//! Desktop form payloads and their rendering.
//!
//! A native desktop shell collects text fields in dialogs and passes them
//! across the C ABI as JSON. This module validates those raw fields into
//! typed values and renders every [`ActionOutcome`] as an [`AppResponse`]
//! the shell can show in a message box or a table.

use serde::{Deserialize, Serialize};

use crate::app_config::{MAX_FORM_YEAR, MIN_FORM_YEAR};
use crate::app_response::AppResponse;
use crate::book_model::Book;
use crate::library_action::{ActionOutcome, FilterCriteria, FrontEnd};

/// Contents of the "New Book" / "Modify" dialog, exactly as typed.
///
/// ```json
/// {"title": "Dune", "author": "Herbert", "year": "1965", "category": "SciFi", "available": true}
/// ```
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub year: String,
    pub category: String,
    pub available: bool,
}

impl Default for BookForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            year: String::new(),
            category: String::new(),
            available: true,
        }
    }
}

/// Contents of the "Find Books" dialog. Blank fields mean "any".
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct SearchForm {
    pub title: String,
    pub author: String,
    pub category: String,
    pub year: String,
}

impl BookForm {
    /// Checks required fields and the year range, then builds the book.
    pub fn validate(&self) -> Result<Book, AppResponse> {
        let title = self.title.trim();
        let author = self.author.trim();

        if title.is_empty() || author.is_empty() {
            return Err(AppResponse::ValidationError(
                "Book title and author are required".to_string(),
            ));
        }

        let year = self.year.trim().parse::<i32>().map_err(|_| {
            AppResponse::ValidationError("Publication year should be a number".to_string())
        })?;

        if !(MIN_FORM_YEAR..=MAX_FORM_YEAR).contains(&year) {
            return Err(AppResponse::ValidationError(format!(
                "Please enter a valid year between {MIN_FORM_YEAR} and {MAX_FORM_YEAR}"
            )));
        }

        let mut book = Book::new(title, author, year, self.category.trim());
        book.set_in_stock(self.available);
        Ok(book)
    }
}

impl SearchForm {
    pub fn validate(&self) -> Result<FilterCriteria, AppResponse> {
        let year = match self.year.trim() {
            "" => None,
            text => Some(text.parse::<i32>().map_err(|_| {
                AppResponse::ValidationError("Please enter a valid year number".to_string())
            })?),
        };

        Ok(FilterCriteria {
            title: non_blank(&self.title),
            author: non_blank(&self.author),
            category: non_blank(&self.category),
            year,
        })
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Renders outcomes as JSON responses for the desktop shell.
///
/// Book payloads are serialized with the same field names as the data file;
/// lists are JSON arrays in collection order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormRenderer;

impl FrontEnd for FormRenderer {
    type Rendered = AppResponse;

    fn render(&self, outcome: &ActionOutcome) -> AppResponse {
        match outcome {
            ActionOutcome::Added(book)
            | ActionOutcome::Updated(book)
            | ActionOutcome::Found(book) => json_response(book),
            ActionOutcome::Duplicate(book) => AppResponse::ValidationError(format!(
                "This book already exists: {}",
                book.short_info()
            )),
            ActionOutcome::UpdateFailed(book) => {
                AppResponse::NotFound(format!("Book to update was not found: {}", book.short_info()))
            }
            ActionOutcome::Removed(book) => AppResponse::success(format!(
                "'{}' was removed from your collection",
                book.title()
            )),
            ActionOutcome::RemoveFailed(book) => {
                AppResponse::NotFound(format!("Book to remove was not found: {}", book.short_info()))
            }
            ActionOutcome::TitleNotFound(title) => {
                AppResponse::NotFound(format!("No book titled '{title}'"))
            }
            ActionOutcome::Collection(books)
            | ActionOutcome::SearchResults(books)
            | ActionOutcome::OldBooks(books) => json_response(books),
            ActionOutcome::Count(count) => AppResponse::success(count.to_string()),
            ActionOutcome::Saved(count) => AppResponse::success(format!(
                "Your library data has been backed up successfully ({count} books)"
            )),
            ActionOutcome::SaveFailed => {
                AppResponse::StorageError("Failed to create backup".to_string())
            }
            ActionOutcome::Loaded(count) => AppResponse::success(format!(
                "Your library data has been restored ({count} books)"
            )),
            ActionOutcome::LoadFailed(AppResponse::NotFound(_)) => {
                AppResponse::NotFound("Restore failed: no backup file exists".to_string())
            }
            ActionOutcome::LoadFailed(reason) => reason.clone(),
        }
    }
}

fn json_response<T: Serialize + ?Sized>(value: &T) -> AppResponse {
    match serde_json::to_string(value) {
        Ok(json) => AppResponse::Ok(json),
        Err(e) => AppResponse::from(e),
    }
}
