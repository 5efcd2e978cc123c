//! Book record definitions.
//!
//! This module defines [`Book`], the single catalog entry stored by the
//! [`CollectionManager`](crate::collection_manager::CollectionManager).
//! Equality and hashing look only at the identifying fields
//! (title, author, publication year) so that two copies of the same edition
//! with a different shelf category or stock status are treated as one book.

use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Publication years strictly below this value mark a book as "old".
pub const OLD_BOOK_YEAR: i32 = 1950;

/// Status label rendered for books that are on the shelf.
pub const IN_STOCK_LABEL: &str = "✓ Available";

/// Status label rendered for books that are lent out.
pub const OUT_OF_STOCK_LABEL: &str = "✗ Checked out";

/// A single entry of the personal book collection.
///
/// # Structure
///
/// - **title**: Book title, compared case-insensitively
/// - **author**: Author name, compared case-insensitively
/// - **year**: Publication year, compared exactly
/// - **category**: Free-form shelf category, ignored by equality
/// - **in_stock**: Whether the book is available, ignored by equality
///
/// # Examples
///
/// ```rust
/// use book_collection_core::book_model::Book;
///
/// let dune = Book::new("Dune", "Frank Herbert", 1965, "SciFi");
/// let shouting = Book::new("DUNE", "frank herbert", 1965, "Classics");
///
/// assert!(dune.in_stock());
/// assert_eq!(dune, shouting);
/// assert_eq!(dune.short_info(), "Dune (1965)");
/// ```
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Book {
    title: String,
    author: String,
    year: i32,
    category: String,
    #[serde(default = "default_in_stock")]
    in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Book {
    /// Creates a book that is in stock.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            category: category.into(),
            in_stock: true,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    pub fn rename_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_in_stock(&mut self, in_stock: bool) {
        self.in_stock = in_stock;
    }

    /// Returns `true` for books published before [`OLD_BOOK_YEAR`].
    pub fn is_old_book(&self) -> bool {
        self.year < OLD_BOOK_YEAR
    }

    /// Compact `"title (year)"` label used in lists and confirmations.
    pub fn short_info(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }

    /// Free-text match used by the quick search box.
    ///
    /// An absent or blank query matches every book. Otherwise the query
    /// matches when it appears, ignoring case, inside the title, author or
    /// category, or when it appears verbatim inside the decimal year.
    ///
    /// ```rust
    /// use book_collection_core::book_model::Book;
    ///
    /// let book = Book::new("Emma", "Jane Austen", 1815, "Romance");
    /// assert!(book.matches_search(Some("austen")));
    /// assert!(book.matches_search(Some("81")));
    /// assert!(book.matches_search(None));
    /// assert!(!book.matches_search(Some("dickens")));
    /// ```
    pub fn matches_search(&self, text: Option<&str>) -> bool {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            _ => return true,
        };

        let needle = text.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.author.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
            || self.year.to_string().contains(text)
    }

    fn status_label(&self) -> &'static str {
        if self.in_stock {
            IN_STOCK_LABEL
        } else {
            OUT_OF_STOCK_LABEL
        }
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.year == other.year
            && self.title.to_lowercase() == other.title.to_lowercase()
            && self.author.to_lowercase() == other.author.to_lowercase()
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.to_lowercase().hash(state);
        self.author.to_lowercase().hash(state);
        self.year.hash(state);
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "\"{}\" by {} | {} | {} | {}",
            self.title,
            self.author,
            self.year,
            self.category,
            self.status_label()
        )
    }
}
