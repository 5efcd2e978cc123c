//! The in-memory book collection.
//!
//! [`CollectionManager`] owns the ordered list of books and the data file it
//! is saved to. Rejections come back as `bool`/`Option`, never as errors.

use log::{debug, info, warn};

use crate::app_config::AppConfig;
use crate::app_response::AppResponse;
use crate::book_model::Book;
use crate::collection_store::CollectionStore;

/// Owns the in-memory book collection and its data file.
///
/// Books keep insertion order and every lookup is a linear scan. The manager
/// is created once by the front end and passed around by reference.
#[derive(Debug)]
pub struct CollectionManager {
    books: Vec<Book>,
    store: CollectionStore,
}

impl CollectionManager {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            books: Vec::new(),
            store: CollectionStore::new(&config.data_file),
        }
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    /// Appends `book` unless an equal book is already present.
    pub fn add(&mut self, book: Book) -> bool {
        if self.books.iter().any(|existing| *existing == book) {
            debug!("Rejected duplicate {}", book.short_info());
            return false;
        }

        debug!("Added {}", book.short_info());
        self.books.push(book);
        true
    }

    /// Replaces the entry equal to `old` with `new`.
    ///
    /// `new` is not checked against the rest of the collection, so an update
    /// can leave two equal entries behind.
    pub fn update(&mut self, old: &Book, new: Book) -> bool {
        match self.position_of(old) {
            Some(index) => {
                debug!("Updated {} -> {}", old.short_info(), new.short_info());
                self.books[index] = new;
                true
            }
            None => false,
        }
    }

    /// Removes the first entry equal to `book`.
    pub fn remove(&mut self, book: &Book) -> bool {
        match self.position_of(book) {
            Some(index) => {
                let removed = self.books.remove(index);
                debug!("Removed {}", removed.short_info());
                true
            }
            None => false,
        }
    }

    /// First book whose title equals the trimmed `title`, ignoring case.
    pub fn find_by_title(&self, title: &str) -> Option<&Book> {
        let wanted = title.trim();
        if wanted.is_empty() {
            return None;
        }

        let wanted = wanted.to_lowercase();
        self.books
            .iter()
            .find(|book| book.title().to_lowercase() == wanted)
    }

    pub fn list_all(&self) -> Vec<Book> {
        self.books.clone()
    }

    /// Books matching every supplied criterion.
    ///
    /// Text criteria are case-insensitive substrings; `None` or an empty string
    /// imposes no constraint. The year must match exactly.
    pub fn filter(
        &self,
        title_part: Option<&str>,
        author_part: Option<&str>,
        category_part: Option<&str>,
        exact_year: Option<i32>,
    ) -> Vec<Book> {
        let title_part = lowered_criterion(title_part);
        let author_part = lowered_criterion(author_part);
        let category_part = lowered_criterion(category_part);

        self.books
            .iter()
            .filter(|book| contains_criterion(book.title(), title_part.as_deref()))
            .filter(|book| contains_criterion(book.author(), author_part.as_deref()))
            .filter(|book| contains_criterion(book.category(), category_part.as_deref()))
            .filter(|book| exact_year.map_or(true, |year| book.year() == year))
            .cloned()
            .collect()
    }

    /// Books for which [`Book::matches_search`] holds.
    pub fn text_search(&self, term: Option<&str>) -> Vec<Book> {
        self.books
            .iter()
            .filter(|book| book.matches_search(term))
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.books.len()
    }

    pub fn old_books(&self) -> Vec<Book> {
        self.books
            .iter()
            .filter(|book| book.is_old_book())
            .cloned()
            .collect()
    }

    /// Writes the whole collection to the data file.
    pub fn save(&self) -> bool {
        match self.try_save() {
            Ok(()) => true,
            Err(e) => {
                warn!("Couldn't save collection: {e}");
                false
            }
        }
    }

    /// Replaces the in-memory collection with the data file contents.
    ///
    /// A missing or unreadable file leaves the current collection untouched.
    pub fn load(&mut self) -> bool {
        match self.try_load() {
            Ok(()) => true,
            Err(e) => {
                warn!("Couldn't load collection: {e}");
                false
            }
        }
    }

    pub fn try_save(&self) -> Result<(), AppResponse> {
        self.store.write_all(&self.books)?;
        info!(
            "Saved {} books to {}",
            self.books.len(),
            self.store.path().display()
        );
        Ok(())
    }

    pub fn try_load(&mut self) -> Result<(), AppResponse> {
        let books = self.store.read_all()?;
        info!(
            "Loaded {} books from {}",
            books.len(),
            self.store.path().display()
        );
        self.books = books;
        Ok(())
    }

    fn position_of(&self, book: &Book) -> Option<usize> {
        self.books.iter().position(|existing| existing == book)
    }
}

fn lowered_criterion(part: Option<&str>) -> Option<String> {
    part.filter(|p| !p.is_empty()).map(str::to_lowercase)
}

fn contains_criterion(field: &str, lowered_part: Option<&str>) -> bool {
    match lowered_part {
        Some(part) => field.to_lowercase().contains(part),
        None => true,
    }
}
