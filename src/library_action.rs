//! Contract shared by the console and desktop front ends.
//!
//! A front end turns user input into a [`LibraryAction`], hands it to
//! [`dispatch`] and renders the resulting [`ActionOutcome`] in its own
//! format. Neither front end applies business rules of its own; they only
//! validate input and echo the manager's results.

use log::{debug, warn};

use crate::app_response::AppResponse;
use crate::book_model::Book;
use crate::collection_manager::CollectionManager;

/// Optional criteria for the advanced search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub year: Option<i32>,
}

/// A user intent, already validated and typed by the front end.
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryAction {
    Add(Book),
    Update { original: Book, updated: Book },
    Remove(Book),
    FindByTitle(String),
    ListAll,
    Filter(FilterCriteria),
    TextSearch(Option<String>),
    OldBooks,
    Count,
    Save,
    Load,
}

/// What the manager reported for a [`LibraryAction`].
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Added(Book),
    Duplicate(Book),
    Updated(Book),
    UpdateFailed(Book),
    Removed(Book),
    RemoveFailed(Book),
    Found(Book),
    TitleNotFound(String),
    Collection(Vec<Book>),
    SearchResults(Vec<Book>),
    OldBooks(Vec<Book>),
    Count(usize),
    Saved(usize),
    SaveFailed,
    Loaded(usize),
    LoadFailed(AppResponse),
}

impl ActionOutcome {
    /// `false` for rejections and persistence failures.
    pub fn is_success(&self) -> bool {
        !matches!(
            self,
            ActionOutcome::Duplicate(_)
                | ActionOutcome::UpdateFailed(_)
                | ActionOutcome::RemoveFailed(_)
                | ActionOutcome::TitleNotFound(_)
                | ActionOutcome::SaveFailed
                | ActionOutcome::LoadFailed(_)
        )
    }
}

/// Runs `action` against `manager`.
pub fn dispatch(manager: &mut CollectionManager, action: LibraryAction) -> ActionOutcome {
    debug!("Dispatching {:?}", action);

    match action {
        LibraryAction::Add(book) => {
            if manager.add(book.clone()) {
                ActionOutcome::Added(book)
            } else {
                ActionOutcome::Duplicate(book)
            }
        }
        LibraryAction::Update { original, updated } => {
            if manager.update(&original, updated.clone()) {
                ActionOutcome::Updated(updated)
            } else {
                ActionOutcome::UpdateFailed(original)
            }
        }
        LibraryAction::Remove(book) => {
            if manager.remove(&book) {
                ActionOutcome::Removed(book)
            } else {
                ActionOutcome::RemoveFailed(book)
            }
        }
        LibraryAction::FindByTitle(title) => match manager.find_by_title(&title) {
            Some(book) => ActionOutcome::Found(book.clone()),
            None => ActionOutcome::TitleNotFound(title),
        },
        LibraryAction::ListAll => ActionOutcome::Collection(manager.list_all()),
        LibraryAction::Filter(criteria) => ActionOutcome::SearchResults(manager.filter(
            criteria.title.as_deref(),
            criteria.author.as_deref(),
            criteria.category.as_deref(),
            criteria.year,
        )),
        LibraryAction::TextSearch(term) => {
            ActionOutcome::SearchResults(manager.text_search(term.as_deref()))
        }
        LibraryAction::OldBooks => ActionOutcome::OldBooks(manager.old_books()),
        LibraryAction::Count => ActionOutcome::Count(manager.count()),
        LibraryAction::Save => {
            if manager.save() {
                ActionOutcome::Saved(manager.count())
            } else {
                ActionOutcome::SaveFailed
            }
        }
        LibraryAction::Load => {
            match manager.try_load() {
                Ok(()) => ActionOutcome::Loaded(manager.count()),
                Err(reason) => {
                    warn!("Couldn't load collection: {reason}");
                    ActionOutcome::LoadFailed(reason)
                }
            }
        }
    }
}

/// Presentation half of a front end.
pub trait FrontEnd {
    /// Whatever the front end shows to its user: text lines, a JSON response, ...
    type Rendered;

    fn render(&self, outcome: &ActionOutcome) -> Self::Rendered;

    fn perform(&self, manager: &mut CollectionManager, action: LibraryAction) -> Self::Rendered {
        let outcome = dispatch(manager, action);
        self.render(&outcome)
    }
}
