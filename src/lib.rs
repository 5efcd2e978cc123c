//! # Book Collection Core
//!
//! A small personal catalog of books: add, edit, remove, list, search and
//! persist them to a single data file. The same [`CollectionManager`] sits
//! behind two front ends:
//!
//! - a text console ([`console::Console`], started by the `book_collection` binary)
//! - a C ABI for desktop form shells (the `extern "C"` functions below)
//!
//! Both front ends translate user input into a [`library_action::LibraryAction`],
//! run it through [`library_action::dispatch`] and render the outcome their own way.
//!
//! ## Quick Start
//!
//! ```no_run
//! use book_collection_core::app_config::AppConfig;
//! use book_collection_core::book_model::Book;
//! use book_collection_core::collection_manager::CollectionManager;
//!
//! let mut manager = CollectionManager::new(&AppConfig::default());
//! assert!(manager.add(Book::new("Dune", "Frank Herbert", 1965, "SciFi")));
//! assert!(!manager.add(Book::new("dune", "FRANK HERBERT", 1965, "SciFi")));
//! manager.save();
//! ```
//!
//! ## FFI Functions
//!
//! Every function returns a heap-allocated JSON [`AppResponse`] that must be
//! released with [`free_response`]:
//!
//! - [`create_library`] - Create a collection bound to a data file
//! - [`add_book`] - Add a book from a form payload
//! - [`update_book`] - Replace a book located by title with a form payload
//! - [`remove_book`] - Remove a book located by title
//! - [`find_book`] - Look a book up by title
//! - [`list_books`] - All books in insertion order
//! - [`search_books`] - Advanced search from a search form payload
//! - [`text_search`] - Quick search over title, author, category and year
//! - [`old_books`] - Books published before 1950
//! - [`count_books`] - Number of books
//! - [`save_library`] / [`load_library`] - Whole-collection persistence
//! - [`close_library`] - Release the collection

pub mod app_config;
pub mod app_response;
pub mod book_form;
pub mod book_model;
pub mod collection_manager;
pub mod collection_store;
pub mod console;
pub mod library_action;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};

use crate::app_config::AppConfig;
use crate::app_response::AppResponse;
use crate::book_form::{BookForm, FormRenderer, SearchForm};
use crate::collection_manager::CollectionManager;
use crate::library_action::{FrontEnd, LibraryAction};

/// Creates a new, empty collection bound to a data file.
///
/// # Parameters
///
/// * `path` - Null-terminated path of the data file, or null to use the
///   configured default (`BOOK_COLLECTION_FILE` or `books_collection.store`)
///
/// # Returns
///
/// A pointer to the [`CollectionManager`], or null if `path` is not valid UTF-8.
/// Release it with [`close_library`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use book_collection_core::{create_library, close_library};
///
/// let path = CString::new("my_books.store").unwrap();
/// let library = create_library(path.as_ptr());
/// assert!(!library.is_null());
/// close_library(library);
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_library(path: *const c_char) -> *mut CollectionManager {
    let config = if path.is_null() {
        AppConfig::from_env()
    } else {
        match unsafe { CStr::from_ptr(path).to_str() } {
            Ok(p) => AppConfig::with_data_file(p),
            Err(e) => {
                warn!("Invalid UTF-8 in path parameter: {e}");
                return std::ptr::null_mut();
            }
        }
    };

    info!("Creating book collection backed by {}", config.data_file.display());
    Box::into_raw(Box::new(CollectionManager::new(&config)))
}

/// Adds a book from a [`BookForm`] JSON payload.
///
/// Returns the stored book as JSON, a `ValidationError` for bad form input
/// or duplicates, or a `BadRequest` for null pointers and malformed JSON.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use book_collection_core::{add_book, create_library, free_response};
///
/// let library = create_library(std::ptr::null());
/// let form = CString::new(
///     r#"{"title":"Dune","author":"Herbert","year":"1965","category":"SciFi","available":true}"#,
/// ).unwrap();
/// let response = add_book(library, form.as_ptr());
/// free_response(response as *mut _);
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn add_book(state: *mut CollectionManager, form_ptr: *const c_char) -> *const c_char {
    let manager = match state_mut(state, "add_book") {
        Ok(m) => m,
        Err(err) => return err,
    };

    let form: BookForm = match parse_payload(form_ptr, "form") {
        Ok(f) => f,
        Err(err) => return err,
    };

    let response = match form.validate() {
        Ok(book) => FormRenderer.perform(manager, LibraryAction::Add(book)),
        Err(e) => e,
    };
    response_to_c_string(&response)
}

/// Replaces the book titled `original_title` with the book described by a
/// [`BookForm`] payload.
///
/// The replacement is not checked against the rest of the collection.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn update_book(
    state: *mut CollectionManager,
    original_title: *const c_char,
    form_ptr: *const c_char,
) -> *const c_char {
    let manager = match state_mut(state, "update_book") {
        Ok(m) => m,
        Err(err) => return err,
    };

    let title = match c_ptr_to_string(original_title, "title") {
        Ok(t) => t,
        Err(err) => return err,
    };

    let form: BookForm = match parse_payload(form_ptr, "form") {
        Ok(f) => f,
        Err(err) => return err,
    };

    let original = match manager.find_by_title(&title) {
        Some(book) => book.clone(),
        None => {
            let not_found = AppResponse::NotFound(format!("No book titled '{title}'"));
            return response_to_c_string(&not_found);
        }
    };

    let response = match form.validate() {
        Ok(updated) => FormRenderer.perform(manager, LibraryAction::Update { original, updated }),
        Err(e) => e,
    };
    response_to_c_string(&response)
}

/// Removes the book titled `title`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn remove_book(state: *mut CollectionManager, title: *const c_char) -> *const c_char {
    let manager = match state_mut(state, "remove_book") {
        Ok(m) => m,
        Err(err) => return err,
    };

    let title = match c_ptr_to_string(title, "title") {
        Ok(t) => t,
        Err(err) => return err,
    };

    let response = match manager.find_by_title(&title).cloned() {
        Some(book) => FormRenderer.perform(manager, LibraryAction::Remove(book)),
        None => AppResponse::NotFound(format!("No book titled '{title}'")),
    };
    response_to_c_string(&response)
}

/// Looks a book up by title, ignoring case and surrounding whitespace.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn find_book(state: *mut CollectionManager, title: *const c_char) -> *const c_char {
    let manager = match state_mut(state, "find_book") {
        Ok(m) => m,
        Err(err) => return err,
    };

    let title = match c_ptr_to_string(title, "title") {
        Ok(t) => t,
        Err(err) => return err,
    };

    let response = FormRenderer.perform(manager, LibraryAction::FindByTitle(title));
    response_to_c_string(&response)
}

/// Returns every book as a JSON array in insertion order.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn list_books(state: *mut CollectionManager) -> *const c_char {
    run_action(state, "list_books", LibraryAction::ListAll)
}

/// Advanced search from a [`SearchForm`] payload. Blank fields match anything.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn search_books(state: *mut CollectionManager, form_ptr: *const c_char) -> *const c_char {
    let manager = match state_mut(state, "search_books") {
        Ok(m) => m,
        Err(err) => return err,
    };

    let form: SearchForm = match parse_payload(form_ptr, "search form") {
        Ok(f) => f,
        Err(err) => return err,
    };

    let response = match form.validate() {
        Ok(criteria) => FormRenderer.perform(manager, LibraryAction::Filter(criteria)),
        Err(e) => e,
    };
    response_to_c_string(&response)
}

/// Quick search. A null or blank `term` returns the whole collection.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn text_search(state: *mut CollectionManager, term: *const c_char) -> *const c_char {
    let term = if term.is_null() {
        None
    } else {
        match c_ptr_to_string(term, "term") {
            Ok(t) => Some(t),
            Err(err) => return err,
        }
    };

    run_action(state, "text_search", LibraryAction::TextSearch(term))
}

/// Books published before 1950, in insertion order.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn old_books(state: *mut CollectionManager) -> *const c_char {
    run_action(state, "old_books", LibraryAction::OldBooks)
}

/// Number of books, as the `Ok` payload.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn count_books(state: *mut CollectionManager) -> *const c_char {
    run_action(state, "count_books", LibraryAction::Count)
}

/// Writes the whole collection to its data file.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn save_library(state: *mut CollectionManager) -> *const c_char {
    run_action(state, "save_library", LibraryAction::Save)
}

/// Replaces the collection with the contents of its data file.
///
/// On failure the collection in memory is left as it was.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn load_library(state: *mut CollectionManager) -> *const c_char {
    run_action(state, "load_library", LibraryAction::Load)
}

/// Releases a collection created by [`create_library`].
///
/// Unsaved changes are discarded. The pointer must not be used afterwards.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_library(state: *mut CollectionManager) -> *const c_char {
    if state.is_null() {
        let error = AppResponse::BadRequest("Null state pointer passed to close_library".to_string());
        return response_to_c_string(&error);
    }

    let manager = unsafe { Box::from_raw(state) };
    info!("Closing book collection backed by {}", manager.store().path().display());
    drop(manager);

    response_to_c_string(&AppResponse::success("Library closed successfully"))
}

/// Frees a response string returned by any function of this library.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(response: *mut c_char) {
    if response.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(response) });
}

fn run_action(state: *mut CollectionManager, caller: &str, action: LibraryAction) -> *const c_char {
    let manager = match state_mut(state, caller) {
        Ok(m) => m,
        Err(err) => return err,
    };

    let response = FormRenderer.perform(manager, action);
    response_to_c_string(&response)
}

/// Borrows the collection behind `state`, or builds a `BadRequest` response.
fn state_mut<'a>(
    state: *mut CollectionManager,
    caller: &str,
) -> Result<&'a mut CollectionManager, *const c_char> {
    match unsafe { state.as_mut() } {
        Some(manager) => Ok(manager),
        None => {
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {caller}"));
            Err(response_to_c_string(&error))
        }
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(
    ptr: *const c_char,
    field_name: &str,
) -> Result<T, *const c_char> {
    let json = c_ptr_to_string(ptr, field_name)?;

    serde_json::from_str(&json).map_err(|e| {
        let error = AppResponse::BadRequest(format!("Invalid {field_name} JSON: {e}"));
        response_to_c_string(&error)
    })
}

/// Converts an [`AppResponse`] to a C-compatible string.
///
/// Returns a null pointer if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a Rust String.
///
/// * `Ok(String)` - If conversion was successful
/// * `Err(*const c_char)` - `BadRequest` response for null pointers or invalid UTF-8
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
