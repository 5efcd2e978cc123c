//! Flat-file persistence for the book collection.
//!
//! The whole collection is written as one JSON document:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "books": [
//!     {"title": "Dune", "author": "Herbert", "year": 1965, "category": "SciFi", "in_stock": true}
//!   ]
//! }
//! ```
//!
//! `books` keeps collection order. Writes go to a sibling `.tmp` file that is
//! renamed over the target, so a failed save never leaves a truncated file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::book_model::Book;

/// Version tag written into every data file.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CollectionFile {
    format_version: u32,
    books: Vec<Book>,
}

/// Reads and writes the collection data file at a fixed path.
#[derive(Debug, Clone)]
pub struct CollectionStore {
    path: PathBuf,
}

impl CollectionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Overwrites the data file with `books`.
    pub fn write_all(&self, books: &[Book]) -> Result<(), AppResponse> {
        let json = encode(books)?;
        let temp_path = self.temp_path();

        let written = fs::File::create(&temp_path).and_then(|mut file| {
            file.write_all(json.as_bytes())?;
            file.sync_all()
        });

        if let Err(e) = written {
            self.discard_temp(&temp_path);
            return Err(AppResponse::StorageError(format!(
                "Failed to write {}: {e}",
                temp_path.display()
            )));
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            self.discard_temp(&temp_path);
            return Err(AppResponse::StorageError(format!(
                "Failed to replace {}: {e}",
                self.path.display()
            )));
        }

        debug!("Wrote {} books to {}", books.len(), self.path.display());
        Ok(())
    }

    /// Reads every book from the data file in stored order.
    pub fn read_all(&self) -> Result<Vec<Book>, AppResponse> {
        if !self.exists() {
            return Err(AppResponse::NotFound(format!(
                "No data file at {}",
                self.path.display()
            )));
        }

        let json = fs::read_to_string(&self.path)?;
        decode(&json)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn discard_temp(&self, temp_path: &Path) {
        if temp_path.exists() {
            if let Err(e) = fs::remove_file(temp_path) {
                warn!("Could not remove temporary file {}: {e}", temp_path.display());
            }
        }
    }
}

/// Serializes `books` into the documented data file layout.
pub fn encode(books: &[Book]) -> Result<String, AppResponse> {
    let file = CollectionFile {
        format_version: FORMAT_VERSION,
        books: books.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Parses a data file, rejecting unknown format versions.
pub fn decode(json: &str) -> Result<Vec<Book>, AppResponse> {
    let file: CollectionFile = serde_json::from_str(json)?;

    if file.format_version != FORMAT_VERSION {
        return Err(AppResponse::SerializationError(format!(
            "Unsupported format version {} (expected {FORMAT_VERSION})",
            file.format_version
        )));
    }

    Ok(file.books)
}
