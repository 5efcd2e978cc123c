//! Text console front end.
//!
//! A numbered menu loop over any `BufRead`/`Write` pair, so the binary can
//! drive it with stdin/stdout and tests with in-memory buffers. End of input
//! behaves like choosing "Exit".

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::book_model::{Book, OLD_BOOK_YEAR};
use crate::collection_manager::CollectionManager;
use crate::library_action::{ActionOutcome, FilterCriteria, FrontEnd, LibraryAction};

const MENU: &[(u32, &str)] = &[
    (1, "Add new book"),
    (2, "Modify book"),
    (3, "Show all books"),
    (4, "Find book by title"),
    (5, "Save collection"),
    (6, "Load collection"),
    (7, "Advanced search"),
    (8, "Quick search"),
    (9, "Remove book"),
    (10, "Show old books"),
    (0, "Exit"),
];

pub struct Console<R, W> {
    input: R,
    output: W,
}

/// Renders outcomes as the lines printed by the console.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleRenderer;

impl FrontEnd for ConsoleRenderer {
    type Rendered = String;

    fn render(&self, outcome: &ActionOutcome) -> String {
        match outcome {
            ActionOutcome::Added(_) => "Book added successfully!".to_string(),
            ActionOutcome::Duplicate(_) => "This book already exists!".to_string(),
            ActionOutcome::Updated(_) => "Book updated!".to_string(),
            ActionOutcome::UpdateFailed(_) => "Update failed!".to_string(),
            ActionOutcome::Removed(book) => format!("Removed {}.", book.short_info()),
            ActionOutcome::RemoveFailed(_) => "Book not found!".to_string(),
            ActionOutcome::Found(book) => format!("Found: {book}"),
            ActionOutcome::TitleNotFound(_) => "Book not found.".to_string(),
            ActionOutcome::Collection(books) if books.is_empty() => {
                "Collection is empty.".to_string()
            }
            ActionOutcome::Collection(books) => numbered(books),
            ActionOutcome::SearchResults(books) if books.is_empty() => {
                "No books found.".to_string()
            }
            ActionOutcome::SearchResults(books) => {
                format!("Found {} books:\n{}", books.len(), numbered(books))
            }
            ActionOutcome::OldBooks(books) if books.is_empty() => {
                format!("No books published before {OLD_BOOK_YEAR}.")
            }
            ActionOutcome::OldBooks(books) => {
                format!("Found {} old books:\n{}", books.len(), numbered(books))
            }
            ActionOutcome::Count(count) => format!("Collection holds {count} books."),
            ActionOutcome::Saved(_) => "Collection saved!".to_string(),
            ActionOutcome::SaveFailed => "Save failed!".to_string(),
            ActionOutcome::Loaded(_) => "Collection loaded!".to_string(),
            ActionOutcome::LoadFailed(_) => "Load failed!".to_string(),
        }
    }
}

fn numbered(books: &[Book]) -> String {
    books
        .iter()
        .enumerate()
        .map(|(i, book)| format!("{}. {}", i + 1, book))
        .collect::<Vec<_>>()
        .join("\n")
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the menu loop until the user exits or input ends.
    pub fn run(&mut self, manager: &mut CollectionManager) -> io::Result<()> {
        info!("Console session started");
        writeln!(self.output, "=== Book Collection Manager ===")?;

        loop {
            self.show_options()?;
            let selection = match self.prompt_number("Choose action: ")? {
                Some(n) => n,
                None => break,
            };
            debug!("Menu selection {selection}");

            let keep_going = match selection {
                1 => self.create_book(manager)?,
                2 => self.modify_book(manager)?,
                3 => self.display_all(manager)?,
                4 => self.find_book(manager)?,
                5 => self.perform(manager, LibraryAction::Save)?,
                6 => self.perform(manager, LibraryAction::Load)?,
                7 => self.advanced_search(manager)?,
                8 => self.quick_search(manager)?,
                9 => self.remove_book(manager)?,
                10 => self.old_books(manager)?,
                0 => break,
                _ => {
                    writeln!(self.output, "Invalid choice!")?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        info!("Console session ended");
        Ok(())
    }

    fn show_options(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Options ---")?;
        for (number, label) in MENU {
            writeln!(self.output, "{number}. {label}")?;
        }
        Ok(())
    }

    // Each handler returns Ok(false) when input ran out mid-dialog.

    fn create_book(&mut self, manager: &mut CollectionManager) -> io::Result<bool> {
        writeln!(self.output, "\n--- Add New Book ---")?;

        let Some(title) = self.prompt_text("Book title: ")? else {
            return Ok(false);
        };
        let Some(author) = self.prompt_text("Author: ")? else {
            return Ok(false);
        };
        let Some(year) = self.prompt_number("Publication year: ")? else {
            return Ok(false);
        };
        let Some(category) = self.prompt_text("Category: ")? else {
            return Ok(false);
        };

        if title.is_empty() || author.is_empty() {
            writeln!(self.output, "Title and author are required!")?;
            return Ok(true);
        }

        self.perform(
            manager,
            LibraryAction::Add(Book::new(title, author, year, category)),
        )
    }

    fn modify_book(&mut self, manager: &mut CollectionManager) -> io::Result<bool> {
        writeln!(self.output, "\n--- Modify Book ---")?;

        let Some(title) = self.prompt_text("Enter book title to modify: ")? else {
            return Ok(false);
        };
        let existing = match manager.find_by_title(&title) {
            Some(book) => book.clone(),
            None => {
                writeln!(self.output, "Book not found!")?;
                return Ok(true);
            }
        };
        writeln!(self.output, "Current: {existing}")?;

        let Some(new_title) = self.prompt_text("New title (empty to keep): ")? else {
            return Ok(false);
        };
        let Some(new_author) = self.prompt_text("New author (empty to keep): ")? else {
            return Ok(false);
        };
        let Some(year_input) = self.prompt_text("New year (empty to keep): ")? else {
            return Ok(false);
        };
        let Some(new_category) = self.prompt_text("New category (empty to keep): ")? else {
            return Ok(false);
        };
        let Some(stock_input) = self.prompt_text("In stock? (y/n, empty to keep): ")? else {
            return Ok(false);
        };

        let year = if year_input.is_empty() {
            existing.year()
        } else {
            match year_input.parse::<i32>() {
                Ok(year) => year,
                Err(_) => {
                    writeln!(self.output, "Invalid year format!")?;
                    return Ok(true);
                }
            }
        };

        let in_stock = match stock_input.to_lowercase().as_str() {
            "" => existing.in_stock(),
            "y" | "yes" => true,
            "n" | "no" => false,
            _ => {
                writeln!(self.output, "Please answer y or n!")?;
                return Ok(true);
            }
        };

        let mut updated = Book::new(
            keep_or_replace(&new_title, existing.title()),
            keep_or_replace(&new_author, existing.author()),
            year,
            keep_or_replace(&new_category, existing.category()),
        );
        updated.set_in_stock(in_stock);

        self.perform(
            manager,
            LibraryAction::Update {
                original: existing,
                updated,
            },
        )
    }

    fn display_all(&mut self, manager: &mut CollectionManager) -> io::Result<bool> {
        writeln!(
            self.output,
            "\n--- Book Collection ({} books) ---",
            manager.count()
        )?;
        self.perform(manager, LibraryAction::ListAll)
    }

    fn find_book(&mut self, manager: &mut CollectionManager) -> io::Result<bool> {
        writeln!(self.output, "\n--- Find Book ---")?;
        let Some(title) = self.prompt_text("Enter book title: ")? else {
            return Ok(false);
        };
        self.perform(manager, LibraryAction::FindByTitle(title))
    }

    fn advanced_search(&mut self, manager: &mut CollectionManager) -> io::Result<bool> {
        writeln!(self.output, "\n--- Advanced Search ---")?;

        let Some(title) = self.prompt_text("Title (skip if any): ")? else {
            return Ok(false);
        };
        let Some(author) = self.prompt_text("Author (skip if any): ")? else {
            return Ok(false);
        };
        let Some(category) = self.prompt_text("Category (skip if any): ")? else {
            return Ok(false);
        };
        let Some(year_input) = self.prompt_text("Year (skip if any): ")? else {
            return Ok(false);
        };

        let year = if year_input.is_empty() {
            None
        } else {
            match year_input.parse::<i32>() {
                Ok(year) => Some(year),
                Err(_) => {
                    writeln!(self.output, "Invalid year format!")?;
                    return Ok(true);
                }
            }
        };

        let criteria = FilterCriteria {
            title: non_empty(title),
            author: non_empty(author),
            category: non_empty(category),
            year,
        };
        self.perform(manager, LibraryAction::Filter(criteria))
    }

    fn quick_search(&mut self, manager: &mut CollectionManager) -> io::Result<bool> {
        writeln!(self.output, "\n--- Quick Search ---")?;
        let Some(term) = self.prompt_text("Search text: ")? else {
            return Ok(false);
        };
        self.perform(manager, LibraryAction::TextSearch(non_empty(term)))
    }

    fn remove_book(&mut self, manager: &mut CollectionManager) -> io::Result<bool> {
        writeln!(self.output, "\n--- Remove Book ---")?;
        let Some(title) = self.prompt_text("Enter book title to remove: ")? else {
            return Ok(false);
        };
        let book = match manager.find_by_title(&title) {
            Some(book) => book.clone(),
            None => {
                writeln!(self.output, "Book not found!")?;
                return Ok(true);
            }
        };
        self.perform(manager, LibraryAction::Remove(book))
    }

    fn old_books(&mut self, manager: &mut CollectionManager) -> io::Result<bool> {
        writeln!(self.output, "\n--- Old Books ---")?;
        self.perform(manager, LibraryAction::OldBooks)
    }

    fn perform(&mut self, manager: &mut CollectionManager, action: LibraryAction) -> io::Result<bool> {
        let rendered = ConsoleRenderer.perform(manager, action);
        writeln!(self.output, "{rendered}")?;
        Ok(true)
    }

    /// Reads one trimmed line; `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 become U+FFFD instead of ending the session.
    fn prompt_text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    fn prompt_number(&mut self, prompt: &str) -> io::Result<Option<i32>> {
        loop {
            let Some(text) = self.prompt_text(prompt)? else {
                return Ok(None);
            };
            match text.parse::<i32>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => writeln!(self.output, "Please enter a valid number!")?,
            }
        }
    }
}

fn keep_or_replace(input: &str, current: &str) -> String {
    if input.is_empty() {
        current.to_string()
    } else {
        input.to_string()
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
