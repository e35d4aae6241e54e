use std::{fmt, rc::Rc};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    book::{Book, BookId, SharedBook},
    error::LendingError,
    events::LoanEvent,
    loan_state::LoanState,
    observers::LoanObserver,
    timestamp::TimeStamp,
};

/// Default number of history entries kept per user
const DEFAULT_MAX_HISTORY_SIZE: usize = 100;

/// Represents an applied lend or return in a user's history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoanRecord {
    /// The book the event applied to
    pub book_id: BookId,
    /// Title of the book when the event happened
    pub title: String,
    /// The event that was applied
    pub event: LoanEvent,
    /// Loan state of the book before the event
    pub from: LoanState,
    /// Loan state of the book after the event
    pub to: LoanState,
    /// When the event was applied
    pub timestamp: TimeStamp,
}

/// Serializable snapshot of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    /// Name of the user
    pub name: String,
    /// Current registration number
    pub registration_number: String,
    /// Books on loan, in lending order
    pub borrowed_books: Vec<Book>,
    /// Number of recorded loan events
    pub history_len: usize,
}

/// A library user holding zero or more borrowed books
///
/// The registration number can only be changed through
/// [`User::set_registration_number`]; assigning the field directly does not
/// compile outside this module:
///
/// ```compile_fail
/// let mut user = lending_system::User::new("João da Silva", "M2025001");
/// user.registration_number = String::from("M2025999");
/// ```
pub struct User {
    /// Display name, freely editable
    pub name: String,
    /// Registration number, never blank
    registration_number: String,
    /// Handles to the books on loan in lending order, duplicates allowed
    borrowed_books: Vec<SharedBook>,
    /// Applied loan events, oldest first
    history: Vec<LoanRecord>,
    /// Maximum number of history entries to keep
    max_history_size: usize,
    /// Registered loan observers
    observers: Vec<Box<dyn LoanObserver>>,
}

// Manual implementation of Debug for User
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("registration_number", &self.registration_number)
            .field("borrowed_books", &self.borrowed_books)
            .field("history", &self.history)
            .field("max_history_size", &self.max_history_size)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl User {
    /// Create a user with no books on loan
    #[must_use]
    pub fn new(name: &str, registration_number: &str) -> Self {
        Self {
            name: name.to_string(),
            registration_number: registration_number.to_string(),
            borrowed_books: Vec::new(),
            history: Vec::new(),
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            observers: Vec::new(),
        }
    }

    /// Limit the number of history entries kept, dropping the oldest first
    #[must_use]
    pub fn with_history_limit(mut self, max_history_size: usize) -> Self {
        self.max_history_size = max_history_size;
        self.trim_history();
        self
    }

    /// Get the registration number
    #[must_use]
    pub fn registration_number(&self) -> &str {
        &self.registration_number
    }

    /// Replace the registration number
    ///
    /// # Errors
    ///
    /// Returns `LendingError::EmptyRegistrationNumber` if `registration_number`
    /// is empty or only whitespace. The stored value is left unchanged.
    pub fn set_registration_number(
        &mut self,
        registration_number: &str,
    ) -> Result<(), LendingError> {
        if registration_number.trim().is_empty() {
            debug!(user = %self.name, "rejected blank registration number");
            return Err(LendingError::EmptyRegistrationNumber);
        }

        self.registration_number = registration_number.to_string();
        Ok(())
    }

    /// Register an observer to be notified of applied loan events
    pub fn register_observer(&mut self, observer: Box<dyn LoanObserver>) {
        self.observers.push(observer);
    }

    /// Lend a book to this user
    ///
    /// Always succeeds. The user keeps a handle to the book, so later edits
    /// to its title or author show up in the user's description. Lending a
    /// book the user already holds adds a second entry, and other users
    /// holding the same book are not consulted.
    pub fn lend(&mut self, book: &SharedBook) {
        let from = self.loan_state(&book.borrow());
        self.borrowed_books.push(Rc::clone(book));
        self.record(&book.borrow(), LoanEvent::Lend, from);
    }

    /// Return a book previously lent to this user
    ///
    /// The first entry with the same id as `book` is removed.
    ///
    /// # Errors
    ///
    /// Returns `LendingError::NotBorrowed` if the user does not hold the
    /// book. Nothing is changed in that case.
    pub fn return_book(&mut self, book: &SharedBook) -> Result<(), LendingError> {
        let book = book.borrow();
        let from = self.loan_state(&book);
        let position =
            from.next(LoanEvent::Return).and_then(|_| self.position_of(book.id()));

        let Some(position) = position else {
            debug!(
                user = %self.name,
                book = book.title(),
                "rejected return of a book not on loan"
            );
            return Err(LendingError::NotBorrowed {
                user: self.name.clone(),
                title: book.title().to_string(),
                book_id: book.id(),
            });
        };

        self.borrowed_books.remove(position);
        self.record(&book, LoanEvent::Return, from);
        Ok(())
    }

    /// Get handles to the books on loan, in lending order
    #[must_use]
    pub fn borrowed_books(&self) -> &[SharedBook] {
        &self.borrowed_books
    }

    /// Check whether the user holds the book
    #[must_use]
    pub fn is_borrowing(&self, book: &Book) -> bool {
        self.position_of(book.id()).is_some()
    }

    /// Current loan state of the book for this user
    #[must_use]
    pub fn loan_state(&self, book: &Book) -> LoanState {
        if self.is_borrowing(book) { LoanState::Borrowed } else { LoanState::NotBorrowed }
    }

    /// Get the applied loan events, oldest first
    #[must_use]
    pub fn history(&self) -> &[LoanRecord] {
        &self.history
    }

    /// Labelled description with name, registration number and the titles
    /// of the borrowed books
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Snapshot of the user for serialization
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            name: self.name.clone(),
            registration_number: self.registration_number.clone(),
            borrowed_books: self.borrowed_books.iter().map(|b| b.borrow().clone()).collect(),
            history_len: self.history.len(),
        }
    }

    /// Render the user summary as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns a `LendingError::Serialization` if the summary cannot be
    /// serialized
    pub fn to_json(&self) -> Result<String, LendingError> {
        serde_json::to_string_pretty(&self.summary())
            .map_err(|e| LendingError::Serialization(e.to_string()))
    }

    /// Find the first borrowed entry with the given id
    fn position_of(&self, id: BookId) -> Option<usize> {
        self.borrowed_books.iter().position(|b| b.borrow().id() == id)
    }

    /// Append an applied event to the history and notify observers
    fn record(&mut self, book: &Book, event: LoanEvent, from: LoanState) {
        let record = LoanRecord {
            book_id: book.id(),
            title: book.title().to_string(),
            event,
            from,
            to: self.loan_state(book),
            timestamp: TimeStamp::now(),
        };

        for observer in &self.observers {
            observer.on_loan_event(&self.name, book, &record);
        }

        self.history.push(record);
        self.trim_history();
    }

    /// Drop the oldest history entries beyond the size limit
    fn trim_history(&mut self) {
        if self.history.len() > self.max_history_size {
            let excess = self.history.len().saturating_sub(self.max_history_size);
            self.history.drain(..excess);
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let titles: Vec<String> =
            self.borrowed_books.iter().map(|b| b.borrow().title().to_string()).collect();
        write!(
            f,
            "User: {}, Registration: {}, Borrowed books: {}",
            self.name,
            self.registration_number,
            titles.join(", ")
        )
    }
}

// Include tests module
#[cfg(test)]
mod tests;
