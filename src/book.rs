use std::{cell::RefCell, fmt, rc::Rc};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned to a book when it is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BookId(Uuid);

impl BookId {
    /// Generate a fresh random identifier
    #[must_use]
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to a book shared between its owner and the users holding it
pub type SharedBook = Rc<RefCell<Book>>;

/// A lendable book
///
/// Title and author can be edited freely; the id is fixed at creation and
/// is what identifies the book when it is returned.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Book {
    /// Title of the book
    title: String,
    /// Author of the book
    author: String,
    /// Identifier generated at creation
    id: BookId,
}

impl Book {
    /// Create a book with a freshly generated id
    #[must_use]
    pub fn new(title: &str, author: &str) -> Self {
        Self { title: title.to_string(), author: author.to_string(), id: BookId::generate() }
    }

    /// Wrap the book in a handle that can be lent out
    #[must_use]
    pub fn into_shared(self) -> SharedBook {
        Rc::new(RefCell::new(self))
    }

    /// Get the title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the author
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Get the id
    #[must_use]
    pub fn id(&self) -> BookId {
        self.id
    }

    /// Replace the title
    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Replace the author
    pub fn set_author(&mut self, author: &str) {
        self.author = author.to_string();
    }

    /// Labelled description with title, author and id
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Title: {}, Author: {}, ID: {}", self.title, self.author, self.id)
    }
}
