use thiserror::Error;

use crate::book::BookId;

/// Errors returned by lending operations
///
/// Every variant is recoverable: the user is left exactly as it was before
/// the failed call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LendingError {
    /// The registration number was empty or only whitespace
    #[error("Registration number cannot be empty")]
    EmptyRegistrationNumber,
    /// The book is not currently on loan to the user
    #[error("User {user} does not have the book \"{title}\" on loan")]
    NotBorrowed {
        /// Name of the user the return was attempted on
        user: String,
        /// Title of the book at the time of the attempt
        title: String,
        /// Id of the book
        book_id: BookId,
    },
    /// A summary could not be rendered as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}
