use std::fmt;

use serde::{Deserialize, Serialize};

/// Events that move a book between loan states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LoanEvent {
    /// Lend a book to a user
    Lend,
    /// Return a book the user holds
    Return,
}

impl fmt::Display for LoanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lend => write!(f, "Lend"),
            Self::Return => write!(f, "Return"),
        }
    }
}
