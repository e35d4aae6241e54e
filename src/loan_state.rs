use std::fmt;

use serde::{Deserialize, Serialize};

use crate::events::LoanEvent;

/// Loan state of one book with respect to one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LoanState {
    /// The user does not hold the book
    #[default]
    NotBorrowed,
    /// The user holds at least one copy of the book
    Borrowed,
}

impl LoanState {
    /// State reached by applying `event`, or `None` if the event is not
    /// valid from this state
    ///
    /// Lending is always allowed, including on a book already borrowed.
    /// Returning an outstanding book lands in `NotBorrowed`; the caller
    /// decides whether a remaining duplicate keeps it `Borrowed`.
    #[must_use]
    pub fn next(self, event: LoanEvent) -> Option<Self> {
        match (self, event) {
            (_, LoanEvent::Lend) => Some(Self::Borrowed),
            (Self::Borrowed, LoanEvent::Return) => Some(Self::NotBorrowed),
            (Self::NotBorrowed, LoanEvent::Return) => None,
        }
    }
}

impl fmt::Display for LoanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotBorrowed => write!(f, "NotBorrowed"),
            Self::Borrowed => write!(f, "Borrowed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LoanState;
    use crate::events::LoanEvent;

    #[test]
    fn test_lend_always_borrows() {
        assert_eq!(LoanState::NotBorrowed.next(LoanEvent::Lend), Some(LoanState::Borrowed));
        assert_eq!(LoanState::Borrowed.next(LoanEvent::Lend), Some(LoanState::Borrowed));
    }

    #[test]
    fn test_return_requires_borrowed() {
        assert_eq!(LoanState::Borrowed.next(LoanEvent::Return), Some(LoanState::NotBorrowed));
        assert_eq!(LoanState::NotBorrowed.next(LoanEvent::Return), None);
    }

    #[test]
    fn test_default_is_not_borrowed() {
        assert_eq!(LoanState::default(), LoanState::NotBorrowed);
    }
}
