//! Books, users and the lending relationship between them.
//!
//! A [`User`] keeps a private registration number behind a guarded setter
//! and an ordered list of borrowed [`Book`]s. Lending and returning move a
//! book through the [`LoanState`] machine; every applied transition lands
//! in the user's history and is announced to registered observers.

pub mod book;
pub mod error;
pub mod events;
pub mod loan_state;
pub mod observers;
pub mod report;
pub mod timestamp;
pub mod user;

pub use book::{Book, BookId, SharedBook};
pub use error::LendingError;
pub use events::LoanEvent;
pub use loan_state::LoanState;
pub use observers::{LoanLogger, LoanObserver};
pub use report::LoanReport;
pub use user::{LoanRecord, User, UserSummary};
