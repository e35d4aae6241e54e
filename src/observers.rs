use tracing::info;

use crate::{book::Book, user::LoanRecord};

/// Trait for loan transition observation
pub trait LoanObserver {
    /// Called after a lend or return has been applied
    fn on_loan_event(&self, user: &str, book: &Book, record: &LoanRecord);
}

/// Logs all loan transitions through `tracing`
#[derive(Debug)]
pub struct LoanLogger;

impl LoanObserver for LoanLogger {
    fn on_loan_event(&self, user: &str, book: &Book, record: &LoanRecord) {
        info!(
            user,
            book = book.title(),
            book_id = %record.book_id,
            event = %record.event,
            "loan transition {} --({})--> {}",
            record.from,
            record.event,
            record.to
        );
    }
}
