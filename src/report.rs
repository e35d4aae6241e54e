use crate::user::{LoanRecord, User};

/// Text renderings of loans for presentation layers
#[derive(Debug)]
pub struct LoanReport;

impl LoanReport {
    /// Generate a markdown table of the loan history
    #[must_use]
    pub fn history_table(records: &[LoanRecord]) -> String {
        if records.is_empty() {
            return "No loans recorded yet.".to_string();
        }

        let mut table = String::from("| # | Book | Event | From | To |\n");
        table.push_str("|---|------|-------|------|----|\n");

        for (number, record) in (1_usize..).zip(records) {
            table.push_str(&format!(
                "| {number} | {} | {} | {} | {} |\n",
                record.title, record.event, record.from, record.to
            ));
        }

        table
    }

    /// One line per book the user holds, in lending order
    #[must_use]
    pub fn borrowed_list(user: &User) -> String {
        if user.borrowed_books().is_empty() {
            return "No books on loan.".to_string();
        }

        user.borrowed_books()
            .iter()
            .map(|book| {
                let book = book.borrow();
                format!("- {} ({})", book.title(), book.author())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
