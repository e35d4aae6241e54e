use std::{cell::RefCell, rc::Rc};

use rstest::rstest;

use crate::{
    book::{Book, BookId, SharedBook},
    error::LendingError,
    events::LoanEvent,
    loan_state::LoanState,
    observers::LoanObserver,
    user::{LoanRecord, User},
};

/// Observer that keeps every record it is handed
#[derive(Debug, Default)]
struct RecordingObserver {
    /// Records seen so far, shared with the test body
    seen: Rc<RefCell<Vec<LoanRecord>>>,
}

impl LoanObserver for RecordingObserver {
    fn on_loan_event(&self, _user: &str, _book: &Book, record: &LoanRecord) {
        self.seen.borrow_mut().push(record.clone());
    }
}

/// Helper function to set up a user with no books on loan
fn setup_test_user() -> User {
    User::new("Test User", "M0000001")
}

/// Helper function to create a lendable book
fn shared_book(title: &str) -> SharedBook {
    Book::new(title, "Author").into_shared()
}

/// Ids of the books a user holds, in lending order
fn borrowed_ids(user: &User) -> Vec<BookId> {
    user.borrowed_books().iter().map(|b| b.borrow().id()).collect()
}

#[test]
fn test_initial_state() {
    let user = setup_test_user();
    assert_eq!(user.name, "Test User");
    assert_eq!(user.registration_number(), "M0000001");
    assert!(user.borrowed_books().is_empty());
    assert!(user.history().is_empty());
}

#[test]
fn test_set_registration_number() {
    let mut user = setup_test_user();
    assert!(user.set_registration_number("M2025100").is_ok());
    assert_eq!(user.registration_number(), "M2025100");
}

#[rstest]
#[case("")]
#[case(" ")]
#[case("\t\n")]
fn test_blank_registration_number_is_rejected(#[case] value: &str) {
    let mut user = setup_test_user();
    let result = user.set_registration_number(value);
    assert_eq!(result, Err(LendingError::EmptyRegistrationNumber));
    assert_eq!(user.registration_number(), "M0000001");
}

#[test]
fn test_lend_then_return_restores_books() {
    let mut user = setup_test_user();
    let kept = shared_book("Kept");
    let book = shared_book("Borrowed");
    user.lend(&kept);
    let before = borrowed_ids(&user);

    user.lend(&book);
    assert_eq!(user.loan_state(&book.borrow()), LoanState::Borrowed);

    let result = user.return_book(&book);
    assert!(result.is_ok());
    assert_eq!(borrowed_ids(&user), before);
    assert_eq!(user.loan_state(&book.borrow()), LoanState::NotBorrowed);
}

#[test]
fn test_return_of_book_never_lent() {
    let mut user = setup_test_user();
    let lent = shared_book("Lent");
    let stranger = shared_book("Stranger");
    user.lend(&lent);

    let result = user.return_book(&stranger);
    assert_eq!(
        result,
        Err(LendingError::NotBorrowed {
            user: "Test User".to_string(),
            title: "Stranger".to_string(),
            book_id: stranger.borrow().id(),
        })
    );
    assert_eq!(borrowed_ids(&user), vec![lent.borrow().id()]);
    assert_eq!(user.history().len(), 1);
}

#[test]
fn test_return_matches_by_id_not_title() {
    let mut user = setup_test_user();
    let original = shared_book("Twin");
    let twin = shared_book("Twin");
    user.lend(&original);

    assert!(user.return_book(&twin).is_err());
    assert!(user.is_borrowing(&original.borrow()));
}

#[test]
fn test_describe_follows_title_change_after_lend() {
    let mut user = setup_test_user();
    let book = shared_book("Old title");
    user.lend(&book);

    book.borrow_mut().set_title("New title");
    assert!(user.describe().ends_with("Borrowed books: New title"));

    assert!(user.return_book(&book).is_ok());
    assert!(user.borrowed_books().is_empty());
}

#[test]
fn test_user_holds_the_same_book() {
    let mut user = setup_test_user();
    let book = shared_book("Handle");
    user.lend(&book);

    let held = user.borrowed_books().first().map(|b| Rc::ptr_eq(b, &book));
    assert_eq!(held, Some(true));
}

#[test]
fn test_duplicate_lend_keeps_book_borrowed() {
    let mut user = setup_test_user();
    let book = shared_book("Twice");
    user.lend(&book);
    user.lend(&book);
    assert_eq!(user.borrowed_books().len(), 2);

    assert!(user.return_book(&book).is_ok());
    assert_eq!(user.borrowed_books().len(), 1);
    assert_eq!(user.loan_state(&book.borrow()), LoanState::Borrowed);

    assert!(user.return_book(&book).is_ok());
    assert_eq!(user.loan_state(&book.borrow()), LoanState::NotBorrowed);
    assert!(user.return_book(&book).is_err());
}

#[test]
fn test_same_book_lent_to_two_users() {
    let mut first = setup_test_user();
    let mut second = User::new("Other User", "M0000002");
    let book = shared_book("Shared");

    first.lend(&book);
    second.lend(&book);

    assert!(first.is_borrowing(&book.borrow()));
    assert!(second.is_borrowing(&book.borrow()));
}

#[test]
#[allow(clippy::indexing_slicing)]
fn test_history_tracking() {
    let mut user = setup_test_user();
    let book = shared_book("Tracked");

    user.lend(&book);
    drop(user.return_book(&book));
    drop(user.return_book(&book));

    let history = user.history();
    assert_eq!(history.len(), 2);

    assert_eq!(history[0].event, LoanEvent::Lend);
    assert_eq!(history[0].from, LoanState::NotBorrowed);
    assert_eq!(history[0].to, LoanState::Borrowed);
    assert_eq!(history[0].book_id, book.borrow().id());
    assert_eq!(history[0].title, "Tracked");

    assert_eq!(history[1].event, LoanEvent::Return);
    assert_eq!(history[1].from, LoanState::Borrowed);
    assert_eq!(history[1].to, LoanState::NotBorrowed);
}

#[test]
#[allow(clippy::indexing_slicing)]
fn test_history_limit_drops_oldest() {
    let mut user = setup_test_user().with_history_limit(2);
    let first = shared_book("First");
    let second = shared_book("Second");
    let third = shared_book("Third");

    user.lend(&first);
    user.lend(&second);
    user.lend(&third);

    assert_eq!(user.history().len(), 2);
    assert_eq!(user.history()[0].book_id, second.borrow().id());
    assert_eq!(user.history()[1].book_id, third.borrow().id());
    assert_eq!(user.borrowed_books().len(), 3);
}

#[test]
fn test_observers_see_applied_events_only() {
    let mut user = setup_test_user();
    let seen = Rc::new(RefCell::new(Vec::new()));
    user.register_observer(Box::new(RecordingObserver { seen: Rc::clone(&seen) }));

    let book = shared_book("Observed");
    user.lend(&book);
    drop(user.return_book(&book));
    drop(user.return_book(&book));
    drop(user.set_registration_number(""));

    let events: Vec<LoanEvent> = seen.borrow().iter().map(|r| r.event).collect();
    assert_eq!(events, vec![LoanEvent::Lend, LoanEvent::Return]);
}

#[test]
fn test_describe_lists_titles_in_order() {
    let mut user = User::new("João da Silva", "M2025001");
    assert_eq!(user.describe(), "User: João da Silva, Registration: M2025001, Borrowed books: ");

    user.lend(&Book::new("O Senhor dos Anéis", "J.R.R. Tolkien").into_shared());
    user.lend(&Book::new("1984", "George Orwell").into_shared());
    assert_eq!(
        user.describe(),
        "User: João da Silva, Registration: M2025001, Borrowed books: O Senhor dos Anéis, 1984"
    );
}

#[test]
fn test_name_is_public() {
    let mut user = setup_test_user();
    user.name = "Renamed".to_string();
    assert!(user.describe().starts_with("User: Renamed,"));
}

#[test]
#[allow(clippy::panic)]
fn test_summary_json() {
    let mut user = setup_test_user();
    let book = shared_book("Serialized");
    user.lend(&book);

    let summary = user.summary();
    assert_eq!(summary.borrowed_books, vec![book.borrow().clone()]);
    assert_eq!(summary.history_len, 1);

    let Ok(json) = user.to_json() else {
        panic!("summary should serialize");
    };
    assert!(json.contains("\"registration_number\": \"M0000001\""));
    assert!(json.contains(&book.borrow().id().to_string()));
}
