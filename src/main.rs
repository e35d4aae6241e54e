use clap::Parser;
use colored::Colorize;
use lending_system::{Book, LoanLogger, LoanReport, User};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the lending demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log every loan transition and rejected operation
    #[arg(short, long)]
    verbose: bool,

    /// Print the loan history as a markdown table at the end
    #[arg(long)]
    history: bool,

    /// Print the final user summary as JSON
    #[arg(long)]
    json: bool,
}

/// Install the log subscriber; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Print a section heading
fn heading(text: &str) {
    println!("\n{}", text.yellow().bold());
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    println!("{}", "Lending Demonstration".green().bold());
    println!("=====================");

    let book1 = Book::new("O Senhor dos Anéis", "J.R.R. Tolkien").into_shared();
    let book2 = Book::new("1984", "George Orwell").into_shared();
    let book3 = Book::new("Cem Anos de Solidão", "Gabriel García Márquez").into_shared();

    heading("Books created:");
    for book in [&book1, &book2, &book3] {
        println!("{}", book.borrow());
    }

    let mut user = User::new("João da Silva", "M2025001");
    user.register_observer(Box::new(LoanLogger));

    println!("\nRegistration number of {}: {}", user.name, user.registration_number());

    heading("Lending and returning:");
    for book in [&book1, &book2] {
        user.lend(book);
        println!("{} borrowed \"{}\".", user.name, book.borrow().title());
    }
    println!("Books on loan to {}:\n{}", user.name, LoanReport::borrowed_list(&user));

    heading("User after lending:");
    println!("{user}");

    println!();
    for book in [&book1, &book3] {
        match user.return_book(book) {
            Ok(()) => println!("{} returned \"{}\".", user.name, book.borrow().title()),
            Err(e) => println!("{} {e}", "Error:".red()),
        }
    }

    heading("User after returning:");
    println!("{user}");

    heading("Assigning the registration number directly...");
    println!(
        "{} the field is private, so `user.registration_number = ...` \
         does not compile outside the User type.",
        "Blocked:".red()
    );

    heading("Changing the registration number through the setter...");
    match user.set_registration_number("M2025100") {
        Ok(()) => {
            println!("New registration number of {}: {}", user.name, user.registration_number());
        }
        Err(e) => println!("{} {e}", "Error:".red()),
    }

    if args.history {
        heading("Loan history:");
        print!("{}", LoanReport::history_table(user.history()));
    }

    if args.json {
        heading("User summary:");
        match user.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => println!("{} {e}", "Error:".red()),
        }
    }

    println!("\n{}", "Demonstration complete!".green().bold());
}
