//! Command implementations over the starred store.

use std::io::{self, BufRead, Write};
use std::path::Path;

use ashare_core::Result;
use ashare_store::StarredStore;

use crate::cli::{Cli, Command};

pub(crate) fn run(cli: &Cli) -> Result<()> {
    let store = StarredStore::open(&cli.db)?;

    match &cli.command {
        Command::List { user } => list(&store, user),
        Command::Add { code, name, user } => add(&store, code, name, user),
        Command::Remove { code, user } => remove(&store, code, user),
        Command::Clear { user, yes } => clear(&store, user, *yes),
        Command::Count { user } => {
            println!("{}", store.count(user)?);
            Ok(())
        }
        Command::Init => {
            // Opening the store above already created the schema.
            println!("Database initialized at {}", cli.db.display());
            Ok(())
        }
        Command::Backup { path } => backup(&store, path.as_deref()),
    }
}

fn list(store: &StarredStore, user: &str) -> Result<()> {
    let stocks = store.list(user)?;

    if stocks.is_empty() {
        println!("No starred stocks found for user: {user}");
        return Ok(());
    }

    println!("Starred stocks for user '{user}':");
    println!("{:-<52}", "");
    println!("{:<12} {:<20} {}", "Stock Code", "Stock Name", "Added At");
    println!("{:-<52}", "");

    for stock in &stocks {
        println!(
            "{:<12} {:<20} {}",
            stock.stock_code,
            stock.stock_name,
            stock.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    println!();
    println!("Total: {} stocks", stocks.len());
    Ok(())
}

fn add(store: &StarredStore, code: &str, name: &str, user: &str) -> Result<()> {
    if store.add(code, name, user)? {
        println!("Added {code} ({name}) to starred list");
    } else {
        println!("{code} is already in the starred list");
    }
    Ok(())
}

fn remove(store: &StarredStore, code: &str, user: &str) -> Result<()> {
    if store.remove(code, user)? {
        println!("Removed {code} from starred list");
    } else {
        println!("{code} is not in the starred list");
    }
    Ok(())
}

fn clear(store: &StarredStore, user: &str, yes: bool) -> Result<()> {
    let count = store.count(user)?;
    if count == 0 {
        println!("No starred stocks to clear for user: {user}");
        return Ok(());
    }

    if !yes && !confirm(&format!(
        "Are you sure you want to clear {count} starred stocks for user '{user}'? (y/N): "
    )) {
        println!("Operation cancelled");
        return Ok(());
    }

    let removed = store.clear_all(user)?;
    println!("Cleared {removed} starred stocks for user: {user}");
    Ok(())
}

fn backup(store: &StarredStore, path: Option<&Path>) -> Result<()> {
    let target = store.backup(path)?;
    println!("Database backed up to {}", target.display());
    Ok(())
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt}");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    answer.trim().eq_ignore_ascii_case("y")
}
