use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use docshelf_store::{ConsoleLogger, Level, Options, Store};

/// docshelf - embedded JSON document store over plain files
#[derive(Parser, Debug)]
#[command(name = "docshelf")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Store root directory
    #[arg(long, default_value = "./data")]
    root: PathBuf,

    /// Emit store diagnostics at debug level
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a record from a JSON argument, or stdin when omitted
    Put {
        collection: String,
        resource: String,
        json: Option<String>,
    },
    /// Print a record
    Get {
        collection: String,
        resource: String,
    },
    /// Print every record in a collection
    List { collection: String },
    /// Delete a record, or the whole collection when no resource is given
    Delete {
        collection: String,
        resource: Option<String>,
    },
    /// Seed sample records and walk the store operations
    Demo,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let threshold = if args.verbose {
        Level::Debug
    } else {
        Level::Info
    };
    let store = Store::open(
        &args.root,
        Options {
            logger: Some(Box::new(ConsoleLogger::new(threshold))),
        },
    )?;

    match args.command {
        Command::Put {
            collection,
            resource,
            json,
        } => {
            let text = match json {
                Some(text) => text,
                None => io::read_to_string(io::stdin())?,
            };
            let value: serde_json::Value = serde_json::from_str(&text)?;
            store.write(&collection, &resource, &value)?;
        }
        Command::Get {
            collection,
            resource,
        } => {
            let value: serde_json::Value = store.read(&collection, &resource)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::List { collection } => {
            for document in store.read_all(&collection)? {
                print!("{}", document);
            }
        }
        Command::Delete {
            collection,
            resource,
        } => {
            store.delete(&collection, resource.as_deref().unwrap_or(""))?;
        }
        Command::Demo => demo(&store)?,
    }

    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct Address {
    city: String,
    state: String,
    country: String,
    pincode: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct User {
    name: String,
    age: u32,
    contact: String,
    company: String,
    address: Address,
}

/// Seeds a `users` collection and walks write, read-all, read, and both
/// flavors of delete.
fn demo(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    let users = vec![
        User {
            name: "asha".to_string(),
            age: 30,
            contact: "555-0101".to_string(),
            company: "Initech".to_string(),
            address: Address {
                city: "Pune".to_string(),
                state: "Maharashtra".to_string(),
                country: "India".to_string(),
                pincode: "411001".to_string(),
            },
        },
        User {
            name: "diego".to_string(),
            age: 27,
            contact: "555-0102".to_string(),
            company: "Globex".to_string(),
            address: Address {
                city: "Valencia".to_string(),
                state: "Valencia".to_string(),
                country: "Spain".to_string(),
                pincode: "46001".to_string(),
            },
        },
        User {
            name: "mei".to_string(),
            age: 35,
            contact: "555-0103".to_string(),
            company: "Initech".to_string(),
            address: Address {
                city: "Taipei".to_string(),
                state: "Taipei".to_string(),
                country: "Taiwan".to_string(),
                pincode: "100".to_string(),
            },
        },
    ];

    for user in &users {
        store.write("users", &user.name, user)?;
    }

    let documents = store.read_all("users")?;
    println!("{} records in 'users':", documents.len());
    for raw in &documents {
        let user: User = serde_json::from_str(raw)?;
        println!("  {} <{}> ({}, {})", user.name, user.contact, user.company, user.address.city);
    }

    let first: User = store.read("users", &users[0].name)?;
    println!("read back '{}', age {}", first.name, first.age);

    store.delete("users", &users[0].name)?;
    println!(
        "deleted '{}', {} records remain",
        users[0].name,
        store.read_all("users")?.len()
    );

    store.delete("users", "")?;
    println!("deleted the 'users' collection");

    Ok(())
}
