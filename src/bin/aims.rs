//! # AIMS CLI Entry Point
//!
//! Binary entry point for the agricultural monitoring CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Open a monitoring database and start the menu
//! aims ./aims.sqlite
//!
//! # Show version
//! aims --version
//!
//! # Show help
//! aims --help
//! ```

use std::env;
use std::path::PathBuf;

use aims::catalog::REQUIRED_TABLES;
use aims::cli::Menu;
use aims::Database;
use eyre::{bail, Result, WrapErr};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("aims {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            arg if arg.starts_with('-') => {
                bail!("Unknown option: {}", arg);
            }
            path => {
                if db_path.is_some() {
                    bail!("Multiple database paths specified");
                }
                db_path = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    let db_path = match db_path {
        Some(p) => p,
        None => {
            print_usage();
            bail!("missing required <DATABASE_FILE> argument");
        }
    };

    if !db_path.is_file() {
        bail!("database file not found: {}", db_path.display());
    }

    let db = Database::open(&db_path)
        .wrap_err_with(|| format!("failed to open database at {:?}", db_path))?;

    for missing in db.schema_report(REQUIRED_TABLES) {
        eprintln!(
            "Warning: required table '{}' not found; dependent operations may fail.",
            missing
        );
    }

    let mut menu = Menu::new(db)?;
    menu.run()?;

    Ok(())
}

fn print_usage() {
    println!("AIMS - Agricultural information monitoring CLI");
    println!();
    println!("USAGE:");
    println!("    aims <DATABASE_FILE>");
    println!();
    println!("ARGS:");
    println!("    <DATABASE_FILE>    Path to the SQLite monitoring database");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help         Print help information");
    println!("    -v, --version      Print version information");
    println!();
    println!("EXAMPLES:");
    println!("    aims ./aims.sqlite     Open the database and show the menu");
}
