//! # Interactive Menu
//!
//! The main loop of the tool. Prints the numbered menu, reads a selection
//! through rustyline, and dispatches it through an explicit table mapping
//! option number → catalog operation.
//!
//! ## Execution Flow
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  Print menu, read selection                   │
//! └───────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌───────────────────────────────────────────────┐
//! │  Look up dispatch table entry                 │
//! │  "0" → exit    unknown → "Unknown option."    │
//! └───────────────────────────────────────────────┘
//!          │ report                  │ insert
//!          ▼                         ▼
//! ┌──────────────────┐     ┌─────────────────────┐
//! │ prompt + validate│     │ prompt + validate   │
//! │ params, run SQL, │     │ every field, then   │
//! │ render table     │     │ one atomic insert   │
//! └──────────────────┘     └─────────────────────┘
//!          │                         │
//!          ▼                         ▼
//! ┌───────────────────────────────────────────────┐
//! │  Print result or error, loop                  │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Operation failures (prepare/bind/step errors, rejected input, absent
//! foreign keys) are printed to stderr and the menu resumes; only input
//! I/O failures terminate the loop. Ctrl+C or Ctrl+D at a field prompt
//! cancels the current operation without touching storage.

use eyre::{Result, WrapErr};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::catalog::{self, Insert, Report, INSERTS, REPORTS};
use crate::cli::history::history_path;
use crate::database::Database;

#[derive(Clone, Copy)]
enum MenuOp {
    Report(&'static Report),
    Insert(&'static Insert),
}

impl MenuOp {
    fn title(&self) -> &'static str {
        match self {
            MenuOp::Report(report) => report.title,
            MenuOp::Insert(insert) => insert.title,
        }
    }
}

struct MenuEntry {
    choice: &'static str,
    op: MenuOp,
}

/// Selection → operation dispatch table. Menu text is derived from the
/// same entries, so display and dispatch cannot drift apart.
static MENU: [MenuEntry; 11] = [
    MenuEntry {
        choice: "1",
        op: MenuOp::Report(&REPORTS[0]),
    },
    MenuEntry {
        choice: "2",
        op: MenuOp::Report(&REPORTS[1]),
    },
    MenuEntry {
        choice: "3",
        op: MenuOp::Report(&REPORTS[2]),
    },
    MenuEntry {
        choice: "4",
        op: MenuOp::Report(&REPORTS[3]),
    },
    MenuEntry {
        choice: "5",
        op: MenuOp::Report(&REPORTS[4]),
    },
    MenuEntry {
        choice: "6",
        op: MenuOp::Report(&REPORTS[5]),
    },
    MenuEntry {
        choice: "7",
        op: MenuOp::Report(&REPORTS[6]),
    },
    MenuEntry {
        choice: "8",
        op: MenuOp::Report(&REPORTS[7]),
    },
    MenuEntry {
        choice: "9",
        op: MenuOp::Report(&REPORTS[8]),
    },
    MenuEntry {
        choice: "10",
        op: MenuOp::Insert(&INSERTS[0]),
    },
    MenuEntry {
        choice: "11",
        op: MenuOp::Insert(&INSERTS[1]),
    },
];

fn find_entry(choice: &str) -> Option<&'static MenuEntry> {
    MENU.iter().find(|entry| entry.choice == choice)
}

fn print_menu() {
    println!();
    println!("====== AIMS MENU ======");
    for entry in &MENU {
        println!("{}) {}", entry.choice, entry.op.title());
    }
    println!("0) Exit");
}

pub struct Menu {
    db: Database,
    editor: DefaultEditor,
}

impl Menu {
    pub fn new(db: Database) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        if let Some(history_file) = history_path() {
            let _ = editor.load_history(&history_file);
        }

        Ok(Self { db, editor })
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            print_menu();
            match self.editor.readline("Choose option: ") {
                Ok(line) => {
                    let choice = line.trim();
                    if choice.is_empty() {
                        continue;
                    }
                    self.editor.add_history_entry(choice).ok();
                    if !self.dispatch(choice) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye.");
                    break;
                }
                Err(err) => {
                    return Err(err).wrap_err("failed to read menu selection");
                }
            }
        }

        self.save_history();
        Ok(())
    }

    /// Returns false when the operator chose to exit.
    fn dispatch(&mut self, choice: &str) -> bool {
        if choice == "0" {
            println!("Goodbye.");
            return false;
        }

        let Some(entry) = find_entry(choice) else {
            println!("Unknown option.");
            return true;
        };

        let outcome = match entry.op {
            MenuOp::Report(report) => self.run_report(report),
            MenuOp::Insert(insert) => self.run_insert(insert),
        };
        if let Err(err) = outcome {
            eprintln!("Error: {err}");
        }
        true
    }

    fn run_report(&mut self, report: &Report) -> Result<()> {
        println!("\n-- {} --", report.title);

        let mut args = Vec::with_capacity(report.params.len());
        for spec in report.params {
            let Some(raw) = self.prompt(spec.prompt)? else {
                println!("Cancelled.");
                return Ok(());
            };
            args.push(catalog::validate_field(&self.db, spec, raw.trim())?);
        }

        let rendered = catalog::run_report(&self.db, report, &args)?;
        print!("{rendered}");
        Ok(())
    }

    fn run_insert(&mut self, insert: &Insert) -> Result<()> {
        println!("\n-- {} --", insert.title);

        // Every field validates before any statement is issued; the first
        // rejection aborts the whole operation.
        let mut values = Vec::with_capacity(insert.fields.len());
        for spec in insert.fields {
            let Some(raw) = self.prompt(spec.prompt)? else {
                println!("Cancelled.");
                return Ok(());
            };
            values.push(catalog::validate_field(&self.db, spec, raw.trim())?);
        }

        let affected = catalog::run_insert(&self.db, insert, &values)?;
        println!(
            "Inserted {} row{} into {}.",
            affected,
            if affected == 1 { "" } else { "s" },
            insert.table
        );
        Ok(())
    }

    /// Reads one prompted value; `None` means the operator cancelled with
    /// Ctrl+C or Ctrl+D.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        match self.editor.readline(label) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err).wrap_err("failed to read input"),
        }
    }

    fn save_history(&mut self) {
        if let Some(history_file) = history_path() {
            if let Err(err) = self.editor.save_history(&history_file) {
                eprintln!("Warning: could not save history: {}", err);
            }
        }
    }
}
