//! discuss - threaded discussion store CLI
//!
//! ## Quick Start
//!
//! ```bash
//! # Post a root comment on an object
//! discuss post --object post-1 --author alice "First!"
//!
//! # Reply to a comment
//! discuss post --parent <id> --author bob "Welcome"
//!
//! # List the thread
//! discuss list --object post-1
//! discuss list --children-of <id>
//!
//! # React and flag
//! discuss react <id> --user bob --kind like
//! discuss flag <id> --user carol --kind spam
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
