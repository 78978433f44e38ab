//! Colored user-facing messages

use colored::Colorize;

/// Progress and per-project results
pub fn info(msg: &str) {
    println!("{}", msg.green());
}

/// Final success message
pub fn congrats(msg: &str) {
    println!("{}", msg.blue().bold());
}

/// Skipped work and non-fatal problems
pub fn warning(msg: &str) {
    eprintln!("{}", msg.yellow());
}

pub fn error(msg: &str) {
    eprintln!("{}", msg.red().bold());
}
