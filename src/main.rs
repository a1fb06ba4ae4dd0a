//! todo - To-do lists from the command line or a web server

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = todo_lists::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
