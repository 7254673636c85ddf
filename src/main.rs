//! Binary entry point for `loman`.

use std::process;

fn main() {
    if let Err(e) = loman::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
