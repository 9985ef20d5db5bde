//! SamBasic command-line interpreter.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use samc::{init_tracing, Driver, InterpreterBuilder};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let mut file_path: Option<&str> = None;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return;
            }
            "--version" | "-V" => {
                println!("SamBasic {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            flag if flag.starts_with('-') => {
                eprintln!("Unknown option: {flag}");
                eprintln!();
                eprintln!("Usage: sambasic [FILE]");
                std::process::exit(1);
            }
            path if file_path.is_none() => file_path = Some(path),
            extra => {
                eprintln!("error: unexpected argument '{extra}'");
                eprintln!("Usage: sambasic [FILE]");
                std::process::exit(1);
            }
        }
    }

    let interrupt = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupt);
    if let Err(err) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        tracing::warn!(%err, "could not install interrupt handler");
    }

    let interp = InterpreterBuilder::new().interrupt(interrupt).build();
    let mut driver = Driver::new(interp);
    let status = match file_path {
        Some(path) => driver.run_file(Path::new(path)),
        None => driver.run_stdin(),
    };
    std::process::exit(status);
}

fn print_usage() {
    println!("SamBasic line-numbered BASIC interpreter");
    println!();
    println!("Usage: sambasic [FILE]");
    println!();
    println!("With FILE, load the program and run it. Without, read the program");
    println!("and immediate commands from standard input.");
    println!();
    println!("Options:");
    println!("  -h, --help       Show this help message");
    println!("  -V, --version    Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG         Enable interpreter tracing on stderr (e.g. RUST_LOG=debug)");
}
