//! `mly`: parse and check ocamlyacc / Menhir grammar files.

use mlyc::{init_tracing, parse_args, run, Command, UsageError};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(UsageError::Help) => {
            print_usage();
            return;
        }
        Err(UsageError::NoFiles(command)) => {
            eprintln!("error: missing file path");
            eprintln!("Usage: mly {} <file.mly>... [options]", command_name(command));
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    std::process::exit(run(&config));
}

fn command_name(command: Command) -> &'static str {
    match command {
        Command::Parse => "parse",
        Command::Check => "check",
        Command::Tokens => "tokens",
    }
}

fn print_usage() {
    println!("mly: ocamlyacc / Menhir grammar recognizer");
    println!();
    println!("Usage: mly <command> <file.mly>... [options]");
    println!();
    println!("Commands:");
    println!("  parse     Print the syntax tree of each file");
    println!("  check     Report syntax errors only");
    println!("  tokens    Print every leaf and trivia piece with its span");
    println!();
    println!("Options:");
    println!("  --format=<fmt>   Output format: sexp (default), tree, json");
    println!("  --color=<when>   Colored diagnostics: auto (default), always, never");
    println!("  --strict         Stop at the first error instead of recovering");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=mly_parse=debug) to trace the parser.");
}
