//! idprobe operator binary
//!
//! One-shot diagnostic: probe every collection (current and legacy) for an
//! email address and print a per-collection report. Exit status is zero
//! when every probe completed, regardless of found/not-found outcomes, and
//! non-zero when any probe failed.

use std::io::Write;
use std::sync::Arc;

use idprobe::{default_descriptors, GrpcDocumentStore, IdentityResolver, ProbeError, StoreError};

/// Invocation configuration
struct Config {
    /// Identity key to look up
    email: String,
    /// Document-store query service endpoint
    endpoint: String,
}

fn parse_args() -> Config {
    let args: Vec<String> = std::env::args().collect();
    let mut email: Option<String> = None;
    let mut endpoint = String::from("http://127.0.0.1:50051");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--endpoint" | "-e" => {
                if i + 1 < args.len() {
                    endpoint = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("error: --endpoint requires a value");
                    std::process::exit(2);
                }
            }
            "--help" | "-h" => {
                println!("idprobe - identity lookup across current and legacy collections");
                println!();
                println!("USAGE:");
                println!("    idprobe [OPTIONS] <EMAIL>");
                println!();
                println!("ARGS:");
                println!("    <EMAIL>    Email address to probe for (matched exactly, case-sensitive)");
                println!();
                println!("OPTIONS:");
                println!("    -e, --endpoint <URL>    Document-store query service [default: http://127.0.0.1:50051]");
                println!("    -h, --help              Print help information");
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("error: unknown argument: {arg}");
                std::process::exit(2);
            }
            arg => {
                if email.is_some() {
                    eprintln!("error: exactly one email address is expected");
                    std::process::exit(2);
                }
                email = Some(arg.to_string());
                i += 1;
            }
        }
    }

    let Some(email) = email else {
        eprintln!("error: missing email address (see --help)");
        std::process::exit(2);
    };

    Config { email, endpoint }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = GrpcDocumentStore::connect(&config.endpoint)?;

    let resolver = IdentityResolver::new(Arc::new(store));
    let results = resolver.resolve(&config.email, &default_descriptors())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    idprobe::render_report(&mut out, &config.email, &results)?;
    out.flush()?;

    Ok(())
}

fn connectivity_hint(error: &(dyn std::error::Error + 'static)) -> bool {
    if let Some(e) = error.downcast_ref::<ProbeError>() {
        return e.is_connection();
    }
    if let Some(e) = error.downcast_ref::<StoreError>() {
        return e.is_connection();
    }
    false
}

fn main() {
    let config = parse_args();

    println!("idprobe v{}", env!("CARGO_PKG_VERSION"));
    println!("Store endpoint: {}", config.endpoint);
    println!();

    if let Err(e) = run(&config) {
        eprintln!("error: {e}");
        if connectivity_hint(e.as_ref()) {
            eprintln!("hint: the store was unreachable; check the endpoint and credentials");
        }
        std::process::exit(1);
    }
}
