//! mutant: command-line entry point for the detector and record store.
//!
//! Commands:
//!   mutant migrate              create the store and bring its schema up to date
//!   mutant check <ROW>...       classify and record a grid
//!   mutant stats                print mutant/human counts and their ratio
//!   mutant lookup <FINGERPRINT> print the stored record for a fingerprint
//!
//! Configuration comes from `mutant.toml` in the working directory and the
//! `MUTANT_*` environment variables.

use std::env;
use std::process::ExitCode;

use serde::Serialize;

use mutant_core::errors::{MutantError, MutantErrorCode};
use mutant_core::{MutantConfig, MutantService, Verdict};

const EXIT_OK: u8 = 0;
const EXIT_STORE_ERROR: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_HUMAN: u8 = 3;

fn print_usage() {
    eprintln!(
        r#"Usage: mutant <command> [args]

Commands:
  migrate                  Initialise the configured store and exit
  check    <ROW>...        Classify a square grid of A/T/C/G rows and record it
  stats                    Print the stored classification counts as JSON
  lookup   <FINGERPRINT>   Print the record stored under a 64-char hex fingerprint

Exit status for check: 0 mutant, 3 human, 2 invalid grid, 1 store failure.

Environment:
  MUTANT_STORE_BACKEND     sqlite | memory
  MUTANT_DB_PATH           SQLite file (legacy: SQLITE_FILE)
  MUTANT_LOG_LEVEL         default log level
  MUTANT_LOG               per-target filter, e.g. mutant_storage=debug"#
    );
}

fn main() -> ExitCode {
    ExitCode::from(run(env::args().collect()))
}

fn run(args: Vec<String>) -> u8 {
    if args.len() < 2 {
        print_usage();
        return EXIT_INVALID_INPUT;
    }

    let command = args[1].as_str();
    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return EXIT_OK;
    }

    let config = match env::current_dir()
        .map_err(|e| e.to_string())
        .and_then(|cwd| MutantConfig::load(&cwd).map_err(|e| e.tagged_string()))
    {
        Ok(config) => config,
        Err(message) => {
            eprintln!("mutant: {message}");
            return EXIT_STORE_ERROR;
        }
    };
    mutant_core::tracing::init_tracing(&config.observability.log_level);

    let rest = &args[2..];
    tracing::debug!(command, args = rest.len(), backend = %config.storage.backend, "running command");
    match command {
        "migrate" => cmd_migrate(&config),
        "check" => with_service(&config, |svc| cmd_check(svc, rest)),
        "stats" => with_service(&config, cmd_stats),
        "lookup" => with_service(&config, |svc| cmd_lookup(svc, rest)),
        other => {
            eprintln!("mutant: unknown command {other:?}");
            print_usage();
            EXIT_INVALID_INPUT
        }
    }
}

fn open(config: &MutantConfig) -> Result<MutantService, u8> {
    mutant_storage::open_store(&config.storage)
        .map(MutantService::new)
        .map_err(|e| {
            eprintln!("mutant: {}", e.tagged_string());
            EXIT_STORE_ERROR
        })
}

fn shutdown(svc: &MutantService) -> Result<(), u8> {
    svc.store().shutdown().map_err(|e| {
        eprintln!("mutant: {}", e.tagged_string());
        EXIT_STORE_ERROR
    })
}

/// Open the store, run `f`, and shut the store down whatever `f` returned.
fn with_service<F>(config: &MutantConfig, f: F) -> u8
where
    F: FnOnce(&MutantService) -> u8,
{
    let svc = match open(config) {
        Ok(svc) => svc,
        Err(code) => return code,
    };
    let code = f(&svc);
    if let Err(store_code) = shutdown(&svc) {
        if code == EXIT_OK {
            return store_code;
        }
    }
    code
}

fn error_status(err: &MutantError) -> u8 {
    match err {
        MutantError::Validation(_) => EXIT_INVALID_INPUT,
        MutantError::Store(_) | MutantError::Config(_) => EXIT_STORE_ERROR,
    }
}

fn verdict_status(verdict: Verdict) -> u8 {
    match verdict {
        Verdict::Mutant => EXIT_OK,
        Verdict::Human => EXIT_HUMAN,
    }
}

fn report_error(err: &MutantError) -> u8 {
    eprintln!("mutant: {}", err.tagged_string());
    error_status(err)
}

fn print_json<T: Serialize>(value: &T) -> u8 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            EXIT_OK
        }
        Err(e) => {
            eprintln!("mutant: cannot encode output: {e}");
            EXIT_STORE_ERROR
        }
    }
}

fn cmd_migrate(config: &MutantConfig) -> u8 {
    let svc = match open(config) {
        Ok(svc) => svc,
        Err(code) => return code,
    };
    println!(
        "{} store ready at {}",
        config.storage.backend, config.storage.db_path
    );
    shutdown(&svc).map_or_else(|code| code, |()| EXIT_OK)
}

fn cmd_check(svc: &MutantService, rows: &[String]) -> u8 {
    match svc.submit(rows) {
        Ok(submission) => match print_json(&submission) {
            EXIT_OK => verdict_status(submission.verdict),
            code => code,
        },
        Err(e) => report_error(&e),
    }
}

fn cmd_stats(svc: &MutantService) -> u8 {
    match svc.stats() {
        Ok(report) => print_json(&report),
        Err(e) => report_error(&e),
    }
}

fn cmd_lookup(svc: &MutantService, args: &[String]) -> u8 {
    let [fingerprint] = args else {
        eprintln!("Usage: mutant lookup <FINGERPRINT>");
        return EXIT_INVALID_INPUT;
    };
    match svc.lookup(fingerprint) {
        Ok(record) => print_json(&record),
        Err(e) => report_error(&e),
    }
}
