//! UniQuery CLI entry point.

mod alias_store;
mod cli;
mod error;
mod facade;
mod output;
mod repl;

use std::process::ExitCode;

use clap::Parser;

use alias_store::AliasStore;
use cli::Args;
use error::CliError;
use repl::Repl;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("uniquery: error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = std::env::var("UNIQUERY_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), CliError> {
    let args = Args::parse();
    let store = AliasStore::open(AliasStore::default_path());

    let mut repl = Repl::new(store);
    repl.set_initial_native(args.native);
    repl.set_initial_output(args.output);

    if let Some(alias) = args.alias.as_deref() {
        repl.use_alias(alias)?;
    }

    if let Some(query) = args.execute.as_deref() {
        if args.alias.is_none() {
            return Err(CliError::NoActiveConnection);
        }
        return repl.run_once(query);
    }

    repl.run().map_err(|e| CliError::Usage(e.to_string()))
}
