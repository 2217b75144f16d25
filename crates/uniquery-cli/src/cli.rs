//! Non-interactive entry-point argument parsing. These flags seed the
//! façade's initial state before handing off to the REPL (or, with
//! `--execute`, running one query and exiting).

use clap::{Parser, ValueEnum};

/// UniQuery - SQL to native query translation shell
#[derive(Parser, Debug)]
#[command(name = "uniquery")]
#[command(about = "Translate SQL into MongoDB or Cypher and run it against a connection alias", long_about = None)]
#[command(version)]
pub struct Args {
    /// Connection alias to use for this session
    #[arg(long, value_name = "NAME")]
    pub alias: Option<String>,

    /// Bypass translation: send input straight to the driver (JSON for
    /// MongoDB, raw text for Cypher/SQL)
    #[arg(long)]
    pub native: bool,

    /// Result formatting mode
    #[arg(long, default_value = "table", value_enum)]
    pub output: OutputMode,

    /// Run a single query non-interactively instead of starting the REPL
    #[arg(short = 'e', long = "execute", value_name = "QUERY")]
    pub execute: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    Table,
    Json,
    Raw,
}
