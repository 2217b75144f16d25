//! The interactive shell: `alias` management, the `set_native`/`set_output`
//! mode toggles, and bare query execution, exactly as enumerated in §6's
//! "CLI surface".

use std::io::{self, BufRead, Write};

use uniquery_drivers::{ConnectionProfile, Driver, MockDriver, ProfileType};

use crate::alias_store::AliasStore;
use crate::cli::OutputMode;
use crate::error::CliError;
use crate::facade::{Dialect, Facade};
use crate::output::format_rows;

const BANNER: &str = "UniQuery — SQL to native query translation shell. Type `help` for commands.";

const HELP: &str = "\
Commands:
  alias list
  alias add <name> --type mysql|mongodb|neo4j [--host H] [--port P] [--uri U] --username U --password P [--database D]
  alias edit <name> [same flags as add]
  alias delete <name>
  alias use <name>
  set_native true|false
  set_output table|json|raw
  <query>            run a query against the active connection
  info | help
  exit | quit";

pub struct Repl {
    store: AliasStore,
    active_alias: Option<String>,
    facade: Option<Facade>,
    output: OutputMode,
    native: bool,
}

impl Repl {
    pub fn new(store: AliasStore) -> Self {
        Self { store, active_alias: None, facade: None, output: OutputMode::Table, native: false }
    }

    pub fn set_initial_output(&mut self, output: OutputMode) {
        self.output = output;
    }

    pub fn set_initial_native(&mut self, native: bool) {
        self.native = native;
    }

    pub fn use_alias(&mut self, name: &str) -> Result<(), CliError> {
        let profile = self.store.get(name).cloned().ok_or_else(|| CliError::UnknownAlias(name.to_string()))?;
        self.connect(name.to_string(), profile)?;
        Ok(())
    }

    /// Runs a single query non-interactively and prints its result,
    /// bypassing the prompt loop entirely (the CLI's `-e`/`--execute` flag).
    pub fn run_once(&mut self, query: &str) -> Result<(), CliError> {
        self.run_query(query)
    }

    /// Runs the interactive loop until `exit`/`quit`/EOF.
    pub fn run(&mut self) -> io::Result<()> {
        println!("{BANNER}");
        let stdin = io::stdin();
        loop {
            print!("{}> ", self.active_alias.as_deref().unwrap_or("uniquery"));
            io::stdout().flush()?;

            let mut line = String::new();
            let bytes_read = stdin.lock().read_line(&mut line)?;
            if bytes_read == 0 {
                println!();
                break;
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if matches!(line, "exit" | "quit") {
                break;
            }
            self.dispatch(line);
        }

        if let Some(facade) = self.facade.as_mut() {
            let _ = facade.close();
        }
        Ok(())
    }

    fn dispatch(&mut self, line: &str) {
        let result = if let Some(rest) = line.strip_prefix("alias ") {
            self.alias_command(rest.trim())
        } else if let Some(rest) = line.strip_prefix("set_native") {
            self.set_native_command(rest.trim())
        } else if let Some(rest) = line.strip_prefix("set_output") {
            self.set_output_command(rest.trim())
        } else if matches!(line, "info" | "help") {
            println!("{HELP}");
            Ok(())
        } else {
            self.run_query(line)
        };

        if let Err(err) = result {
            eprintln!("error: {err}");
        }
    }

    fn alias_command(&mut self, rest: &str) -> Result<(), CliError> {
        let mut parts = rest.split_whitespace();
        let subcommand = parts.next().ok_or_else(|| CliError::Usage("usage: alias <list|add|edit|delete|use> ...".to_string()))?;
        let remainder: Vec<&str> = parts.collect();

        match subcommand {
            "list" => {
                for (name, profile) in self.store.list() {
                    println!("{name}: {profile:?}");
                }
                Ok(())
            }
            "add" | "edit" => {
                let name = remainder.first().ok_or_else(|| CliError::Usage("usage: alias add <name> --type ... ".to_string()))?;
                let profile = parse_profile_flags(&remainder[1..])?;
                profile.validate()?;
                self.store.put(name.to_string(), profile).map_err(|e| CliError::Usage(e.to_string()))?;
                println!("saved alias `{name}`");
                Ok(())
            }
            "delete" => {
                let name = remainder.first().ok_or_else(|| CliError::Usage("usage: alias delete <name>".to_string()))?;
                if self.store.remove(name).map_err(|e| CliError::Usage(e.to_string()))? {
                    println!("deleted alias `{name}`");
                } else {
                    println!("no such alias `{name}`");
                }
                Ok(())
            }
            "use" => {
                let name = remainder.first().ok_or_else(|| CliError::Usage("usage: alias use <name>".to_string()))?;
                self.use_alias(name)?;
                println!("connected via `{name}`");
                Ok(())
            }
            other => Err(CliError::Usage(format!("unknown alias subcommand `{other}`"))),
        }
    }

    fn set_native_command(&mut self, rest: &str) -> Result<(), CliError> {
        let native = parse_bool(rest)?;
        self.native = native;
        if let Some(facade) = self.facade.as_mut() {
            facade.set_native(native);
        }
        Ok(())
    }

    fn set_output_command(&mut self, rest: &str) -> Result<(), CliError> {
        let output = match rest {
            "table" => OutputMode::Table,
            "json" => OutputMode::Json,
            "raw" => OutputMode::Raw,
            other => return Err(CliError::Usage(format!("unknown output mode `{other}` (expected table|json|raw)"))),
        };
        self.output = output;
        if let Some(facade) = self.facade.as_mut() {
            facade.set_output(output);
        }
        Ok(())
    }

    fn run_query(&mut self, query: &str) -> Result<(), CliError> {
        let facade = self.facade.as_mut().ok_or(CliError::NoActiveConnection)?;
        let rows = facade.run(query)?;
        println!("{}", format_rows(&rows, facade.output()));
        Ok(())
    }

    fn connect(&mut self, alias: String, profile: ConnectionProfile) -> Result<(), CliError> {
        profile.validate()?;
        let dialect: Dialect = profile.profile_type.into();
        let driver: Box<dyn Driver> = Box::new(MockDriver::open(&profile)?);
        let mut facade = Facade::new(dialect, driver);
        facade.set_native(self.native);
        facade.set_output(self.output);
        self.facade = Some(facade);
        self.active_alias = Some(alias);
        Ok(())
    }
}

fn parse_bool(text: &str) -> Result<bool, CliError> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(CliError::Usage(format!("expected true|false, got `{other}`"))),
    }
}

fn parse_profile_flags(flags: &[&str]) -> Result<ConnectionProfile, CliError> {
    let mut profile_type = None;
    let mut host = None;
    let mut port = None;
    let mut uri = None;
    let mut username = None;
    let mut password = None;
    let mut database = None;

    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| CliError::Usage(format!("missing value for `{flag}`")))?;
        match *flag {
            "--type" => {
                profile_type = Some(match *value {
                    "mysql" => ProfileType::Mysql,
                    "mongodb" => ProfileType::Mongodb,
                    "neo4j" => ProfileType::Neo4j,
                    other => return Err(CliError::Usage(format!("unknown connection type `{other}`"))),
                });
            }
            "--host" => host = Some(value.to_string()),
            "--port" => {
                port = Some(value.parse::<u16>().map_err(|_| CliError::Usage(format!("invalid port `{value}`")))?);
            }
            "--uri" => uri = Some(value.to_string()),
            "--username" => username = Some(value.to_string()),
            "--password" => password = Some(value.to_string()),
            "--database" => database = Some(value.to_string()),
            other => return Err(CliError::Usage(format!("unknown flag `{other}`"))),
        }
    }

    Ok(ConnectionProfile {
        profile_type: profile_type.ok_or_else(|| CliError::Usage("--type is required".to_string()))?,
        host,
        port,
        uri,
        username: username.ok_or_else(|| CliError::Usage("--username is required".to_string()))?,
        password: password.ok_or_else(|| CliError::Usage("--password is required".to_string()))?,
        database,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_profile_flags_builds_a_full_profile() {
        let flags = ["--type", "mongodb", "--host", "localhost", "--port", "27017", "--username", "admin", "--password", "secret"];
        let profile = parse_profile_flags(&flags).unwrap();
        assert_eq!(profile.profile_type, ProfileType::Mongodb);
        assert_eq!(profile.host.as_deref(), Some("localhost"));
        assert_eq!(profile.port, Some(27017));
    }

    #[test]
    fn parse_profile_flags_rejects_an_unknown_flag() {
        let flags = ["--bogus", "1"];
        assert!(parse_profile_flags(&flags).is_err());
    }

    #[test]
    fn parse_bool_accepts_only_true_or_false() {
        assert_eq!(parse_bool("true").unwrap(), true);
        assert_eq!(parse_bool("false").unwrap(), false);
        assert!(parse_bool("yes").is_err());
    }
}
