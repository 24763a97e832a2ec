//! Command-line argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect enabled worlds and Multiverse-aware world names for a server snapshot.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    ///
    /// If the file doesn't exist, a default configuration will be created.
    #[arg(short, long, default_value = "worldctl.toml")]
    pub config: PathBuf,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Output logs in JSON format
    #[arg(long)]
    pub json_logs: bool,

    /// Print results as JSON instead of plain text
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List loaded worlds with their enabled state, display name and spawn
    List,
    /// Report whether a world is enabled
    Check { world: String },
    /// Resolve the display name of a world
    Name { world: String },
    /// Resolve the spawn location of a world
    Spawn { world: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["worldctl"]).unwrap();
        assert_eq!(args.config, PathBuf::from("worldctl.toml"));
        assert!(args.log_level.is_none());
        assert!(!args.json_logs);
        assert!(!args.json);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_subcommands() {
        let args = Args::try_parse_from(["worldctl", "-c", "server.toml", "--json", "check", "nether"])
            .unwrap();
        assert_eq!(args.config, PathBuf::from("server.toml"));
        assert!(args.json);
        assert_eq!(
            args.command,
            Some(Command::Check {
                world: "nether".to_string()
            })
        );

        let args = Args::try_parse_from(["worldctl", "-l", "debug", "spawn", "world"]).unwrap();
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(
            args.command,
            Some(Command::Spawn {
                world: "world".to_string()
            })
        );
    }

    #[test]
    fn test_missing_world_argument() {
        assert!(Args::try_parse_from(["worldctl", "name"]).is_err());
    }
}
