//! CLI command definitions

use akanamen_domain::Attribute;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for akanamen
#[derive(Parser, Debug)]
#[command(name = "akanamen")]
#[command(author, version, about = "Learn the names and faces of your club members")]
#[command(long_about = r#"
AkaNamen keeps a directory of club members and quizzes you about them:
who plays which instrument, whose photo is this, when did they join.

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./akanamen.toml       Project-level config
3. ~/.config/akanamen/config.toml   Global config

Example:
  akanamen --roster members.toml pairs
  akanamen --roster members.toml play --player 123456 --questions 5
  akanamen play --player 123456 --free-text --hint last_name --ask instruments
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Roster file with the member records (overrides [roster] path)
    #[arg(long, global = true, value_name = "PATH")]
    pub roster: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the (hint, question) pairs that can currently be asked
    Pairs {
        /// Check free-text questions instead of multiple choice
        #[arg(long)]
        free_text: bool,
    },
    /// Play a quiz game in the terminal
    Play(PlayArgs),
    /// List the registered members
    Members,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Member id of the player
    #[arg(long, value_name = "ID")]
    pub player: i64,

    /// Number of questions (overrides [game] questions)
    #[arg(short = 'n', long, value_name = "N")]
    pub questions: Option<usize>,

    /// Ask for free-text answers instead of four options
    #[arg(long)]
    pub free_text: bool,

    /// Attribute that may be given as hint (can be specified multiple times)
    #[arg(long = "hint", value_name = "ATTRIBUTE")]
    pub hints: Vec<Attribute>,

    /// Attribute that may be asked for (can be specified multiple times)
    #[arg(long = "ask", value_name = "ATTRIBUTE")]
    pub ask: Vec<Attribute>,

    /// Seed for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_play() {
        let cli = Cli::try_parse_from([
            "akanamen",
            "--roster",
            "club.toml",
            "play",
            "--player",
            "42",
            "-n",
            "3",
            "--hint",
            "last_name",
            "--hint",
            "Foto",
            "--ask",
            "instruments",
            "--seed",
            "7",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.roster, Some(PathBuf::from("club.toml")));
        assert_eq!(cli.verbose, 2);
        let Some(Command::Play(args)) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(args.player, 42);
        assert_eq!(args.questions, Some(3));
        assert!(!args.free_text);
        assert_eq!(args.hints, vec![Attribute::LastName, Attribute::PhotoFileId]);
        assert_eq!(args.ask, vec![Attribute::Instruments]);
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn test_parse_pairs_and_members() {
        let cli = Cli::try_parse_from(["akanamen", "pairs", "--free-text"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Pairs { free_text: true })));

        let cli = Cli::try_parse_from(["akanamen", "--no-config", "members"]).unwrap();
        assert!(cli.no_config);
        assert!(matches!(cli.command, Some(Command::Members)));
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let result =
            Cli::try_parse_from(["akanamen", "play", "--player", "1", "--ask", "shoe_size"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_show_config_needs_no_command() {
        let cli = Cli::try_parse_from(["akanamen", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
