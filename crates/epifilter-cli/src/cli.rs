use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "EpiFilter - removes predicted epitopes that fall inside N-terminal, C-terminal or LPXTG anchor domains.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter the DiscoTope predictions of every configured protein.
    Run(RunArgs),
    /// Print the domain boundaries derived from one InterProScan TSV file.
    Boundaries(BoundariesArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding one `<protein>_Discotope_output` folder per protein.
    #[arg(long, value_name = "PATH")]
    pub discotope_dir: Option<PathBuf>,

    /// Directory holding the `filtered.<protein>_all_seqs.aa.tsv` annotation files.
    #[arg(long, value_name = "PATH")]
    pub annotation_dir: Option<PathBuf>,

    /// Directory the filtered CSV files are written to (created if absent).
    #[arg(short, long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Process only these proteins. Can be used multiple times.
    #[arg(short, long = "protein", value_name = "NAME")]
    pub proteins: Vec<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S thresholds.min-confidence=50
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `boundaries` subcommand.
#[derive(Args, Debug)]
pub struct BoundariesArgs {
    /// InterProScan TSV file to summarize.
    #[arg(required = true, value_name = "TSV")]
    pub input: PathBuf,

    /// Path to a configuration file providing the domain accession sets.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_repeated_proteins_and_set_values() {
        let cli = Cli::try_parse_from([
            "epifilter",
            "-vv",
            "run",
            "-p",
            "pspA",
            "--protein",
            "zmpB",
            "-S",
            "thresholds.min-confidence=50",
            "--output-dir",
            "out",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Run(args) = cli.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(args.proteins, ["pspA", "zmpB"]);
        assert_eq!(args.set_values, ["thresholds.min-confidence=50"]);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert!(args.config.is_none());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["epifilter", "-q", "-v", "run"]);
        assert!(result.is_err());
    }

    #[test]
    fn boundaries_requires_input() {
        assert!(Cli::try_parse_from(["epifilter", "boundaries"]).is_err());
        let cli = Cli::try_parse_from(["epifilter", "boundaries", "a.tsv"]).unwrap();
        assert!(matches!(cli.command, Commands::Boundaries(_)));
    }

    #[test]
    fn boundaries_set_value_does_not_consume_input() {
        let cli = Cli::try_parse_from([
            "epifilter",
            "boundaries",
            "-S",
            "domains.anchor=PF1",
            "-S",
            "domains.n-terminal=PF2,PF3",
            "a.tsv",
        ])
        .unwrap();
        let Commands::Boundaries(args) = cli.command else {
            panic!("expected boundaries subcommand");
        };
        assert_eq!(args.input, PathBuf::from("a.tsv"));
        assert_eq!(
            args.set_values,
            ["domains.anchor=PF1", "domains.n-terminal=PF2,PF3"]
        );
    }
}
