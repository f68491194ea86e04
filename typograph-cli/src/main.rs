//! `typograph` command-line entry point

use clap::Parser;
use typograph_cli::commands::Commands;

/// Typography formatter for Russian text and HTML: quotes, dashes,
/// non-breaking spaces and HTML entities
#[derive(Debug, Parser)]
#[command(name = "typograph", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    Cli::parse().command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_format_command() {
        let cli = Cli::try_parse_from([
            "typograph", "format", "-i", "a.html", "-e", "numeric", "-P", "minimal", "-vv",
        ])
        .unwrap();
        match cli.command {
            Commands::Format(args) => {
                assert_eq!(args.input, vec!["a.html"]);
                assert_eq!(args.preset.as_deref(), Some("minimal"));
                assert_eq!(args.verbose, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
