use crate::demo::{run_batch, run_demo, run_score, BatchArgs, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use home_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Housing Intake Triage",
    about = "Score housing-vulnerability intakes and serve the triage API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single answer record stored as JSON
    Score(ScoreArgs),
    /// Score every row of a paper-intake CSV export
    Batch(BatchArgs),
    /// Run sample intakes through the full caseworker workflow
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["home-intake-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_accepts_reference_date() {
        let cli = Cli::try_parse_from([
            "home-intake-api",
            "score",
            "--answers",
            "intake.json",
            "--today",
            "2025-10-19",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.answers.to_string_lossy(), "intake.json");
                assert_eq!(args.today, chrono::NaiveDate::from_ymd_opt(2025, 10, 19));
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let result = Cli::try_parse_from(["home-intake-api", "demo", "--today", "19/10/2025"]);
        assert!(result.is_err());
    }
}
