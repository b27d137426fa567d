use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "launchscore",
    version,
    about = "Hybrid heuristic and AI evaluation of startup ideas"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Heuristic pre-score only; no network access
    Score(ScoreCommand),
    /// Research, two AI passes and the blended score
    Evaluate(EvaluateCommand),
    /// Fill in the idea step by step and evaluate it
    Wizard(WizardCommand),
    /// Run the credential-injecting proxy
    Serve(ServeCommand),
}

#[derive(Args)]
pub struct ReportArgs {
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Founder input file (.toml, otherwise JSON)
    pub input: PathBuf,
    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Args)]
pub struct EvaluateCommand {
    /// Founder input file (.toml, otherwise JSON)
    pub input: PathBuf,
    #[command(flatten)]
    pub report: ReportArgs,
    /// Messages endpoint, e.g. a running `launchscore serve`
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[derive(Args)]
pub struct WizardCommand {
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[derive(Args)]
pub struct ServeCommand {
    /// Listen address, overrides `[proxy] bind`
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_evaluate_with_overrides() {
        let cli = Cli::try_parse_from([
            "launchscore",
            "-vv",
            "evaluate",
            "idea.json",
            "--format",
            "json",
            "--output",
            "out/report.json",
            "--endpoint",
            "http://127.0.0.1:8787/api/claude",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.verbose, 2);
        let Commands::Evaluate(cmd) = cli.command else {
            panic!("expected evaluate command");
        };
        assert_eq!(cmd.input, PathBuf::from("idea.json"));
        assert!(matches!(cmd.report.format, ReportFormat::Json));
        assert_eq!(cmd.report.output, Some(PathBuf::from("out/report.json")));
        assert_eq!(
            cmd.endpoint.as_deref(),
            Some("http://127.0.0.1:8787/api/claude")
        );
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let parsed = Cli::try_parse_from(["launchscore", "-q", "-v", "score", "idea.toml"]);
        assert!(parsed.is_err());
    }
}
