mod blend;
mod cli;
mod config;
mod error;
mod heuristic;
mod llm;
mod pipeline;
mod prompt;
mod proxy;
mod report;
mod types;
mod wizard;

use crate::error::AppError;
use crate::types::config::AppConfig;
use crate::types::input::load_input;
use crate::types::report::Disposition;
use clap::Parser;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

const LOG_ENV_VAR: &str = "LAUNCHSCORE_LOG";

fn init_tracing(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("warning: failed to initialize logging: {e}");
    }
}

fn exit_code_for(disposition: Disposition) -> i32 {
    match disposition {
        Disposition::Continue => exit_code::SUCCESS,
        Disposition::Pivot => exit_code::WARNINGS,
        Disposition::Kill => exit_code::BLOCKING,
    }
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<(), AppError> {
    match output {
        Some(path) => {
            report::write_output(path, rendered)?;
            println!("report: {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Remote pass failures surface as one user-facing message.
fn is_analysis_failure(error: &AppError) -> bool {
    matches!(
        error,
        AppError::Transport(_) | AppError::ContractViolation(_)
    )
}

fn messages_client(
    loaded: &AppConfig,
    endpoint: Option<String>,
) -> Result<llm::MessagesClient, AppError> {
    let mut settings = loaded.service();
    if let Some(endpoint) = endpoint {
        settings.endpoint = endpoint;
    }
    llm::MessagesClient::new(&settings, config::api_key())
}

fn runtime() -> Result<tokio::runtime::Runtime, AppError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(AppError::Io)
}

fn run() -> Result<i32, AppError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let cwd = std::env::current_dir()?;
    config::load_env_file(&cwd);
    let loaded = config::load_config(&cwd)?.unwrap_or_default();

    match cli.command {
        cli::Commands::Score(cmd) => {
            let input = load_input(&cmd.input)?;
            let heuristic_report = heuristic::report(&input);
            let rendered =
                report::render_heuristic(&heuristic_report, output_format(cmd.report.format))?;
            emit(&rendered, cmd.report.output.as_deref())?;
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Evaluate(cmd) => {
            let input = load_input(&cmd.input)?;
            let client = messages_client(&loaded, cmd.endpoint)?;
            let weights = loaded.weights();

            let outcome = runtime()?.block_on(pipeline::evaluate(
                &input,
                &client,
                &weights,
                |phase| info!(phase = phase.id(), "{}", phase.label()),
            ));
            match outcome {
                Ok(result) => {
                    let rendered = report::render(&result, output_format(cmd.report.format))?;
                    emit(&rendered, cmd.report.output.as_deref())?;
                    Ok(exit_code_for(result.kill_or_continue))
                }
                Err(e) if is_analysis_failure(&e) => {
                    eprintln!("{}", wizard::ANALYSIS_FAILED);
                    Ok(exit_code::RUNTIME_FAILURE)
                }
                Err(e) => Err(e),
            }
        }
        cli::Commands::Wizard(cmd) => {
            let client = messages_client(&loaded, cmd.endpoint)?;
            let weights = loaded.weights();
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();

            let outcome = runtime()?.block_on(wizard::run_interactive(
                &mut stdin.lock(),
                &mut stdout.lock(),
                &client,
                &weights,
            ));
            match outcome {
                Ok(Some(result)) => Ok(exit_code_for(result.kill_or_continue)),
                Ok(None) => Ok(exit_code::SUCCESS),
                Err(e) if is_analysis_failure(&e) => Ok(exit_code::RUNTIME_FAILURE),
                Err(e) => Err(e),
            }
        }
        cli::Commands::Serve(cmd) => {
            let mut settings = loaded.proxy();
            if let Some(bind) = cmd.bind {
                settings.bind = bind;
            }
            let api_key = config::api_key();
            if api_key.is_none() {
                warn!(
                    "{} is not set; proxied requests will be rejected",
                    config::API_KEY_VAR
                );
            }

            let proxy = proxy::Proxy::new(&settings, &loaded.service(), api_key)?;
            let server = proxy::bind(&settings.bind)?;
            println!("proxy listening on http://{}{}", settings.bind, proxy.route());
            proxy.run(server);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
