//! metascoop CLI
//!
//! Keeps an F-Droid repository in sync with upstream APK releases.

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use metascoop_lib::{
    CatalogTool, FdroidTool, GitHarvester, Pipeline, PipelineError, RunConfig, RunOutcome,
    Settings, SkippedTool,
};
use metascoop_provider::{ApiClient, Providers, resolve_token};

mod cli_types;

use cli_types::Cli;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_failure_code(&e));
        }
    };
    init_logger(&cli);

    match run(&cli) {
        Ok(outcome) => {
            report(&outcome);
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            log::error!("{e}");
            println!("{}", "Run aborted".if_supports_color(Stdout, |t| t.red()));
            ExitCode::FAILURE
        }
    }
}

/// Exit code for a command line clap refused. `--help` and `--version`
/// succeed; real usage errors get `1` so they never read as "no change".
fn parse_failure_code(e: &clap::Error) -> u8 {
    if e.use_stderr() { 1 } else { 0 }
}

/// Log to stdout so lines interleave with the `::group::` markers.
/// `RUST_LOG` overrides the level picked by `-v`/`-q`.
fn init_logger(cli: &Cli) {
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else if cli.quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format_timestamp(cli.verbose.then_some(env_logger::TimestampPrecision::Seconds))
        .format_target(cli.verbose)
        .init();
}

fn run(cli: &Cli) -> Result<RunOutcome, PipelineError> {
    let settings = Settings::load()?;
    let env = |var: &str| std::env::var(var).ok();

    let (token, source) = resolve_token(cli.token.as_deref(), settings.github.token.as_deref());
    log::info!("GitHub token: {}", source);

    let client = ApiClient::new(token, settings.download_timeout(env))?;
    let providers = Providers::new(client);

    let mut config = RunConfig::new(cli.apps.clone(), cli.repo_dir.clone());
    if let Some(readme) = cli.readme.clone().or_else(|| settings.catalog.readme.clone()) {
        config = config.with_readme(readme);
    }

    let fdroid;
    let tool: &dyn CatalogTool = if cli.debug {
        log::warn!("Debug mode: the catalog tool will not be run");
        &SkippedTool
    } else {
        fdroid = FdroidTool::new(settings.catalog_tool(env), &config.repo_dir);
        &fdroid
    };

    Pipeline {
        config: &config,
        providers: &providers,
        tool,
        harvester: &GitHarvester,
    }
    .run()
}

fn report(outcome: &RunOutcome) {
    match outcome.exit_code() {
        0 => println!(
            "{}",
            "Catalog changed".if_supports_color(Stdout, |t| t.green())
        ),
        2 => println!(
            "{}",
            "No significant changes".if_supports_color(Stdout, |t| t.dimmed())
        ),
        _ => println!(
            "{}",
            "Finished with errors".if_supports_color(Stdout, |t| t.red())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_code(args: &[&str]) -> u8 {
        match Cli::try_parse_from(args) {
            Ok(_) => panic!("expected {args:?} to be refused"),
            Err(e) => parse_failure_code(&e),
        }
    }

    #[test]
    fn usage_errors_exit_one() {
        assert_eq!(parse_code(&["metascoop", "--no-such-flag"]), 1);
        assert_eq!(parse_code(&["metascoop", "--repo-dir"]), 1);
        assert_eq!(parse_code(&["metascoop", "-q", "-v"]), 1);
    }

    #[test]
    fn help_and_version_exit_zero() {
        assert_eq!(parse_code(&["metascoop", "--help"]), 0);
        assert_eq!(parse_code(&["metascoop", "--version"]), 0);
    }
}
