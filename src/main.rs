//! NextStep - career roadmaps for engineering branches
//!
//! Without a subcommand this launches the terminal browser; subcommands give
//! scriptable access to the same content.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nextstep::cli::{
    BranchArgs, BranchesArgs, CliError, CliResult, ConfigArgs, RoadmapArgs, ThemeArgs,
};
use nextstep::constants::{APP_BINARY_NAME, LOG_ENV};
use nextstep::context::AppContext;
use nextstep::tui;

/// NextStep - career roadmaps for engineering branches
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List engineering branches
    Branches(BranchesArgs),
    /// Show the roles of a branch
    Branch(BranchArgs),
    /// Show the learning roadmap for a role
    Roadmap(RoadmapArgs),
    /// Show or switch the dark/light theme
    Theme(ThemeArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_context() -> CliResult<AppContext> {
    AppContext::from_environment().map_err(|e| {
        CliError::validation(format!(
            "{e:#}\n\nRun `{APP_BINARY_NAME} config show` to inspect the configuration."
        ))
    })
}

fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Config(args) => args.execute(),
        Command::Branches(args) => args.execute(&load_context()?.content),
        Command::Branch(args) => args.execute(&load_context()?.content),
        Command::Roadmap(args) => args.execute(&load_context()?.content),
        Command::Theme(args) => args.execute(&mut load_context()?.theme),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        let mut ctx = AppContext::from_environment()?;
        let mut terminal = tui::setup_terminal()?;
        let result = tui::run_tui(&mut ctx, &mut terminal);
        tui::restore_terminal(terminal)?;
        return result;
    };

    if let Err(e) = run_command(command) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }

    Ok(())
}
