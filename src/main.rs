use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use std::env;
use std::io::{self, BufWriter, Write};
use std::process;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use treewalk::cli::Cli;
use treewalk::config::{Config, parser::validate_config};
use treewalk::output::{self, EXIT_ERROR, EXIT_FOUND, Reporter};
use treewalk::search::FoundEntry;
use treewalk::utils::thread_pool;
use treewalk::walk::Walker;

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            process::exit(EXIT_ERROR);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Some(shell) = cli.completion {
        print_completions(shell, &mut Cli::command());
        return Ok(EXIT_FOUND);
    }

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let mut config = Config::load(&config_path)?;
    cli.apply_to(&mut config);
    validate_config(&config)?;
    debug!(config = %config_path.display(), ?config, "Loaded configuration");

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(EXIT_FOUND);
    }

    let walker = Walker::new(config.walk.clone())?;
    let working_dir = env::current_dir().context("Failed to determine current directory")?;

    let stdout = io::stdout().lock();
    let mut reporter = Reporter::new(BufWriter::new(stdout), cli.null, cli.quiet);

    let written = if config.performance.parallel {
        if let Err(e) = thread_pool::configure_from_config(&config) {
            output::warning(&format!("Warning: Failed to configure thread pool: {e}"));
        }
        report_all(&mut reporter, walker.collect_parallel(&cli.paths, &working_dir))
    } else {
        report_all(&mut reporter, walker.files_to_search(&cli.paths, &working_dir))
    };

    match written.and_then(|()| reporter.finish()) {
        Ok(code) => Ok(code),
        // Reader went away (e.g. `treewalk | head`)
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(EXIT_FOUND),
        Err(e) => Err(e).context("Failed to write output"),
    }
}

fn report_all<W: Write>(
    reporter: &mut Reporter<W>,
    entries: impl IntoIterator<Item = FoundEntry>,
) -> io::Result<()> {
    for entry in entries {
        if reporter.report(&entry)?.is_break() {
            break;
        }
    }
    Ok(())
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("treewalk=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Only fails if a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
