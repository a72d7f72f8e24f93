//! gilchrist CLI entry point.
//!
//! Usage:
//!   gilchrist wc [-lwcmL] [FILE...]
//!   gilchrist find [PATH...] [--name GLOB | --iname GLOB] [--type f|d]
//!                  [--mindepth N] [--maxdepth N] [--delete]
//!   gilchrist rm [-rRfiv] FILE...
//!
//! Diagnostics for the tools go to stderr. Internal tracing is off unless
//! `RUST_LOG` is set.

mod cli;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gilchrist::rm::run_rm;
use gilchrist::wc::run_wc;
use gilchrist::GilchristError;

use cli::{Cli, Command, FindArgs, RmArgs, WcArgs};

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG, silent otherwise)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    match cli.command {
        Command::Wc(args) => wc(args),
        Command::Find(args) => find(args),
        Command::Rm(args) => rm(args),
    }
}

fn wc(args: WcArgs) -> Result<u8> {
    let report = run_wc(
        &args.files,
        args.options(),
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr().lock(),
    )
    .context("gilchrist wc")?;

    Ok(report.exit_code())
}

fn find(args: FindArgs) -> Result<u8> {
    let mut builder = gilchrist::find()
        .roots(args.paths)
        .min_depth(args.mindepth)
        .delete(args.delete);

    // A non-empty --iname wins when both are given.
    if let Some(p) = args.iname.filter(|p| !p.is_empty()) {
        builder = builder.iname(p);
    } else if let Some(p) = args.name {
        builder = builder.name(p);
    }
    if let Some(kind) = args.kind {
        builder = builder.kind(kind.into());
    }
    if let Some(d) = args.maxdepth {
        builder = builder.max_depth(d);
    }

    let finder = builder.build().context("gilchrist find")?;

    let mut executor = finder.executor(io::stdout().lock(), io::stderr().lock());
    let report = finder.run_with(&mut executor);

    if let Some(e) = executor.take_write_error() {
        return Err(e).context("gilchrist find: write error");
    }

    tracing::debug!(
        emitted = report.emitted,
        deleted = report.deleted,
        errors = report.errors.len(),
        files = report.stats.files,
        dirs = report.stats.dirs,
        duration_ms = report.stats.duration.as_millis() as u64,
        "find finished"
    );

    Ok(report.exit_code())
}

fn rm(args: RmArgs) -> Result<u8> {
    let result = run_rm(
        &args.targets,
        args.options(),
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr().lock(),
    );

    match result {
        Ok(report) => Ok(report.exit_code()),
        Err(GilchristError::MissingOperand) => {
            eprintln!("gilchrist rm: missing operand");
            eprintln!("Try 'gilchrist rm --help' for more information.");
            Ok(1)
        }
        Err(e) => Err(e).context("gilchrist rm"),
    }
}
