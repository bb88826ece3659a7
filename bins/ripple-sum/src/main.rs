//! Ripple Sum - CLI for fixed-width decimal addition via the digit-add kernel

mod cli;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use ripple_backends::{Backend, CpuBackend};
use ripple_core::{CarryPropagator, DigitVector, NullObserver};
use std::process;
use tracing::info;

use cli::Cli;
use output::{OutputFormatter, TracePrinter};

fn main() {
    let cli = Cli::parse();

    cli.init_logging();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let colorize = !cli.quiet && atty::is(atty::Stream::Stdout);
    let formatter = OutputFormatter::new(cli.format, colorize);

    let lhs = DigitVector::from_decimal_str(&cli.lhs, cli.width)
        .with_context(|| format!("Invalid first addend: {}", cli.lhs))?;
    let rhs = DigitVector::from_decimal_str(&cli.rhs, cli.width)
        .with_context(|| format!("Invalid second addend: {}", cli.rhs))?;

    let mut backend = CpuBackend::new();
    info!(backend = backend.name(), width = cli.width, base = cli.base, "starting summation");

    let mut driver = CarryPropagator::new(&mut backend, cli.base, cli.width)?;

    let report = if cli.trace && !cli.quiet {
        let mut printer = TracePrinter::new(colorize);
        driver.run(&lhs, &rhs, &mut printer)?
    } else {
        driver.run(&lhs, &rhs, &mut NullObserver)?
    };

    if !cli.quiet {
        formatter.write_report(&cli.lhs, &cli.rhs, cli.base, &report)?;
    }

    Ok(())
}
