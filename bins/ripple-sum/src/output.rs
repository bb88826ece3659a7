//! Output formatting for summation results

use anyhow::{Context, Result};
use colored::Colorize;
use ripple_core::{PassObserver, PassSnapshot, SumReport};
use serde::Serialize;

use crate::cli::OutputFormat;

/// JSON-serializable view of a finished run
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub lhs: &'a str,
    pub rhs: &'a str,
    pub sum: String,
    pub digits: &'a [i64],
    pub passes: usize,
    pub base: i64,
    pub width: usize,
}

/// Output formatter for summation results
pub struct OutputFormatter {
    /// Output format
    format: OutputFormat,

    /// Colorize output
    colorize: bool,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(format: OutputFormat, colorize: bool) -> Self {
        Self { format, colorize }
    }

    /// Write the final report to stdout
    pub fn write_report(&self, lhs: &str, rhs: &str, base: i64, report: &SumReport) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                self.print_success(lhs, rhs, report);
                Ok(())
            }
            OutputFormat::Json => {
                let json = JsonReport {
                    lhs,
                    rhs,
                    sum: report.digits.to_decimal_string(),
                    digits: report.digits.as_slice(),
                    passes: report.passes,
                    base,
                    width: report.digits.len(),
                };
                let content =
                    serde_json::to_string_pretty(&json).context("Failed to serialize to JSON")?;
                println!("{}", content);
                Ok(())
            }
        }
    }

    /// Print success message
    fn print_success(&self, lhs: &str, rhs: &str, report: &SumReport) {
        if self.colorize {
            print!("{} ", "✓".green().bold());
        } else {
            print!("✓ ");
        }

        println!(
            "{} + {} = {} ({} passes)",
            lhs,
            rhs,
            report.digits.to_decimal_string(),
            report.passes
        );
    }

    /// Print error message
    #[allow(dead_code)]
    pub fn print_error(&self, message: &str) {
        if self.colorize {
            eprintln!("{} {}", "✗".red().bold(), message);
        } else {
            eprintln!("✗ {}", message);
        }
    }
}

/// Observer that prints each kernel pass, one line per digit position
pub struct TracePrinter {
    colorize: bool,
}

impl TracePrinter {
    pub fn new(colorize: bool) -> Self {
        Self { colorize }
    }
}

impl PassObserver for TracePrinter {
    fn on_pass(&mut self, pass: usize, snapshot: &PassSnapshot<'_>) {
        let header = format!("pass {}", pass);
        if self.colorize {
            println!("{}", header.bold().cyan());
        } else {
            println!("{}", header);
        }

        for n in 0..snapshot.value.len() {
            println!(
                "  [{} + {} = {} , {}]",
                snapshot.lhs[n], snapshot.rhs[n], snapshot.value[n], snapshot.carry[n]
            );
        }
    }
}
