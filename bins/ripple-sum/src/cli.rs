//! Command-line argument parsing for ripple-sum

use clap::{Parser, ValueEnum};

/// Default first addend, the worked example shipped with the tool
pub const DEFAULT_LHS: &str = "084357083924567890123";
/// Default second addend
pub const DEFAULT_RHS: &str = "025785994397568899987";

/// Ripple Sum - Add fixed-width decimal numbers with a data-parallel kernel
#[derive(Parser, Debug)]
#[command(name = "ripple-sum")]
#[command(author, version, about = "Ripple Sum - Add fixed-width decimal numbers with a data-parallel kernel", long_about = None)]
pub struct Cli {
    /// First addend (unsigned decimal)
    #[arg(value_name = "LHS", default_value = DEFAULT_LHS)]
    pub lhs: String,

    /// Second addend (unsigned decimal)
    #[arg(value_name = "RHS", default_value = DEFAULT_RHS)]
    pub rhs: String,

    /// Digit radix
    #[arg(short, long, default_value = "10")]
    pub base: i64,

    /// Digit positions per vector, including the reserved leading zero
    #[arg(short, long, default_value = "21")]
    pub width: usize,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print every kernel pass, one line per digit position
    #[arg(short, long)]
    pub trace: bool,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// JSON report
    Json,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        use tracing_subscriber::{fmt, EnvFilter};

        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt().with_env_filter(filter).with_target(false).init();
    }
}
