use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use rematch::input::read_input;
use rematch::report::{ColorChoice, LineOptions, check_text, scan_lines};
use rematch::{DEFAULT_STEP_LIMIT, Matcher, Pattern};

/// Test a pattern against TEXT, or against each line of standard input.
///
/// Exits 0 on match, 1 on no match, 2 on error.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pattern to match (literals, `.`, `*`, `+`, `?`, leading `^`, trailing `$`)
    #[arg(value_name = "PATTERN")]
    pattern: String,

    /// Text to test; lines are read from stdin when omitted
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Print nothing, report through the exit status only
    #[arg(short, long)]
    quiet: bool,

    /// Print the number of matching lines instead of the lines
    #[arg(short, long)]
    count: bool,

    /// Select non-matching lines
    #[arg(short = 'v', long)]
    invert_match: bool,

    /// Prefix each output line with its line number
    #[arg(short = 'n', long)]
    line_number: bool,

    /// Highlight matches
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Step limit per start offset, on top of a per-byte allowance (0 for no limit)
    #[arg(long, value_name = "N", default_value_t = DEFAULT_STEP_LIMIT)]
    max_steps: usize,

    /// More logging on stderr (repeat for more); RUST_LOG overrides
    #[arg(long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("rematch: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<bool> {
    let pattern = Pattern::new(&args.pattern)?;
    let matcher = match args.max_steps {
        0 => Matcher::unlimited(),
        n => Matcher::new().step_limit(Some(n)),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let found = match &args.text {
        Some(text) => check_text(&matcher, &pattern, text.as_bytes(), args.quiet, &mut out)?,
        None => {
            let input = read_input(io::stdin().lock())?;
            let opts = LineOptions {
                invert: args.invert_match,
                line_number: args.line_number,
                count: args.count,
                quiet: args.quiet,
                color: args.color.enabled(),
            };
            scan_lines(&matcher, &pattern, &input, opts, &mut out)? > 0
        }
    };
    out.flush()?;
    Ok(found)
}
