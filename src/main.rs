//! pairview - Pairwise Alignment Viewer
//!
//! Compares two pre-aligned amino acid sequences in the terminal.
//!
//! ## Usage
//!
//! ```bash
//! pairview                              # empty form
//! pairview -1 MKV-LA -2 MRV-LS          # pre-filled form
//! pairview -i pair.fasta                # first two FASTA records
//! pairview -i pair.fasta --print        # print and exit
//! ```
//!
//! ## Keys
//!
//! - `Enter`: compare, `Tab`: switch field, `Esc`: go to the alignment
//! - `h/l`: move, `v`: select, `y`: copy selection, `Y`: copy row
//! - `q` or `Ctrl+C`: quit

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use pairview::controller::run_app;
use pairview::export::{write_comparison, PrintOptions, DEFAULT_WIDTH};
use pairview::fasta::read_pair;
use pairview::model::AppState;
use pairview::session_log::SessionLog;
use pairview::ui::glyphs;
use pairview::validate::validate_pair;

/// pairview - Compare two aligned amino acid sequences
///
/// Without --print, opens an interactive viewer with the sequences pre-filled.
/// With --print, validates, compares and prints the result to stdout.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First (top) sequence
    #[arg(short = '1', long = "seq1", conflicts_with = "input")]
    seq1: Option<String>,

    /// Second (bottom) sequence
    #[arg(short = '2', long = "seq2", conflicts_with = "input")]
    seq2: Option<String>,

    /// FASTA file; its first two records fill the form
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Print the comparison and exit instead of opening the viewer
    #[arg(short = 'p', long = "print")]
    print: bool,

    /// Columns per printed block
    #[arg(short = 'w', long = "width", default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Print without ANSI colors (mismatches marked with '*')
    #[arg(long = "no-color")]
    no_color: bool,

    /// Use Unicode glyphs in the viewer
    #[arg(long = "fancy")]
    fancy: bool,

    /// Directory for the session log (disabled when absent)
    #[arg(long = "log-dir")]
    log_dir: Option<PathBuf>,
}

/// Sequences and row labels the session starts with.
struct Inputs {
    labels: [String; 2],
    sequences: [String; 2],
}

fn load_inputs(args: &Args) -> Result<Inputs> {
    if let Some(path) = &args.input {
        let (first, second) = read_pair(path)?;
        return Ok(Inputs {
            labels: [first.id, second.id],
            sequences: [first.sequence, second.sequence],
        });
    }
    Ok(Inputs {
        labels: ["Sequence 1".to_string(), "Sequence 2".to_string()],
        sequences: [
            args.seq1.clone().unwrap_or_default(),
            args.seq2.clone().unwrap_or_default(),
        ],
    })
}

/// Runs print mode: validate, compare, write to stdout.
fn run_print_mode(inputs: &Inputs, options: &PrintOptions, log: &mut SessionLog) -> Result<()> {
    let pair = match validate_pair(&inputs.sequences[0], &inputs.sequences[1]) {
        Ok(pair) => pair,
        Err(errors) => {
            log.record("invalid", &errors.to_string());
            for message in errors.messages() {
                eprintln!("{}", textwrap::fill(&message, 78));
            }
            anyhow::bail!("Invalid input, nothing compared");
        }
    };

    let columns = pair.compare()?;
    log.record(
        "submit",
        &format!("length={} top={} bottom={}", columns.len(), pair.top(), pair.bottom()),
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_comparison(
        &mut handle,
        [inputs.labels[0].as_str(), inputs.labels[1].as_str()],
        &columns,
        options,
    )?;
    handle.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.width == 0 {
        anyhow::bail!("Width must be at least 1 (got {})", args.width);
    }

    let mut log = match &args.log_dir {
        Some(dir) => {
            let log = SessionLog::create_in(dir)?;
            if let Some(path) = log.path() {
                eprintln!("Logging to {}", path.display());
            }
            log
        }
        None => SessionLog::disabled(),
    };

    let inputs = load_inputs(&args)?;

    if args.print {
        let options = PrintOptions {
            width: args.width,
            color: !args.no_color,
        };
        run_print_mode(&inputs, &options, &mut log)?;
    } else {
        let [first, second] = inputs.sequences;
        let [top_label, bottom_label] = inputs.labels;
        let state = AppState::new(first, second)
            .with_labels(top_label, bottom_label)
            .with_log(log);
        run_app(state, glyphs::select(args.fancy))?;
    }

    Ok(())
}
