// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! `rowcheck`: validate delimiter-separated rows of integers in parallel.
//!
//! Reads a file (or stdin), checks that every row has the expected number of
//! cells and that every cell is an integer, prints each problem to stderr and
//! a timing summary to stdout.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rowcheck_model::{
    loading::RowSetLoader,
    rows::{ColumnSize, RowSet},
};
use rowcheck_pool::pool::{ReportMode, ValidationPoolBuilder, default_worker_count};
use rowcheck_scan::{partition::effective_worker_count, sink::WriterSink};
use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "rowcheck", version, about = "Parallel row and cell validator", long_about = None)]
struct Cli {
    /// Input file. Reads stdin when omitted.
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Number of worker threads (defaults to the available parallelism)
    #[arg(short = 'w', long = "workers", value_name = "N")]
    workers: Option<usize>,

    /// Expected cells per row (defaults to the first row's cell count)
    #[arg(short = 'c', long = "columns", value_name = "N", allow_hyphen_values = true)]
    columns: Option<ColumnSize>,

    /// Cell delimiter
    #[arg(short = 'd', long = "delimiter", value_name = "C", default_value_t = ',')]
    delimiter: char,

    /// Ignore empty lines instead of treating them as one-cell rows
    #[arg(long = "skip-blank-lines", action = ArgAction::SetTrue)]
    skip_blank_lines: bool,

    /// Report problems in row order once every worker is done
    #[arg(long = "ordered", action = ArgAction::SetTrue)]
    ordered: bool,

    /// Do not print individual problems, only the summary
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(verbose >= 2)
        .init();
}

/// How a run that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    /// Validation ran, whatever it found.
    Validated,
    /// The input held no rows.
    NoRows,
}

impl RunStatus {
    fn code(self) -> u8 {
        match self {
            RunStatus::Validated => 0,
            RunStatus::NoRows => 2,
        }
    }
}

fn open_input(cli: &Cli) -> Result<Box<dyn Read>> {
    match &cli.path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdin().lock())),
    }
}

fn load_rows<R: Read>(cli: &Cli, input: R) -> Result<RowSet> {
    RowSetLoader::new()
        .delimiter(cli.delimiter)
        .skip_blank_lines(cli.skip_blank_lines)
        .from_reader(input)
        .context("failed to read input")
}

/// Validates `input`, writing the summary to `out` and one line per problem
/// to `problems`.
fn run<R, O, E>(cli: &Cli, input: R, out: &mut O, mut problems: E) -> Result<RunStatus>
where
    R: Read,
    O: Write,
    E: Write + Send,
{
    let rows = load_rows(cli, input)?;
    let Some(first_row_size) = rows.column_size_hint() else {
        writeln!(problems, "No rows in file").context("failed to write to stderr")?;
        return Ok(RunStatus::NoRows);
    };
    let column_size = cli.columns.unwrap_or(first_row_size);
    let requested = cli.workers.unwrap_or_else(default_worker_count);
    let workers = effective_worker_count(rows.len(), requested)?;

    let sink = WriterSink::new(problems);
    let report_mode = if cli.ordered {
        ReportMode::AfterJoin
    } else {
        ReportMode::OnWorkerCompletion
    };

    let mut builder = ValidationPoolBuilder::new()
        .with_worker_count(requested)
        .with_report_mode(report_mode);
    if !cli.quiet {
        builder = builder.with_sink(&sink);
    }
    let pool = builder.build();

    writeln!(out, "Workers: {}", workers)?;
    writeln!(out, "Beginning validation...")?;

    let start = Instant::now();
    let outcome = pool.validate_all(&rows, column_size)?;
    let elapsed = start.elapsed();

    sink.flush().context("failed to flush problem report")?;
    if sink.write_errors() > 0 {
        tracing::warn!(lines = sink.write_errors(), "some problems could not be written");
    }

    writeln!(
        out,
        "Validated {} rows of {} cells in {:?}",
        rows.len(),
        column_size,
        elapsed
    )?;
    writeln!(out, "{} problems in {} rows", outcome.len(), outcome.failing_rows())?;
    tracing::debug!("{}", outcome.statistics());

    out.flush().context("failed to flush stdout")?;
    Ok(RunStatus::Validated)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = open_input(&cli).and_then(|input| {
        run(
            &cli,
            input,
            &mut std::io::stdout().lock(),
            BufWriter::new(std::io::stderr()),
        )
    });

    match result {
        Ok(status) => ExitCode::from(status.code()),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
