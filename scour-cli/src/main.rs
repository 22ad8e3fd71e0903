use clap::Parser;
use scour::{
    results::{EXIT_ERROR, EXIT_OUTPUT_ERROR},
    NullSink, Printer, SearchConfig,
};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Line-oriented pattern search for streams and files.
///
/// Searches standard input, or the given files, for lines matching PATTERN
/// and prints them. Exit status is 0 when a match was found, 1 when none
/// was, and 2 on error.
#[derive(Parser)]
#[command(name = "scour", author, version, about, long_about = None)]
struct Cli {
    /// Pattern to search for (a regex unless --fixed-strings is given)
    pattern: String,

    /// Files to search; standard input is read when none are given
    paths: Vec<PathBuf>,

    /// Case-insensitive matching
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Treat the pattern as a literal string, not a regex
    #[arg(short = 'F', long)]
    fixed_strings: bool,

    /// Match whole words only
    #[arg(short = 'w', long)]
    word_regexp: bool,

    /// Select lines that do NOT match
    #[arg(short = 'v', long)]
    invert_match: bool,

    /// Number of context lines before each match
    #[arg(short = 'B', long, value_name = "N", default_value = "0")]
    before_context: usize,

    /// Number of context lines after each match
    #[arg(short = 'A', long, value_name = "N", default_value = "0")]
    after_context: usize,

    /// Number of context lines around each match (sets both -B and -A)
    #[arg(short = 'C', long, value_name = "N")]
    context: Option<usize>,

    /// Print only the number of matching lines
    #[arg(short = 'c', long)]
    count: bool,

    /// Suppress all output; exit status reports the outcome
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Prefix output lines with their line number (the default)
    #[arg(short = 'n', long = "line-number", overrides_with = "no_line_number")]
    line_number: bool,

    /// Suppress line numbers
    #[arg(long, overrides_with = "line_number")]
    no_line_number: bool,

    /// Always prefix output with the source name
    #[arg(short = 'H', long)]
    with_filename: bool,

    /// When to colorize output (auto, always, never)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Extra configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> SearchConfig {
        // -C fills in whichever side -B/-A left unset
        let around = self.context.unwrap_or(0);
        let context_before = if self.before_context > 0 {
            self.before_context
        } else {
            around
        };
        let context_after = if self.after_context > 0 {
            self.after_context
        } else {
            around
        };

        SearchConfig {
            pattern: self.pattern,
            paths: self.paths,
            ignore_case: self.ignore_case,
            fixed_strings: self.fixed_strings,
            word_regexp: self.word_regexp,
            invert_match: self.invert_match,
            context_before,
            context_after,
            line_numbers: if self.line_number {
                Some(true)
            } else if self.no_line_number {
                Some(false)
            } else {
                None
            },
            count_only: self.count,
            quiet: self.quiet,
            with_filename: self.with_filename,
            log_level: self.log_level,
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();
    let color_when = cli.color.clone();
    let config_file = cli.config.clone();
    let cli_config = cli.into_config();

    let config = match SearchConfig::load_from(config_file.as_deref()) {
        Ok(file_config) => file_config.merge_with_cli(cli_config),
        Err(e) => {
            eprintln!("scour: {}", e);
            return EXIT_ERROR;
        }
    };

    init_logging(&config.log_level);
    debug!(?config, "effective configuration");

    // `colored` tty-gates its output globally, so `always` and `never` must
    // override that gate or they silently degrade to `auto`.
    let use_color = match color_when.as_str() {
        "always" => {
            colored::control::set_override(true);
            true
        }
        "never" => {
            colored::control::set_override(false);
            false
        }
        _ => io::stdout().is_terminal(),
    };
    let show_filename = config.with_filename || config.paths.len() > 1;

    let report = |source: &scour::InputSource, e: &scour::SearchError| {
        let _ = source;
        eprintln!("scour: {}", e);
    };

    let result = if config.count_only || config.quiet {
        scour::search(&config, &mut NullSink, report)
    } else {
        let stdout = io::stdout();
        let mut printer = Printer::new(stdout.lock())
            .with_filename(show_filename)
            .line_numbers(config.show_line_numbers())
            .group_separators(config.context_before + config.context_after > 0)
            .color(use_color);
        scour::search(&config, &mut printer, report)
    };

    match result {
        Ok(summary) => {
            if config.count_only && !config.quiet {
                if let Err(e) = print_counts(&summary, show_filename) {
                    eprintln!("scour: output error: {}", e);
                    return EXIT_OUTPUT_ERROR;
                }
            }
            summary.exit_code()
        }
        Err(e) if e.is_output_error() => {
            eprintln!("scour: {}", e);
            EXIT_OUTPUT_ERROR
        }
        Err(e) => {
            eprintln!("scour: {}", e);
            EXIT_ERROR
        }
    }
}

fn print_counts(summary: &scour::RunSummary, show_filename: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if show_filename {
        for (source, count) in &summary.source_counts {
            writeln!(out, "{}:{}", source, count)?;
        }
    } else {
        writeln!(out, "{}", summary.match_count)?;
    }
    out.flush()
}
