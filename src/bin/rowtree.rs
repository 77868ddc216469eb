//! rowtree CLI - Rebuild nested trees from indentation-encoded CSV rows

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use rowtree::{
    check_rows, convert_rows_with_diagnostics,
    diagnostics::{format_diagnostics, CheckResult, Diagnostic},
    read_rows, read_rows_from_path, ConvertOptions, OutputFormat, ReaderOptions, SourceRow,
    TreeResult,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use tracing::{debug, info};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "rowtree")]
#[command(version)]
#[command(about = "Rebuild nested key/value trees from indentation-encoded CSV rows", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input CSV file (reads from stdin if not provided)
    input_file: Option<PathBuf>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Pretty print JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Delete the input file after a successful conversion
    #[arg(long)]
    consume: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,

    #[command(flatten)]
    parse: ParseArgs,

    /// Log pipeline progress to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Options shared by every command that reads rows
#[cfg(feature = "cli")]
#[derive(Args, Clone)]
struct ParseArgs {
    /// Strict mode: fail on malformed rows and inconsistent depths
    #[arg(long, global = true)]
    strict: bool,

    /// Keep comma-separated values as plain text
    #[arg(long, global = true)]
    no_split: bool,

    /// Drop empty items when splitting lists
    #[arg(long, global = true)]
    drop_empty_items: bool,

    /// CSV field delimiter (a single ASCII character)
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter, global = true)]
    delimiter: u8,
}

#[cfg(feature = "cli")]
fn parse_delimiter(text: &str) -> Result<u8, String> {
    ReaderOptions::parse_delimiter(text).map_err(|e| e.to_string())
}

#[cfg(feature = "cli")]
impl ParseArgs {
    fn reader_options(&self) -> ReaderOptions {
        ReaderOptions::default().with_delimiter(self.delimiter)
    }

    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            strict: self.strict,
            list_separator: if self.no_split { None } else { Some(',') },
            keep_empty_list_items: !self.drop_empty_items,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Check a CSV file for irregular rows without converting
    Check {
        /// Input file to check
        input: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Batch convert every .csv file in a directory
    Batch {
        /// Input directory or single file
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Pretty print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Delete each input file after it converts successfully
        #[arg(long)]
        consume: bool,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// JSON
    Json,
    /// YAML
    Yaml,
}

#[cfg(feature = "cli")]
impl Format {
    fn output_format(self, pretty: bool) -> OutputFormat {
        match self {
            Format::Json if pretty => OutputFormat::JsonPretty,
            Format::Json => OutputFormat::Json,
            Format::Yaml => OutputFormat::Yaml,
        }
    }
}

#[cfg(feature = "cli")]
fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default = match verbose {
        0 => "warn",
        1 => "rowtree=debug",
        _ => "rowtree=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            1
        }
    };
    std::process::exit(code);
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> TreeResult<i32> {
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd, &cli.parse);
    }

    let rows = load_rows(cli.input_file.as_deref(), &cli.parse.reader_options())?;
    let output = convert_rows_with_diagnostics(&rows, &cli.parse.convert_options())?;

    if !cli.quiet && output.has_warnings() {
        print_diagnostics_to_stderr(&output.warnings);
    }

    let rendered = cli.format.output_format(cli.pretty).render(&output.tree)?;

    match cli.output {
        Some(ref path) => {
            fs::write(path, format!("{}\n", rendered))?;
            if output.warnings.is_empty() {
                eprintln!("✓ Output written to: {}", path.display());
            } else {
                eprintln!(
                    "⚠ Output written to: {} ({} warning(s))",
                    path.display(),
                    output.warnings.len()
                );
            }
        }
        None => println!("{}", rendered),
    }

    if cli.consume {
        if let Some(ref path) = cli.input_file {
            fs::remove_file(path)?;
            info!(path = %path.display(), "removed consumed input file");
        }
    }

    Ok(0)
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands, parse: &ParseArgs) -> TreeResult<i32> {
    match cmd {
        Commands::Check { input, no_color } => {
            let result = match load_rows(input.as_deref(), &parse.reader_options()) {
                Ok(rows) => check_rows(&rows, &parse.convert_options()),
                Err(err) => CheckResult::from(vec![Diagnostic::from(&err)]),
            };
            println!("{}", format_diagnostics(&result, !no_color));
            Ok(if result.has_errors() { 1 } else { 0 })
        }

        Commands::Batch {
            input,
            output_dir,
            format,
            pretty,
            consume,
        } => {
            fs::create_dir_all(&output_dir)?;
            let format = format.output_format(pretty);

            let files: Vec<PathBuf> = if input.is_dir() {
                let mut files: Vec<PathBuf> = fs::read_dir(&input)?
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| {
                        p.extension()
                            .and_then(|s| s.to_str())
                            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
                    })
                    .collect();
                files.sort();
                files
            } else {
                vec![input]
            };

            let mut success_count = 0;
            let mut error_count = 0;

            for file_path in files {
                let stem = file_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");
                let output_path = output_dir.join(format!("{}.{}", stem, format.extension()));

                match convert_file(&file_path, &output_path, format, parse) {
                    Ok(warnings) => {
                        if warnings == 0 {
                            eprintln!("✓ {}", output_path.display());
                        } else {
                            eprintln!("⚠ {} ({} warning(s))", output_path.display(), warnings);
                        }
                        success_count += 1;
                        if consume {
                            if let Err(e) = fs::remove_file(&file_path) {
                                eprintln!("✗ {} - could not remove: {}", file_path.display(), e);
                            }
                        }
                    }
                    Err(e) => {
                        eprintln!("✗ {} - {}", file_path.display(), e);
                        error_count += 1;
                    }
                }
            }

            eprintln!(
                "\nBatch conversion complete: {} succeeded, {} failed",
                success_count, error_count
            );

            Ok(if error_count > 0 { 1 } else { 0 })
        }

        Commands::Info => {
            println!("rowtree - Rebuild nested key/value trees from indentation-encoded CSV rows");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Input layout:");
            println!("  - leading empty cells set a row's depth");
            println!("  - label in the first non-empty cell, value in the next");
            println!("  - comma-separated values become lists");
            println!("  - a label with no value names the key children nest under");
            println!("  - an all-empty row separates records");
            println!();
            println!("Output formats:");
            println!("  ✓ JSON (compact or pretty)");
            println!("  ✓ YAML");
            println!();
            Ok(0)
        }
    }
}

/// Read rows from a file, or from stdin when no path is given
#[cfg(feature = "cli")]
fn load_rows(path: Option<&Path>, options: &ReaderOptions) -> TreeResult<Vec<SourceRow>> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "reading rows");
            read_rows_from_path(path, options)
        }
        None => read_rows(io::stdin().lock(), options),
    }
}

/// Convert one file, returning the number of warnings
#[cfg(feature = "cli")]
fn convert_file(
    input: &Path,
    output: &Path,
    format: OutputFormat,
    parse: &ParseArgs,
) -> TreeResult<usize> {
    let rows = read_rows_from_path(input, &parse.reader_options())?;
    let converted = convert_rows_with_diagnostics(&rows, &parse.convert_options())?;
    let rendered = format.render(&converted.tree)?;
    fs::write(output, format!("{}\n", rendered))?;
    Ok(converted.warnings.len())
}

/// Print warnings to stderr
#[cfg(feature = "cli")]
fn print_diagnostics_to_stderr(warnings: &[Diagnostic]) {
    eprintln!();
    eprintln!("Conversion Warnings ({}):", warnings.len());
    eprintln!();
    for diag in warnings {
        match diag.line {
            Some(line) => eprintln!("  [line {}] {}", line, diag.message),
            None => eprintln!("  {}", diag.message),
        }
    }
    eprintln!();
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_flag_accepts_ascii() {
        let cli = Cli::try_parse_from(["rowtree", "-d", ";", "in.csv"]).unwrap();
        assert_eq!(cli.parse.reader_options().delimiter, b';');

        let cli = Cli::try_parse_from(["rowtree", "in.csv"]).unwrap();
        assert_eq!(cli.parse.reader_options().delimiter, b',');
    }

    #[test]
    fn test_delimiter_flag_rejects_multibyte_character() {
        let err = Cli::try_parse_from(["rowtree", "-d", "§", "in.csv"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("Invalid delimiter"));
    }

    #[test]
    fn test_delimiter_flag_rejects_several_characters() {
        assert!(Cli::try_parse_from(["rowtree", "--delimiter", ";;", "in.csv"]).is_err());
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install rowtree --features cli");
    eprintln!("  rowtree [OPTIONS] [INPUT_FILE]");
}
