use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use modcheck::config::OutputFormat;
use modcheck::modulus::{LazyEngine, ModulusError, ValidationRequest, ValidationResult};
use modcheck::output;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CHECK_FAILED: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate one sort code and account number
    Check {
        /// 6-digit sort code, e.g. 089999
        sort_code: String,
        /// 8-digit account number, e.g. 66374958
        account_number: String,
    },
    /// Validate every "<sort code> <account number>" line of a file
    Batch {
        /// Input file; blank lines and lines starting with '#' are skipped
        file: PathBuf,
    },
    /// Show the weighting rules that cover a sort code
    Rules {
        /// 6-digit sort code
        sort_code: String,
    },
}

#[derive(Parser, Debug)]
#[command(name = "modcheck")]
#[command(about = "UK sort code and account number modulus checker", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/modcheck/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Weighting table file (overrides table_path from config)
    #[arg(short, long, global = true)]
    table: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// One line of batch output: a full result, a request the engine rejected,
/// or a line that is not a sort code / account number pair.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum BatchEntry {
    Checked(ValidationResult),
    Rejected {
        request: ValidationRequest,
        error: String,
    },
    Unreadable {
        line: usize,
        text: String,
        error: String,
    },
}

fn main() {
    let cli = Cli::parse();
    modcheck::logging::init(cli.verbose);
    let start_time = Instant::now();

    let config = match modcheck::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let json = cli.json || config.output == Some(OutputFormat::Json);
    let table_path = modcheck::config::resolve_table_path(cli.table, &config);
    let engine = LazyEngine::new(table_path);
    tracing::debug!(path = %engine.table().path().display(), "using weighting table");

    let use_colors = !json && output::should_use_colors();

    let code = match cli.command {
        Commands::Check {
            sort_code,
            account_number,
        } => run_check(&engine, ValidationRequest::new(sort_code, account_number), json, use_colors),
        Commands::Batch { file } => run_batch(&engine, &file, json, use_colors),
        Commands::Rules { sort_code } => run_rules(&engine, &sort_code, json, use_colors),
    };

    tracing::debug!(elapsed = ?start_time.elapsed(), exit_code = code, "done");
    std::process::exit(code);
}

fn run_check(engine: &LazyEngine, request: ValidationRequest, json: bool, use_colors: bool) -> i32 {
    match engine.validate_request(&request) {
        Ok(result) => {
            if json {
                print_json(&result);
            } else {
                println!("{}", output::format_result(&result, use_colors));
            }
            if result.all_passed() {
                EXIT_SUCCESS
            } else {
                EXIT_CHECK_FAILED
            }
        }
        Err(e) => {
            let code = exit_code_for(&e);
            if json && code == EXIT_INPUT {
                print_json(&BatchEntry::Rejected {
                    request,
                    error: e.to_string(),
                });
            } else {
                eprintln!("{}", output::format_error(&request, &e.to_string(), use_colors));
            }
            code
        }
    }
}

fn run_batch(engine: &LazyEngine, file: &Path, json: bool, use_colors: bool) -> i32 {
    let content = match fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to read batch file at {}: {}", file.display(), e);
            return EXIT_INPUT;
        }
    };

    let entries = match check_batch(engine, &content) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_CONFIG;
        }
    };

    if json {
        print_json(&entries);
    } else {
        for entry in &entries {
            match entry {
                BatchEntry::Checked(result) => {
                    println!("{}", output::format_result(result, use_colors));
                }
                BatchEntry::Rejected { request, error } => {
                    println!("{}", output::format_error(request, error, use_colors));
                }
                BatchEntry::Unreadable { line, error, .. } => {
                    eprintln!("Line {}: {}", line, error);
                }
            }
        }
    }
    tracing::debug!(checked = entries.len(), "batch finished");

    batch_exit_code(&entries)
}

/// Validate every pair in `content`. Bad lines and rejected requests are
/// recorded and processing continues; only a table load failure stops the
/// batch, since every remaining line would fail the same way.
fn check_batch(engine: &LazyEngine, content: &str) -> Result<Vec<BatchEntry>, ModulusError> {
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let request = match parse_batch_line(line) {
            Some(req) => req,
            None => {
                entries.push(BatchEntry::Unreadable {
                    line: idx + 1,
                    text: line.to_string(),
                    error: format!("expected '<sort code> <account number>', got '{}'", line),
                });
                continue;
            }
        };

        match engine.validate_request(&request) {
            Ok(result) => entries.push(BatchEntry::Checked(result)),
            Err(e @ ModulusError::TableLoad(_)) => return Err(e),
            Err(e) => entries.push(BatchEntry::Rejected {
                request,
                error: e.to_string(),
            }),
        }
    }

    Ok(entries)
}

fn batch_exit_code(entries: &[BatchEntry]) -> i32 {
    let any_rejected = entries
        .iter()
        .any(|e| !matches!(e, BatchEntry::Checked(_)));
    let any_failed = entries
        .iter()
        .any(|e| matches!(e, BatchEntry::Checked(result) if !result.all_passed()));

    if any_rejected {
        EXIT_INPUT
    } else if any_failed {
        EXIT_CHECK_FAILED
    } else {
        EXIT_SUCCESS
    }
}

fn run_rules(engine: &LazyEngine, sort_code: &str, json: bool, use_colors: bool) -> i32 {
    let numeric = match parse_sort_code(sort_code) {
        Some(n) => n,
        None => {
            eprintln!("Sort code must be 6 digits, got '{}'", sort_code);
            return EXIT_INPUT;
        }
    };

    let table = match engine.table().get() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_CONFIG;
        }
    };

    let rules: Vec<_> = table.matching(numeric).collect();
    if json {
        print_json(&rules);
    } else {
        println!("{}", output::format_rules(&rules, use_colors));
    }

    if rules.is_empty() {
        EXIT_INPUT
    } else {
        EXIT_SUCCESS
    }
}

fn parse_sort_code(sort_code: &str) -> Option<u32> {
    if sort_code.len() != modcheck::modulus::SORT_CODE_LEN
        || !sort_code.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    sort_code.parse().ok()
}

fn parse_batch_line(line: &str) -> Option<ValidationRequest> {
    let mut parts = line.split_whitespace();
    let sort_code = parts.next()?;
    let account_number = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some(ValidationRequest::new(sort_code, account_number))
}

fn exit_code_for(err: &ModulusError) -> i32 {
    match err {
        ModulusError::MalformedInput { .. } | ModulusError::NoMatchingRule { .. } => EXIT_INPUT,
        ModulusError::TableLoad(_) => EXIT_CONFIG,
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match output::format_json(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}
