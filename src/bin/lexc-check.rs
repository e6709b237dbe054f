//! Command-line interface for lexc-check
//! This binary runs the source-level lexc checks and reports in a form test harnesses can consume.
//!
//! Usage:
//!   lexc-check lemmas `<path>` [-X `<regex>`]... [-Z `<file>`]   - Print the lemmas of every entry
//!   lexc-check multichars `<path>`                             - Check tags against Multichar_Symbols
//!
//! Both subcommands accept --format text|json, --debug and --verbose; lemmas also takes
//! --config `<file>` to extend the exclusion table.
//! Exit status follows the automake test protocol: 0 pass, 1 fail, 77 skip; 2 means the
//! check could not run at all.

use clap::{Arg, ArgAction, ArgMatches, Command};
use lexc_check::lexc::config::{CheckConfig, Loader};
use lexc_check::lexc::{
    scan_multichars_from_reader, scrape_lemmas_from_reader, ExclusionFilter, MulticharReport,
    Result,
};
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXIT_PASS: i32 = 0;
const EXIT_FAIL: i32 = 1;
const EXIT_ERROR: i32 = 2;
const EXIT_SKIP: i32 = 77;

fn common_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("path")
                .help("Path to the lexc file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .short('d')
                .help("Log every lemma, symbol and section change")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log progress and timing")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = Command::new("lexc-check")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Source-level checks for lexc lexicons")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            common_args(Command::new("lemmas").about("Print the lemmas of all entries"))
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the built-in defaults"),
                )
                .arg(
                    Arg::new("exclude")
                        .long("exclude")
                        .short('X')
                        .help("Skip lines matching this regex (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("acceptable-forms")
                        .long("acceptable-forms")
                        .short('Z')
                        .help("File of lemmas, one per line, to leave out of the output"),
                ),
        )
        .subcommand(common_args(
            Command::new("multichars").about("Check that every tag is a declared multichar"),
        ))
        .get_matches();

    let (name, sub_matches) = match matches.subcommand() {
        Some(subcommand) => subcommand,
        None => unreachable!(),
    };
    init_logging(sub_matches);

    let result = match name {
        "lemmas" => handle_lemmas_command(sub_matches),
        "multichars" => handle_multichars_command(sub_matches),
        _ => unreachable!(),
    };
    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

/// Logs go to stderr; stdout carries only the report.
fn init_logging(matches: &ArgMatches) {
    let default_level = if matches.get_flag("debug") {
        "debug"
    } else if matches.get_flag("verbose") {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<CheckConfig> {
    let loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    Ok(loader.build()?)
}

fn open_source(matches: &ArgMatches) -> Result<(String, BufReader<File>)> {
    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let file = File::open(path)?;
    Ok((path.clone(), BufReader::new(file)))
}

fn format_of(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text")
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error formatting output: {}", e);
        std::process::exit(EXIT_ERROR);
    })
}

/// Handle the lemmas command
fn handle_lemmas_command(matches: &ArgMatches) -> Result<i32> {
    let config = load_config(matches)?;
    let filter = ExclusionFilter::from_config(&config.exclusions)?.with_patterns(
        matches
            .get_many::<String>("exclude")
            .unwrap_or_default(),
    )?;
    let (path, reader) = open_source(matches)?;

    let start = Instant::now();
    let mut lemmas = scrape_lemmas_from_reader(reader, &filter)?;
    if let Some(forms) = matches.get_one::<String>("acceptable-forms") {
        let forms = std::fs::read_to_string(forms)?;
        for form in forms.lines().map(str::trim) {
            lemmas.remove(form);
        }
    }
    info!(lemmas = lemmas.len(), elapsed = ?start.elapsed(), "scraped {}", path);

    if lemmas.is_empty() {
        eprintln!("SKIP: could not find lemmas in {}", path);
        return Ok(EXIT_SKIP);
    }
    match format_of(matches) {
        "json" => println!("{}", to_json(&lemmas)),
        _ => {
            for lemma in &lemmas {
                println!("{}", lemma);
            }
        }
    }
    Ok(EXIT_PASS)
}

/// Handle the multichars command
fn handle_multichars_command(matches: &ArgMatches) -> Result<i32> {
    let (path, reader) = open_source(matches)?;

    let start = Instant::now();
    let report = scan_multichars_from_reader(reader)?;
    info!(
        lines = report.lines,
        entries = report.entries,
        declared = report.declared.len(),
        elapsed = ?start.elapsed(),
        "scanned {}",
        path
    );

    match format_of(matches) {
        "json" => println!("{}", to_json(&report)),
        _ => print_report(&report),
    }
    Ok(verdict(&path, &report))
}

fn print_report(report: &MulticharReport) {
    for diagnostic in &report.diagnostics {
        println!("{}", diagnostic);
    }
}

fn verdict(path: &str, report: &MulticharReport) -> i32 {
    if report.entries == 0 {
        eprintln!("SKIP: could not find lexicon entries in {}", path);
        return EXIT_SKIP;
    }
    if report.failures() > 0 {
        eprintln!("FAIL: there were problems (see above).");
        return EXIT_FAIL;
    }
    EXIT_PASS
}
