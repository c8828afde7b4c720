/**
 * Web Forms Compiler CLI - aspxc
 *
 * Parses .aspx / .ascx documents and prints their event streams
 */
use std::io::Write;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};
use webforms_compiler_cli::format::{format_diagnostics, format_report, OutputFormat};
use webforms_compiler_cli::perform_parse::{
    exit_code_from_reports, parse_documents, EXIT_IO_FAILURE,
};
use webforms_compiler_cli::{init_tracing, version};

fn main() {
    init_tracing();

    let matches = Command::new("aspxc")
        .version(version())
        .about("Web Forms markup parser")
        .arg(
            Arg::new("files")
                .value_name("FILES")
                .help("Documents to parse")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .value_parser(OutputFormat::NAMES)
                .default_value("text"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Exit with status 1 when any document reports a diagnostic")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_name("N")
                .help("Number of documents parsed in parallel")
                .value_parser(value_parser!(usize)),
        )
        .get_matches();

    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|files| files.cloned().collect())
        .unwrap_or_default();
    let format = matches
        .get_one::<String>("format")
        .and_then(|name| name.parse::<OutputFormat>().ok())
        .unwrap_or_default();
    let strict = matches.get_flag("strict");
    let jobs = matches.get_one::<usize>("jobs").copied();

    match run(&files, format, strict, jobs) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {:#}", err);
            process::exit(EXIT_IO_FAILURE);
        }
    }
}

fn run(
    files: &[PathBuf],
    format: OutputFormat,
    strict: bool,
    jobs: Option<usize>,
) -> anyhow::Result<i32> {
    if let Some(jobs) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let reports = parse_documents(files);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for report in &reports {
        match report {
            Ok(report) => {
                let rendered = format_report(report, format)
                    .with_context(|| format!("failed to format {}", report.path.display()))?;
                out.write_all(rendered.as_bytes())?;
                if format == OutputFormat::Json {
                    writeln!(out)?;
                }
                eprint!("{}", format_diagnostics(&report.result.errors));
            }
            Err(err) => eprintln!("error: {}", err),
        }
    }
    out.flush()?;

    Ok(exit_code_from_reports(&reports, strict))
}
