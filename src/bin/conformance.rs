//! Drives the official UAX #14 `LineBreakTest-<version>.0.0.txt` conformance file against a
//! [`linebreak_checker::Checker`], reporting every mismatch and exiting non-zero if any occurred.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use linebreak_checker::{make_checker, BreakType, UnicodeVersion};

/// Check a UAX #14 line-break conformance test file against this crate's checker.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a `LineBreakTest-<version>.0.0.txt` file.
    file: PathBuf,

    /// Unicode version's rule set and data tables to check against.
    #[arg(long, default_value_t = 17)]
    version: u8,

    /// Suppress per-mismatch logging; only the summary line is printed.
    #[arg(long)]
    quiet: bool,

    /// Stop collecting mismatches after this many and report the rest as elided.
    #[arg(long, default_value_t = 20)]
    max_reported: usize,
}

const BREAK_MASK: u8 = BreakType::Mandatory as u8 | BreakType::Allowed as u8;

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(if args.quiet {
        "error"
    } else {
        "info"
    }))
    .init();

    let version = match args.version {
        16 => UnicodeVersion::V16,
        17 => UnicodeVersion::V17,
        other => {
            log::error!("unsupported --version {other}; expected 16 or 17");
            return ExitCode::FAILURE;
        }
    };
    let rules = match version {
        UnicodeVersion::V16 => linebreak_checker::RuleSet::v16(),
        UnicodeVersion::V17 => linebreak_checker::RuleSet::v17(),
    };
    let rules = match rules {
        Ok(r) => r,
        Err(e) => {
            log::error!("failed to compile rule set: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut checker = match make_checker(Some(rules), None, None, None) {
        Ok(c) => c,
        Err(e) => {
            log::error!("failed to build checker: {e}");
            return ExitCode::FAILURE;
        }
    };

    let file = match File::open(&args.file) {
        Ok(f) => f,
        Err(e) => {
            log::error!("failed to open {}: {e}", args.file.display());
            return ExitCode::FAILURE;
        }
    };

    let mut total_lines = 0usize;
    let mut mismatches = 0usize;
    let mut reported = 0usize;

    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("io error reading line {}: {e}", line_no + 1);
                return ExitCode::FAILURE;
            }
        };
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let (text, expected_breaks) = match parse_test_line(line) {
            Some(v) => v,
            None => {
                log::error!("line {}: malformed test line: {line:?}", line_no + 1);
                return ExitCode::FAILURE;
            }
        };
        total_lines += 1;

        checker.set_text(&text);
        for position in 0..=checker.code_unit_len() {
            let verdict = match checker.is_break_at(position) {
                Ok(v) => v,
                Err(e) => {
                    log::error!("line {}: is_break_at({position}) failed: {e}", line_no + 1);
                    return ExitCode::FAILURE;
                }
            };
            let actual_break = verdict.matches(BREAK_MASK);
            let expected_break = expected_breaks[position];
            if actual_break != expected_break {
                mismatches += 1;
                if reported < args.max_reported {
                    reported += 1;
                    log::error!(
                        "line {}: position {position} expected {} got {:?} — {text:?}",
                        line_no + 1,
                        if expected_break { "break" } else { "no break" },
                        verdict,
                    );
                }
            }
        }
    }

    if mismatches > reported {
        log::error!("{} further mismatches elided", mismatches - reported);
    }
    log::info!("checked {total_lines} test lines, {mismatches} mismatches");

    if mismatches == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Parses one test-file line — alternating verdict (`×`/`÷`) and hexadecimal code-point tokens,
/// starting and ending with a verdict — into the concatenated text and a per-code-unit-position
/// break/no-break table (`expected_breaks[text_length]` is always defined).
fn parse_test_line(line: &str) -> Option<(String, Vec<bool>)> {
    let mut tokens = line.split_whitespace();
    let mut text = String::new();
    let mut expected_breaks = vec![match tokens.next()? {
        "÷" => true,
        "×" => false,
        _ => return None,
    }];

    loop {
        let hex = tokens.next()?;
        let cp = u32::from_str_radix(hex, 16).ok()?;
        let ch = char::from_u32(cp)?;
        text.push(ch);
        let is_break = match tokens.next()? {
            "÷" => true,
            "×" => false,
            _ => return None,
        };
        for _ in 0..ch.len_utf16() - 1 {
            expected_breaks.push(false);
        }
        expected_breaks.push(is_break);

        if tokens.clone().next().is_none() {
            break;
        }
    }

    Some((text, expected_breaks))
}
