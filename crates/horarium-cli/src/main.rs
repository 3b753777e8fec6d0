//! `horarium` CLI — inspect and check parish schedule expressions from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Next occurrences of a schedule (RFC 3339 UTC, one per line)
//! horarium next "30 19 * * 6" --count 5
//!
//! # Pin the start instant for reproducible output
//! horarium next "30 19 * * 6" --from 2026-08-05T00:00:00Z
//!
//! # Plain-language description
//! horarium describe "30 19 * * 6"
//!
//! # Advisory conformance check for a hand-picked timestamp
//! horarium check "30 19 * * 6" --at 2026-08-08T22:30:00Z
//!
//! # Serve a single suggestion request (JSON body on stdin)
//! echo '{"expression": "0 8 * * *", "count": 3}' | horarium suggest
//! ```

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::io::{self, Read};

use horarium_engine::{
    check_expression, describe, handle_suggestion, next_n, RecurrencePattern,
    DEFAULT_SUGGESTION_COUNT, DEFAULT_TOLERANCE_SECONDS,
};

#[derive(Parser)]
#[command(
    name = "horarium",
    version,
    about = "Parish Mass schedule recurrence engine CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the next occurrences of a schedule expression
    Next {
        /// 5-field cron-style expression, e.g. "30 19 * * 6"
        expression: String,
        /// Number of occurrences to print
        #[arg(short, long, default_value_t = DEFAULT_SUGGESTION_COUNT)]
        count: usize,
        /// Start instant (RFC 3339); defaults to now
        #[arg(long)]
        from: Option<String>,
        /// IANA timezone the schedule's wall clock is evaluated in
        #[arg(long, default_value = "America/Sao_Paulo")]
        timezone: String,
    },
    /// Describe an expression in plain language
    Describe {
        /// 5-field cron-style expression
        expression: String,
    },
    /// Check whether a timestamp conforms to a schedule (advisory only)
    Check {
        /// 5-field cron-style expression
        expression: String,
        /// Candidate instant (RFC 3339)
        #[arg(long)]
        at: String,
        /// Allowed slack between the candidate and a true occurrence
        #[arg(long, default_value_t = DEFAULT_TOLERANCE_SECONDS)]
        tolerance_seconds: u32,
        /// IANA timezone the schedule's wall clock is evaluated in
        #[arg(long, default_value = "America/Sao_Paulo")]
        timezone: String,
    },
    /// Serve a single suggestion request (JSON body on stdin or a file)
    Suggest {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// IANA timezone the schedule's wall clock is evaluated in
        #[arg(long, default_value = "America/Sao_Paulo")]
        timezone: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Next {
            expression,
            count,
            from,
            timezone,
        } => {
            let tz = parse_timezone(&timezone)?;
            let from = match from {
                Some(raw) => parse_instant(&raw)?,
                None => Utc::now(),
            };
            let pattern = RecurrencePattern::parse(&expression)
                .with_context(|| format!("invalid schedule expression '{expression}'"))?;
            for occurrence in next_n(&pattern, from, tz, count) {
                println!("{}", occurrence.to_rfc3339_opts(SecondsFormat::Secs, true));
            }
        }
        Commands::Describe { expression } => {
            println!("{}", describe(&expression));
        }
        Commands::Check {
            expression,
            at,
            tolerance_seconds,
            timezone,
        } => {
            let tz = parse_timezone(&timezone)?;
            let candidate = parse_instant(&at)?;
            // Validate eagerly: unlike the save path, a CLI user checking a
            // bad expression wants an error, not silence.
            RecurrencePattern::parse(&expression)
                .with_context(|| format!("invalid schedule expression '{expression}'"))?;
            let verdict = check_expression(&expression, candidate, tz, tolerance_seconds);
            match verdict.advisory {
                Some(message) => println!("{message}"),
                None => println!("on schedule"),
            }
        }
        Commands::Suggest {
            input,
            output,
            timezone,
        } => {
            let tz = parse_timezone(&timezone)?;
            let body = read_input(input.as_deref())?;
            let response = handle_suggestion(&body, Utc::now(), tz)?;
            let json = serde_json::to_string_pretty(&response)?;
            write_output(output.as_deref(), &json)?;
        }
    }

    Ok(())
}

fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| anyhow!("unknown timezone: {name}"))
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid RFC 3339 timestamp '{raw}'"))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {path}"))?;
        }
        None => {
            println!("{content}");
        }
    }
    Ok(())
}
