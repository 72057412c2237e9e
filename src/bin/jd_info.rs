//! Julian Day Information Tool
//!
//! This binary converts a Julian date, unix time or calendar date into a
//! Julian Day and prints its projections: exact and modified Julian dates,
//! unix time, weekday and calendar fields in either calendar.
//!
//! Usage:
//!   cargo run --bin jd_info -- [--julian] [--tz MINUTES] [--json] [INPUT]
//!
//! INPUT may be a decimal Julian date (`2451545.25`), an RFC 3339 timestamp
//! or a calendar date (`1582-10-04T12:00`). Without INPUT the current time
//! is used.

use std::str::FromStr;

use clap::{ArgAction, Parser};
use julianday::{constants, BigRational, CalendarMode, JulianDay, Source};
use num::ToPrimitive;
use serde_json::json;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Julian Day Information Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Converts dates and times to Julian Days and displays their projections",
    long_about = None
)]
struct Args {
    /// Read calendar dates in, and print fields for, the Julian calendar
    #[arg(short, long, action = ArgAction::SetTrue)]
    julian: bool,

    /// Treat INPUT as seconds since 1970-01-01T00:00:00Z
    #[arg(short, long, action = ArgAction::SetTrue)]
    unix: bool,

    /// Timezone offset in minutes east of UTC for the calendar fields
    #[arg(short, long, default_value_t = constants::UTC, allow_hyphen_values = true)]
    tz: i32,

    /// Print a single JSON object instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Julian date, timestamp or calendar date; defaults to now
    #[arg(allow_hyphen_values = true)]
    input: Option<String>,
}

/// Initialize logging from the verbosity flag; `RUST_LOG` takes precedence
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

/// Helper to print named values in a formatted way
fn print_named_value(name: &str, value: impl std::fmt::Display) {
    println!("{:>22}: {}", name, value);
}

/// Build the source described by the command line
fn parse_source(args: &Args) -> Result<Source> {
    let Some(input) = args.input.as_deref() else {
        return Ok(Source::Now);
    };

    if args.unix {
        let seconds = BigRational::from_str(input)
            .ok()
            .or_else(|| input.parse::<f64>().ok().and_then(BigRational::from_float))
            .ok_or_else(|| format!("'{}' is not a number of seconds", input))?;
        return Ok(Source::UnixTime(seconds));
    }

    Ok(Source::from_str(input)?)
}

fn display_text(jd: &JulianDay, tz: i32) -> Result<()> {
    print_section_header("Julian Day");
    print_named_value("Julian date", jd);
    print_named_value("Modified Julian date", format!("{:.9}", mjd_f64(jd)));
    print_named_value("Julian day number", jd.jdn());
    print_named_value("Seconds of day", format!("{}.{:06}", jd.sec(), jd.usec()));
    print_named_value("Float value", format!("{:.9}", jd.to_f64()));
    print_named_value("Centuries since J2000", format!("{:.12}", centuries_f64(jd)));

    print_section_header("Civil Time");
    print_named_value("Calendar", format!("{:?}", jd.mode()));
    print_named_value("Weekday", jd.weekday());
    print_named_value("Fields", jd.datetime(tz)?);
    match jd.unix_parts() {
        Ok((seconds, usec)) => print_named_value("Unix time", format!("{}.{:06}", seconds, usec)),
        Err(err) => print_named_value("Unix time", err),
    }

    let other = match jd.mode() {
        CalendarMode::Gregorian => CalendarMode::Julian,
        CalendarMode::Julian => CalendarMode::Gregorian,
    };
    print_named_value(&format!("{:?} fields", other), jd.datetime_in(tz, other)?);
    Ok(())
}

fn display_json(jd: &JulianDay, tz: i32) -> Result<()> {
    let fields = jd.datetime(tz)?;
    let report = json!({
        "jd": jd.to_decimal_string(),
        "mjd": mjd_f64(jd),
        "value": jd,
        "unix_time": jd.to_unix_time(),
        "wday": jd.wday(),
        "fields": fields,
        "array": fields.to_array(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn mjd_f64(jd: &JulianDay) -> f64 {
    jd.mjd().to_f64().unwrap_or(f64::NAN)
}

fn centuries_f64(jd: &JulianDay) -> f64 {
    jd.julian_centuries().to_f64().unwrap_or(f64::NAN)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mode = if args.julian {
        CalendarMode::Julian
    } else {
        CalendarMode::Gregorian
    };

    let source = parse_source(&args)?;
    log::info!("reading {} source in the {} calendar", source.kind(), mode);
    let jd = JulianDay::new(source, mode)?;

    if args.json {
        display_json(&jd, args.tz)
    } else {
        display_text(&jd, args.tz)
    }
}
