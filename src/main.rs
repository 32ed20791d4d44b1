mod report;

use chrono::{DateTime, Local};
use cronsec::{Context, DayMatch, Expression, Options, SearchRun, is_due_with, parse_reference, search_verbose_with};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "CRONSEC_LOG";

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let expression = match Expression::parse(config.input.trim()) {
        Ok(expression) => expression,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let opts = Options { day_match: config.day_match };

    if config.due {
        let ctx = Context::new(config.reference_time);
        let due = is_due_with(&expression, &ctx, &opts);
        report::print_due(&expression, &ctx.reference_time, due, config.color);
        std::process::exit(if due { 0 } else { 1 });
    }

    let runs = collect_runs(&expression, &config, &opts);
    report::print_run(&expression, &runs, config.invert, config.verbose, config.color);
    if runs.iter().any(|run| run.result.is_err()) {
        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Chain `count` searches, each starting from the previous match. Only the
/// first honors `--skip` and `--include-reference`.
fn collect_runs(expression: &Expression, config: &CliConfig, opts: &Options) -> Vec<SearchRun<Local>> {
    let mut runs = Vec::with_capacity(config.count);
    let mut from = config.reference_time;
    let mut skip = config.skip;
    let mut include_reference = config.include_reference;

    for _ in 0..config.count {
        let run = search_verbose_with(expression, &Context::new(from), opts, skip, config.invert, include_reference);
        let found = run.result.as_ref().ok().copied();
        runs.push(run);
        let Some(found) = found else {
            break;
        };
        from = found;
        skip = 0;
        include_reference = false;
    }
    runs
}

struct CliConfig {
    input: String,
    reference_time: DateTime<Local>,
    count: usize,
    skip: u32,
    invert: bool,
    include_reference: bool,
    due: bool,
    day_match: DayMatch,
    verbose: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let now = Local::now();
    let mut input: Option<String> = None;
    let mut reference_time = now;
    let mut count = 1;
    let mut skip = 0;
    let mut invert = false;
    let mut include_reference = false;
    let mut due = false;
    let mut day_match = DayMatch::Both;
    let mut verbose = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("cronsec {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--prev" => invert = true,
            "--include-reference" => include_reference = true,
            "--due" => due = true,
            "--either-day" => day_match = DayMatch::Either,
            "-v" | "--verbose" => verbose = true,
            "--from" => {
                let value = args.next().ok_or_else(|| "error: --from expects a value".to_string())?;
                reference_time = parse_from(&value, &now)?;
            }
            "--count" | "-n" => {
                let value = args.next().ok_or_else(|| "error: --count expects a value".to_string())?;
                count = parse_number(&value, "--count")?;
            }
            "--skip" => {
                let value = args.next().ok_or_else(|| "error: --skip expects a value".to_string())?;
                skip = parse_number(&value, "--skip")?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: expression provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--from=") => {
                reference_time = parse_from(arg.trim_start_matches("--from="), &now)?;
            }
            _ if arg.starts_with("--count=") => {
                count = parse_number(arg.trim_start_matches("--count="), "--count")?;
            }
            _ if arg.starts_with("--skip=") => {
                skip = parse_number(arg.trim_start_matches("--skip="), "--skip")?;
            }
            // Expressions never start with a dash.
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: expression provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no expression provided\n\n{}", help_text()));
    }
    if count == 0 {
        return Err("error: --count must be at least 1".to_string());
    }

    Ok(CliConfig { input, reference_time, count, skip, invert, include_reference, due, day_match, verbose, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_from(value: &str, now: &DateTime<Local>) -> Result<DateTime<Local>, String> {
    parse_reference(value, now).map_err(|err| format!("error: invalid --from: {err}"))
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T, String> {
    value.trim().parse().map_err(|_| format!("error: {flag} expects a non-negative integer, got '{value}'"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "cronsec {version}

Evaluate cron expressions with a seconds field.

Usage:
  cronsec [OPTIONS] [--] <expression...>
  echo '<expression>' | cronsec [OPTIONS]

Expressions have six or seven fields (second minute hour day-of-month month
day-of-week [year]) or are one of @yearly, @annually, @monthly, @weekly,
@daily, @hourly, @minutely.

Options:
  --from <time>              Reference time: now, YYYY-MM-DDTHH:MM:SS, or an English
                             phrase such as \"next friday 8pm\". Default: now.
  -n, --count <n>            Number of consecutive matches to print. Default: 1.
  --skip <n>                 Skip this many matches before the first one printed.
  --prev                     Search backwards for previous matches.
  --include-reference        Let the reference time itself count as a match.
  --due                      Only check whether the reference time matches.
  --either-day               Day-of-month and day-of-week match if either does
                             (when both are restricted).
  -v, --verbose              Show fields and search counters.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}                Log filter for diagnostics on stderr. Default: warn.

Exit codes:
  0  Success (for --due: the reference time matches).
  1  No match found (for --due: not due).
  2  Invalid arguments or expression.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
