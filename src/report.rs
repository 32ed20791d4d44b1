use chrono::{DateTime, TimeZone};
use cronsec::{Expression, MAX_ITERATIONS, Position, SearchMetrics, SearchRun};
use std::fmt::Display;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Print the matches found for `expression`, one line each.
///
/// Plain mode prints only the instants (RFC 3339), which keeps the output
/// pipeable. Verbose mode adds the field breakdown and the search counters.
pub fn print_run<Tz>(expression: &Expression, runs: &[SearchRun<Tz>], invert: bool, verbose: bool, color: bool)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let palette = ansi::Palette::new(color);

    if !verbose {
        for run in runs {
            match &run.result {
                Ok(found) => println!("{}", found.to_rfc3339()),
                Err(err) => eprintln!("{}", palette.paint(format!("error: {err}"), ansi::RED)),
            }
        }
        return;
    }

    println!("\n{}", palette.bold(palette.paint(format!("⚙  Expression: \"{expression}\""), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Fields ━━━", ansi::GRAY));
    print_fields(expression, &palette);

    let heading = if invert { "━━━ Previous matches ━━━" } else { "━━━ Next matches ━━━" };
    println!("\n{}", palette.paint(heading, ansi::GRAY));
    print_matches(runs, &palette);

    println!("\n{}", palette.paint("━━━ Search ━━━", ansi::GRAY));
    print_metrics(runs, &palette);
    println!();
}

/// Print the outcome of a due check.
pub fn print_due<Tz>(expression: &Expression, at: &DateTime<Tz>, due: bool, color: bool)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let palette = ansi::Palette::new(color);
    let verdict = if due { palette.paint("due", ansi::GREEN) } else { palette.dim("not due") };
    println!("{} {} {}", palette.paint(expression.to_string(), ansi::CYAN), palette.dim("@"), at.to_rfc3339());
    println!("  {verdict}");
}

fn print_fields(expression: &Expression, palette: &ansi::Palette) {
    let restricted = expression.restricted_fields();
    for position in Position::ALL {
        let Some(token) = expression.get_field(position) else {
            println!("  {:<13} {}", palette.paint(position.name(), ansi::BLUE), palette.dim("(any year)"));
            continue;
        };
        let token = if restricted.contains_position(position) {
            palette.bold(palette.paint(token, ansi::GREEN))
        } else {
            palette.dim(token)
        };
        println!("  {:<13} {}", palette.paint(position.name(), ansi::BLUE), token);
    }
}

fn print_matches<Tz>(runs: &[SearchRun<Tz>], palette: &ansi::Palette)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if runs.is_empty() {
        println!("{}", palette.dim("  No searches run"));
        return;
    }

    for (idx, run) in runs.iter().enumerate() {
        let label = palette.paint(format!("[{idx}]"), ansi::GRAY);
        match &run.result {
            Ok(found) => println!(
                "  {} {} {} {}",
                label,
                palette.bold(palette.paint(found.to_rfc3339(), ansi::GREEN)),
                palette.dim("│"),
                palette.paint(found.format("%A").to_string(), ansi::YELLOW),
            ),
            Err(err) => {
                println!("  {} {}", label, palette.paint(err.to_string(), ansi::RED));
                println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
                println!("  • The fields can never hold together (e.g. day 31 in February)");
                println!("  • The year field has no year left in the search direction");
                println!("  • The next match is more than {MAX_ITERATIONS} steps away");
                println!("\n{}", palette.dim("  Tip: Set CRONSEC_LOG=cronsec=trace to watch the search"));
            }
        }
    }
}

fn print_metrics<Tz: TimeZone>(runs: &[SearchRun<Tz>], palette: &ansi::Palette) {
    let total = runs.iter().fold(SearchMetrics::default(), |acc, run| combine(acc, &run.metrics));

    println!(
        "  Iterations: {}  │  Skipped: {}  │  DST gaps: {}",
        palette.paint(total.iterations.to_string(), ansi::GREEN),
        palette.paint(total.skipped_matches.to_string(), ansi::CYAN),
        palette.paint(total.skipped_gaps.to_string(), ansi::CYAN),
    );

    let steps = Position::PRIORITY
        .into_iter()
        .filter(|position| total.increments_for(*position) > 0)
        .map(|position| format!("{} {}", palette.dim(position.name()), total.increments_for(position)))
        .collect::<Vec<_>>();
    if steps.is_empty() {
        println!("  {}", palette.dim("No field steps"));
    } else {
        println!("  {} {}", palette.paint("Steps:", ansi::BLUE), steps.join("  "));
    }

    println!("  Total: {}", palette.paint(format!("{:?}", total.elapsed), ansi::GREEN));
}

fn combine(mut acc: SearchMetrics, metrics: &SearchMetrics) -> SearchMetrics {
    acc.elapsed += metrics.elapsed;
    acc.iterations += metrics.iterations;
    acc.skipped_matches += metrics.skipped_matches;
    acc.skipped_gaps += metrics.skipped_gaps;
    for (sum, count) in acc.increments.iter_mut().zip(metrics.increments) {
        *sum += count;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn combine_adds_every_counter() {
        let one = SearchMetrics {
            elapsed: Duration::from_millis(2),
            iterations: 10,
            increments: [1, 2, 3, 0, 0, 0, 0],
            skipped_matches: 1,
            skipped_gaps: 0,
        };
        let two = SearchMetrics {
            elapsed: Duration::from_millis(3),
            iterations: 5,
            increments: [0, 1, 0, 0, 0, 0, 4],
            skipped_matches: 0,
            skipped_gaps: 2,
        };

        let total = combine(combine(SearchMetrics::default(), &one), &two);
        assert_eq!(total.elapsed, Duration::from_millis(5));
        assert_eq!(total.iterations, 15);
        assert_eq!(total.increments, [1, 3, 3, 0, 0, 0, 4]);
        assert_eq!(total.skipped_matches, 1);
        assert_eq!(total.skipped_gaps, 2);
    }

    #[test]
    fn palette_is_transparent_when_disabled() {
        let palette = ansi::Palette::new(false);
        assert_eq!(palette.paint("x", ansi::RED), "x");
        assert_eq!(palette.bold("x"), "x");
        assert_eq!(palette.dim("x"), "x");
        assert_eq!(ansi::Palette::new(true).bold("x"), format!("{}x{}", ansi::BOLD, ansi::RESET));
    }
}
