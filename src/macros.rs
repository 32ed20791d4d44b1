/// Compile a regex literal once and hand out a `&'static Regex`.
///
/// Field grammars call this inside hot paths (`is_satisfied_by` runs once per
/// list element per search iteration), so the pattern must never be rebuilt.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Capture group `$idx` of `$caps` parsed as a `u32`.
#[macro_export]
macro_rules! capture_u32 {
    ($caps:expr, $idx:expr) => {
        $caps.get($idx).and_then(|m| m.as_str().parse::<u32>().ok())
    };
}
