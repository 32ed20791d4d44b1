//! The list-element grammar shared by every unit.
//!
//! A list element is one of:
//!
//! ```text
//! *               any value
//! v               a single value
//! a-b             inclusive range, wrapping through the maximum when b < a
//! */n             every value divisible by n (same as 0/n)
//! a/n  a-b/n      every n-th value of the range, counted from its start
//! ```
//!
//! Values are decimal numbers or (for month and weekday) three-letter names.
//! The `?` placeholder belongs to the day fields and is handled there.

/// The legal values of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    pub min: u32,
    pub max: u32,
    /// Whether ranges may wrap (`22-2` on hours). Years never do.
    pub cyclic: bool,
}

impl Domain {
    pub const fn cyclic(min: u32, max: u32) -> Self {
        Self { min, max, cyclic: true }
    }

    pub const fn linear(min: u32, max: u32) -> Self {
        Self { min, max, cyclic: false }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn span(&self) -> u32 {
        self.max - self.min + 1
    }

    /// Largest usable step: `*/n` counts from zero, so years allow steps up to the maximum.
    fn max_step(&self) -> u32 {
        self.span().max(self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom {
    Any,
    Value(u32),
    Range { start: u32, end: u32 },
    Step { start: u32, end: u32, step: u32 },
}

impl Atom {
    /// Parse one list element. `names` maps upper-case symbolic names to values.
    pub fn parse(part: &str, domain: Domain, names: &[(&str, u32)]) -> Option<Atom> {
        let caps = regex!(r"^(?:(\*)|([0-9A-Za-z]+)(?:-([0-9A-Za-z]+))?)(?:/([0-9]+))?$").captures(part)?;

        let step = match caps.get(4) {
            Some(m) => Some(m.as_str().parse::<u32>().ok().filter(|s| (1..=domain.max_step()).contains(s))?),
            None => None,
        };

        if caps.get(1).is_some() {
            return Some(match step {
                Some(step) => Atom::Step { start: 0, end: domain.max, step },
                None => Atom::Any,
            });
        }

        let start = lookup(caps.get(2)?.as_str(), domain, names)?;
        let end = match caps.get(3) {
            Some(m) => Some(lookup(m.as_str(), domain, names)?),
            None => None,
        };
        if end.is_some_and(|end| end < start && !domain.cyclic) {
            return None;
        }

        Some(match (end, step) {
            (None, None) => Atom::Value(start),
            (Some(end), None) => Atom::Range { start, end },
            (None, Some(step)) => Atom::Step { start, end: domain.max, step },
            (Some(end), Some(step)) => Atom::Step { start, end, step },
        })
    }

    pub fn matches(&self, value: u32, domain: Domain) -> bool {
        match *self {
            Atom::Any => true,
            Atom::Value(v) => v == value,
            Atom::Range { start, end } => offset_in_range(start, end, value, domain).is_some(),
            Atom::Step { start, end, step } => {
                offset_in_range(start, end, value, domain).is_some_and(|offset| offset % step == 0)
            }
        }
    }
}

/// Parse `part` and test `value` against it in one go. Malformed parts never match.
pub fn part_matches(part: &str, value: u32, domain: Domain, names: &[(&str, u32)]) -> bool {
    Atom::parse(part, domain, names).is_some_and(|atom| atom.matches(value, domain))
}

/// Resolve a single value: a decimal inside the domain or a known name.
pub fn lookup(text: &str, domain: Domain, names: &[(&str, u32)]) -> Option<u32> {
    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse::<u32>().ok().filter(|v| domain.contains(*v));
    }

    let upper = text.to_ascii_uppercase();
    names.iter().find(|(name, _)| *name == upper).map(|(_, v)| *v)
}

/// Distance walked upwards from `start` to reach `value`, if `value` lies in
/// `start..=end`. A reversed range wraps from `domain.max` to `domain.min`.
fn offset_in_range(start: u32, end: u32, value: u32, domain: Domain) -> Option<u32> {
    if start <= end {
        return (start..=end).contains(&value).then(|| value - start);
    }
    if value >= start && value <= domain.max {
        Some(value - start)
    } else if value >= domain.min && value <= end {
        Some(domain.max - start + 1 + value - domain.min)
    } else {
        None
    }
}
