use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone};

use crate::api::{Context, Options, is_due_with, next_match_with, previous_match_with};
use crate::field::{DEFAULT_REGISTRY, FieldRegistry, FieldSet};
use crate::{Error, Position, Result};

/// Shorthands accepted in place of a full expression. The name must be the
/// whole input, case included.
const MACROS: [(&str, &str); 7] = [
    ("@yearly", "0 0 0 1 1 *"),
    ("@annually", "0 0 0 1 1 *"),
    ("@monthly", "0 0 0 1 * *"),
    ("@weekly", "0 0 0 * * 0"),
    ("@daily", "0 0 0 * * *"),
    ("@hourly", "0 0 * * * *"),
    ("@minutely", "0 * * * * *"),
];

/// A validated cron expression: six fields (second through day-of-week) or
/// seven (with year).
///
/// Every stored token has passed its field's grammar. Mutation goes through
/// [`Expression::set_expression`] and [`Expression::set_field`], which
/// validate before they commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    parts: Vec<String>,
}

impl Expression {
    /// Parse `text`, expanding a macro name such as `@daily` first.
    ///
    /// # Example
    /// ```
    /// use cronsec::{Expression, Position};
    ///
    /// let expr = Expression::parse("@hourly").unwrap();
    /// assert_eq!(expr.to_string(), "0 0 * * * *");
    /// assert_eq!(expr.get_field(Position::Minute), Some("0"));
    /// assert_eq!(expr.get_field(Position::Year), None);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &DEFAULT_REGISTRY)
    }

    /// Parse `text`, validating tokens against `registry`.
    pub fn parse_with(text: &str, registry: &FieldRegistry) -> Result<Self> {
        Ok(Self { parts: tokenize(text, registry)? })
    }

    /// Replace the whole expression. On error `self` is left unchanged.
    pub fn set_expression(&mut self, text: &str) -> Result<()> {
        self.parts = tokenize(text, &DEFAULT_REGISTRY)?;
        Ok(())
    }

    /// Replace a single field. Setting the year of a six-field expression
    /// appends it. On error `self` is left unchanged.
    pub fn set_field(&mut self, position: Position, token: &str) -> Result<()> {
        if !DEFAULT_REGISTRY.get(position).validate(token) {
            return Err(Error::InvalidField { position, token: token.to_string() });
        }

        match self.parts.get_mut(position.index()) {
            Some(slot) => *slot = token.to_string(),
            None => self.parts.push(token.to_string()),
        }
        Ok(())
    }

    /// The token at `position`, or `None` for an absent year.
    pub fn get_field(&self, position: Position) -> Option<&str> {
        self.parts.get(position.index()).map(String::as_str)
    }

    /// Tokens in storage order.
    pub fn fields(&self) -> &[String] {
        &self.parts
    }

    /// The expression text, tokens joined with single spaces.
    pub fn full(&self) -> String {
        self.parts.join(" ")
    }

    /// Positions holding anything other than a bare wildcard.
    pub fn restricted_fields(&self) -> FieldSet {
        Position::ALL
            .into_iter()
            .filter(|p| self.get_field(*p).is_some_and(|token| token != "*" && token != "?"))
            .fold(FieldSet::empty(), |set, p| set | FieldSet::of(p))
    }

    // --- Search --------------------------------------------------------------

    /// The `skip`-th match after `from`. With `include_reference`, `from`
    /// itself counts if it matches.
    pub fn next_match<Tz: TimeZone>(
        &self,
        from: &DateTime<Tz>,
        skip: u32,
        include_reference: bool,
    ) -> Result<DateTime<Tz>> {
        next_match_with(self, &Context::new(from.clone()), &Options::default(), skip, include_reference)
    }

    /// The `skip`-th match before `from`.
    pub fn previous_match<Tz: TimeZone>(
        &self,
        from: &DateTime<Tz>,
        skip: u32,
        include_reference: bool,
    ) -> Result<DateTime<Tz>> {
        previous_match_with(self, &Context::new(from.clone()), &Options::default(), skip, include_reference)
    }

    /// Whether `at` (truncated to whole seconds) is itself a match.
    pub fn is_due<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> bool {
        is_due_with(self, &Context::new(at.clone()), &Options::default())
    }

    pub fn is_due_now(&self) -> bool {
        self.is_due(&Local::now())
    }

    pub fn next_match_now(&self) -> Result<DateTime<Local>> {
        self.next_match(&Local::now(), 0, false)
    }

    pub fn previous_match_now(&self) -> Result<DateTime<Local>> {
        self.previous_match(&Local::now(), 0, false)
    }

    /// `count` consecutive matches starting from `from`, in search direction.
    pub fn next_matches<Tz: TimeZone>(
        &self,
        from: &DateTime<Tz>,
        count: usize,
        invert: bool,
        include_reference: bool,
    ) -> Result<Vec<DateTime<Tz>>> {
        let mut found = Vec::with_capacity(count);
        let mut cursor = from.clone();
        let mut include = include_reference;
        for _ in 0..count {
            let next = if invert {
                self.previous_match(&cursor, 0, include)?
            } else {
                self.next_match(&cursor, 0, include)?
            };
            include = false;
            cursor = next.clone();
            found.push(next);
        }
        Ok(found)
    }

    /// Lazy iterator over matches after `from`.
    pub fn upcoming<Tz: TimeZone>(&self, from: &DateTime<Tz>) -> Matches<'_, Tz> {
        Matches { expression: self, cursor: Some(from.clone()), invert: false }
    }

    /// Lazy iterator over matches before `from`, most recent first.
    pub fn preceding<Tz: TimeZone>(&self, from: &DateTime<Tz>) -> Matches<'_, Tz> {
        Matches { expression: self, cursor: Some(from.clone()), invert: true }
    }
}

fn tokenize(text: &str, registry: &FieldRegistry) -> Result<Vec<String>> {
    let text = MACROS.iter().find(|(name, _)| *name == text).map_or(text, |(_, expansion)| *expansion);

    let parts: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    if !(6..=7).contains(&parts.len()) {
        return Err(Error::MalformedExpression(text.to_string()));
    }

    for (index, token) in parts.iter().enumerate() {
        let position = Position::try_from(index)?;
        if !registry.get(position).validate(token) {
            return Err(Error::InvalidField { position, token: token.clone() });
        }
    }
    Ok(parts)
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full())
    }
}

impl FromStr for Expression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Expression {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator returned by [`Expression::upcoming`] and [`Expression::preceding`].
///
/// Ends after the first failed search (an unsatisfiable expression or one
/// that ran past its last year).
#[derive(Debug, Clone)]
pub struct Matches<'a, Tz: TimeZone> {
    expression: &'a Expression,
    cursor: Option<DateTime<Tz>>,
    invert: bool,
}

impl<Tz: TimeZone> Iterator for Matches<'_, Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let from = self.cursor.take()?;
        let found = if self.invert {
            self.expression.previous_match(&from, 0, false)
        } else {
            self.expression.next_match(&from, 0, false)
        };
        let found = found.ok()?;
        self.cursor = Some(found.clone());
        Some(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_and_seven_fields() {
        let six = Expression::parse("0 30 * * * *").unwrap();
        assert_eq!(six.fields().len(), 6);
        assert_eq!(six.get_field(Position::Minute), Some("30"));
        assert_eq!(six.get_field(Position::Year), None);

        let seven = Expression::parse("0 0 12 1 JAN MON-FRI 2030").unwrap();
        assert_eq!(seven.get_field(Position::Year), Some("2030"));
        assert_eq!(seven.get_field(Position::Weekday), Some("MON-FRI"));
    }

    #[test]
    fn arbitrary_whitespace_separates_fields() {
        let expr = Expression::parse("  0\t30   *\n* * *  ").unwrap();
        assert_eq!(expr.full(), "0 30 * * * *");
    }

    #[test]
    fn too_few_or_too_many_fields_is_malformed() {
        assert!(matches!(Expression::parse("* * * * *"), Err(Error::MalformedExpression(_))));
        assert!(matches!(Expression::parse(""), Err(Error::MalformedExpression(_))));
        assert!(matches!(Expression::parse("* * * * * * * *"), Err(Error::MalformedExpression(_))));
    }

    #[test]
    fn invalid_token_names_its_position() {
        let err = Expression::parse("99 * * * * *").unwrap_err();
        assert_eq!(err, Error::InvalidField { position: Position::Second, token: "99".to_string() });

        let err = Expression::parse("0 0 0 * 13 *").unwrap_err();
        assert_eq!(err, Error::InvalidField { position: Position::Month, token: "13".to_string() });

        // `?` is only a placeholder for the two day fields.
        let err = Expression::parse("? ? ? * * *").unwrap_err();
        assert_eq!(err, Error::InvalidField { position: Position::Second, token: "?".to_string() });
        assert!(Expression::parse("0 0 0 ? * MON").is_ok());
    }

    #[test]
    fn macros_expand_to_six_fields() {
        let cases = [
            ("@yearly", "0 0 0 1 1 *"),
            ("@annually", "0 0 0 1 1 *"),
            ("@monthly", "0 0 0 1 * *"),
            ("@weekly", "0 0 0 * * 0"),
            ("@daily", "0 0 0 * * *"),
            ("@hourly", "0 0 * * * *"),
            ("@minutely", "0 * * * * *"),
        ];
        for (name, expansion) in cases {
            assert_eq!(Expression::parse(name).unwrap().full(), expansion, "{name}");
        }

        let hourly = Expression::parse("@hourly").unwrap();
        assert_eq!(hourly.fields(), ["0", "0", "*", "*", "*", "*"]);
    }

    #[test]
    fn macro_names_are_case_sensitive() {
        assert!(Expression::parse("@Daily").is_err());
        assert!(Expression::parse("@daily 2024").is_err());
    }

    #[test]
    fn set_field_validates_and_keeps_old_value_on_error() {
        let mut expr = Expression::parse("0 * * * * *").unwrap();
        expr.set_field(Position::Hour, "9-17").unwrap();
        assert_eq!(expr.get_field(Position::Hour), Some("9-17"));

        let err = expr.set_field(Position::Hour, "25").unwrap_err();
        assert_eq!(err, Error::InvalidField { position: Position::Hour, token: "25".to_string() });
        assert_eq!(expr.get_field(Position::Hour), Some("9-17"));
    }

    #[test]
    fn set_field_year_appends_to_six_fields() {
        let mut expr = Expression::parse("0 0 0 1 1 *").unwrap();
        expr.set_field(Position::Year, "2030").unwrap();
        assert_eq!(expr.full(), "0 0 0 1 1 * 2030");
    }

    #[test]
    fn set_expression_is_atomic() {
        let mut expr = Expression::parse("0 30 * * * *").unwrap();
        assert!(expr.set_expression("0 30 * * * 9").is_err());
        assert_eq!(expr.full(), "0 30 * * * *");

        expr.set_expression("@daily").unwrap();
        assert_eq!(expr.full(), "0 0 0 * * *");
    }

    #[test]
    fn full_text_round_trips() {
        for text in ["0 30 * * * *", "*/5 0-10,20 9-17 L JAN-MAR MON#1 2024-2030", "0 0 0 15W * ? *"] {
            let expr = Expression::parse(text).unwrap();
            let mut again = Expression::parse("* * * * * *").unwrap();
            again.set_expression(&expr.full()).unwrap();
            assert_eq!(again.fields(), expr.fields());
            assert_eq!(again, expr);
        }
    }

    #[test]
    fn restricted_fields_skip_wildcards() {
        let expr = Expression::parse("0 30 * 1 * ?").unwrap();
        assert_eq!(expr.restricted_fields(), FieldSet::SECOND | FieldSet::MINUTE | FieldSet::DAY);
    }

    #[test]
    fn from_str_and_display_agree() {
        let expr: Expression = "0 15 10 * * *".parse().unwrap();
        assert_eq!(expr.to_string(), "0 15 10 * * *");
        assert!(Expression::try_from("nope").is_err());
    }
}
