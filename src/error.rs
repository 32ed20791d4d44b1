use crate::Position;

/// Everything that can go wrong while building or evaluating an expression.
///
/// Errors are reported at the point of failure; an operation that fails
/// leaves the expression it was called on untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The text does not split into 6 or 7 fields.
    #[error("`{0}` is not a valid cron expression: expected 6 or 7 fields")]
    MalformedExpression(String),

    /// A field token failed its grammar.
    #[error("invalid value `{token}` for the {position} field (position {index})", index = .position.index())]
    InvalidField { position: Position, token: String },

    /// The bounded search ran out of iterations. This signals an expression
    /// that can never match, such as February 31st.
    #[error("no matching time found within {iterations} iterations")]
    NoMatchFound { iterations: usize },

    #[error("{0} is not a valid field position")]
    InvalidPosition(usize),

    #[error("unknown field name `{0}`")]
    UnknownPosition(String),

    /// A reference time given as text could not be understood.
    #[error("invalid reference time `{input}`: {reason}")]
    InvalidReference { input: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_field_names_position_and_token() {
        let err = Error::InvalidField { position: Position::Second, token: "99".to_string() };
        assert_eq!(err.to_string(), "invalid value `99` for the second field (position 0)");
    }

    #[test]
    fn no_match_reports_iteration_budget() {
        let err = Error::NoMatchFound { iterations: 1000 };
        assert_eq!(err.to_string(), "no matching time found within 1000 iterations");
    }
}
