//! Construction-time error type for malformed grammars.

use std::fmt;

#[derive(Debug)]
pub enum GrammarError {
    /// A terminal rule's pattern failed to compile as a regular expression.
    BadPattern {
        external: String,
        source: regex::Error,
    },
    /// A substitution rule was given an empty body.
    EmptyBody { external: String },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::BadPattern { external, source } => {
                write!(f, "terminal rule `{external}` has an invalid pattern: {source}")
            }
            GrammarError::EmptyBody { external } => {
                write!(f, "substitution rule `{external}` has an empty body")
            }
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GrammarError::BadPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}
