//! A chart parser for context-sensitive grammars: Earley-style prediction,
//! scanning and completion, extended with left/right sibling
//! "expectations" and canonical-identity deduplication of derivation
//! matches.

mod bytes;
mod chart;
mod error;
mod external;
mod grammar;
mod interactions;
mod matches;
mod parser;
mod rule;

pub use error::GrammarError;
pub use external::ExternalId;
pub use grammar::{Grammar, GrammarBuilder};
pub use interactions::Side;
pub use matches::{CompleteMatch, ForwardMatch};
pub use parser::Parser;
pub use rule::{Expectation, Polarity};
