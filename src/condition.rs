//! Classification of `<PropertyGroup Condition="…">` attributes.
//!
//! Lookups only act on one condition shape, the per-build selector that
//! Visual Studio writes:
//!
//! ```text
//! '$(Configuration)|$(Platform)' == 'Debug|AnyCPU'
//! ```
//!
//! The selector is recognized with a [`chumsky`] parser.  Whitespace around
//! the operands and the `==` operator is ignored; anything else (compound
//! `and`/`or` expressions, `!=`, `Exists(…)`, a different variable order) is
//! [`ProjectCondition::Unrecognized`] and never selected.

use chumsky::prelude::*;
use tracing::debug;

/// Left-hand operand of the recognized selector, quotes included.
const SELECTOR: &str = "'$(Configuration)|$(Platform)'";

/// The condition on a `<PropertyGroup>`, reduced to the shapes a lookup
/// can act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectCondition {
    /// No `Condition` attribute.
    Unconditioned,
    /// `'$(Configuration)|$(Platform)' == '<literal>'`.
    ///
    /// The literal is taken verbatim and may not contain a `$(` property
    /// reference; such conditions are [`Unrecognized`](Self::Unrecognized).
    ConfigurationPlatformEquals(String),
    /// Any other condition.  Never selected.
    Unrecognized,
}

impl ProjectCondition {
    /// Classify the value of a `Condition` attribute (`None` when the
    /// attribute is absent).
    pub fn parse(condition: Option<&str>) -> Self {
        let Some(raw) = condition else {
            return Self::Unconditioned;
        };

        match selector_literal(raw) {
            Some(literal) => Self::ConfigurationPlatformEquals(literal.to_string()),
            None => {
                debug!("Ignoring unsupported condition {:?}", raw);
                Self::Unrecognized
            }
        }
    }

    /// Whether this condition selects the `"{configuration}|{platform}"` key.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::ConfigurationPlatformEquals(literal) => literal == key,
            Self::Unconditioned | Self::Unrecognized => false,
        }
    }
}

/// `SELECTOR == 'literal'`, yielding the text between the right-hand quotes.
fn selector_parser<'a>() -> impl Parser<'a, &'a str, &'a str, extra::Err<Simple<'a, char>>> {
    let literal = just('\'')
        .ignore_then(none_of('\'').repeated().to_slice())
        .then_ignore(just('\''));

    just(SELECTOR)
        .padded()
        .ignore_then(just("==").padded())
        .ignore_then(literal.padded())
        .then_ignore(end())
}

fn selector_literal(raw: &str) -> Option<&str> {
    selector_parser()
        .parse(raw)
        .into_result()
        .ok()
        .filter(|literal| !literal.contains("$("))
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════════
