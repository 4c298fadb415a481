//! # Matcher Compiler
//!
//! Turns a [`TypeSpecification`] into an anchored pattern over the whole
//! input:
//!
//! ```text
//! ^(?:[0-9]+(?:<u1>|<u2>|...) ?){min,max}$
//! ```
//!
//! Case-insensitivity is spelled out per letter (`px` becomes `[pP][xX]`)
//! rather than through the engine's case-folding flag, which folds Unicode
//! too and would let `ſ` stand in for `s` or the Kelvin sign for `k`.
//!
//! Each repetition is one number, one unit token and an optional single
//! trailing space, which admits shorthand values such as
//! `"10px 5px 2px 8px"`. Unit tokens are escaped before they enter the
//! alternation so `%` or `.` match themselves. Matching runs in single-line
//! mode: `^` and `$` anchor the whole string, never a line inside it.
//!
//! The `regex` crate compiles to finite automata, so matching is linear in
//! the input length.

use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use crate::error::SpecificationError;
use crate::spec::TypeSpecification;

/// A compiled, immutable matcher for one specification.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    regex: Regex,
}

impl CompiledMatcher {
    /// Compile the matcher for `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecificationError::Compile`] if the engine rejects the
    /// pattern, typically because the repetition bound is too large.
    pub fn compile(spec: &TypeSpecification) -> Result<Self, SpecificationError> {
        let pattern = build_pattern(spec);
        let regex = RegexBuilder::new(&pattern)
            .multi_line(false)
            .build()
            .map_err(|e| SpecificationError::Compile {
                spec: spec.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(spec = %spec, pattern = %pattern, "compiled unit matcher");
        Ok(Self { regex })
    }

    /// Whether `value` matches in its entirety.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// The generated pattern source.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Matchers that must all accept a value (logical AND).
///
/// Cloning is cheap: the matchers are shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct MatcherSet {
    matchers: Arc<[CompiledMatcher]>,
}

impl MatcherSet {
    /// A set holding a single matcher.
    pub fn single(matcher: CompiledMatcher) -> Self {
        Self {
            matchers: Arc::from(vec![matcher]),
        }
    }

    /// The union of both sets' constraints.
    pub fn and(&self, other: &MatcherSet) -> Self {
        let matchers: Vec<CompiledMatcher> = self
            .matchers
            .iter()
            .chain(other.matchers.iter())
            .cloned()
            .collect();
        Self {
            matchers: Arc::from(matchers),
        }
    }

    /// True iff every matcher accepts `value`.
    pub fn accepts(&self, value: &str) -> bool {
        self.matchers.iter().all(|m| m.is_match(value))
    }

    /// Number of matchers in the set.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Returns true if the set holds no matchers.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Iterate over the member matchers.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledMatcher> {
        self.matchers.iter()
    }
}

fn build_pattern(spec: &TypeSpecification) -> String {
    let alternation = spec
        .units()
        .iter()
        .map(|u| ascii_case_insensitive(u))
        .collect::<Vec<_>>()
        .join("|");
    let m = spec.multiplicity();
    format!("^(?:[0-9]+(?:{alternation}) ?){{{},{}}}$", m.min, m.max)
}

/// Literal pattern for `token` in which ASCII letters match either case.
fn ascii_case_insensitive(token: &str) -> String {
    let mut pattern = String::with_capacity(token.len() * 4);
    let mut buf = [0u8; 4];
    for c in token.chars() {
        if c.is_ascii_alphabetic() {
            pattern.push('[');
            pattern.push(c.to_ascii_lowercase());
            pattern.push(c.to_ascii_uppercase());
            pattern.push(']');
        } else {
            pattern.push_str(&regex::escape(c.encode_utf8(&mut buf)));
        }
    }
    pattern
}
