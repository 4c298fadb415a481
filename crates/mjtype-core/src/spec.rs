//! # Specification Parser
//!
//! Parses the compact grammar that declares a unit type:
//!
//! ```text
//! unit(<token>[,<token>...]){<min>[,<max>]}
//! ```
//!
//! The unit list is taken from the first non-empty `(...)` group and the
//! multiplicity from the first non-empty `{...}` group. Tokens are trimmed
//! and otherwise opaque; the parser never judges whether `px` or `%` is a
//! real CSS unit.
//!
//! Parsing is the only place where a specification can fail. Everything
//! downstream (matcher compilation aside) works on a [`TypeSpecification`]
//! whose invariants already hold:
//!
//! - `units` is non-empty and holds distinct, non-empty tokens.
//! - `1 <= multiplicity.min <= multiplicity.max`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpecificationError;

/// Prefix shared by every specification of the unit type family.
pub const UNIT_TYPE_PREFIX: &str = "unit(";

/// Returns true if `spec` declares a unit type.
///
/// The check is ASCII case-insensitive on the `unit(` prefix and requires a
/// closing parenthesis on the same line. It is a pure predicate: it keeps no
/// match state between calls.
pub fn is_unit_specification(spec: &str) -> bool {
    let first_line = spec.lines().next().unwrap_or("");
    first_line.len() >= UNIT_TYPE_PREFIX.len()
        && first_line.is_char_boundary(UNIT_TYPE_PREFIX.len())
        && first_line[..UNIT_TYPE_PREFIX.len()].eq_ignore_ascii_case(UNIT_TYPE_PREFIX)
        && first_line[UNIT_TYPE_PREFIX.len()..].contains(')')
}

/// Characters a unit token may not contain.
pub const RESERVED_UNIT_CHARACTERS: &[char] = &['(', '{', '}'];

/// Closed range of accepted value counts.
///
/// Deserialisation goes through [`Multiplicity::checked`], so `{min: 0}` or
/// inverted bounds are rejected the same way the parser rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMultiplicity")]
pub struct Multiplicity {
    /// Fewest space-joined values accepted.
    pub min: u32,
    /// Most space-joined values accepted.
    pub max: u32,
}

#[derive(Deserialize)]
struct RawMultiplicity {
    min: u32,
    max: u32,
}

impl TryFrom<RawMultiplicity> for Multiplicity {
    type Error = SpecificationError;

    fn try_from(raw: RawMultiplicity) -> Result<Self, Self::Error> {
        let spec = format!("{{{},{}}}", raw.min, raw.max);
        Self::checked(&spec, raw.min, raw.max)
    }
}

impl Multiplicity {
    /// A range holding `1 <= min <= max`. `spec` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`SpecificationError::ZeroMinimum`] or
    /// [`SpecificationError::InvertedBounds`].
    pub fn checked(spec: &str, min: u32, max: u32) -> Result<Self, SpecificationError> {
        if min == 0 {
            return Err(SpecificationError::ZeroMinimum {
                spec: spec.to_string(),
            });
        }
        if min > max {
            return Err(SpecificationError::InvertedBounds {
                spec: spec.to_string(),
                min,
                max,
            });
        }
        Ok(Self { min, max })
    }

    /// Exactly `n` values.
    pub fn exactly(n: u32) -> Self {
        Self { min: n, max: n }
    }

    /// Whether `count` lies inside the range.
    pub fn contains(&self, count: u32) -> bool {
        (self.min..=self.max).contains(&count)
    }

    /// Whether the range admits a single count.
    pub fn is_exact(&self) -> bool {
        self.min == self.max
    }
}

impl Default for Multiplicity {
    fn default() -> Self {
        Self::exactly(1)
    }
}

impl fmt::Display for Multiplicity {
    /// Human form used in diagnostics: `1 to 4`, or `2` when exact.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exact() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} to {}", self.min, self.max)
        }
    }
}

/// A parsed unit type declaration.
///
/// Serialises as its canonical specification string, so schema documents
/// can carry `"unit(px,%){1,4}"` directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeSpecification {
    units: Vec<String>,
    multiplicity: Multiplicity,
}

impl TypeSpecification {
    /// Parse a specification string.
    ///
    /// # Errors
    ///
    /// - [`SpecificationError::MissingUnitList`] if there is no non-empty
    ///   `(...)` group.
    /// - [`SpecificationError::EmptyUnitToken`] if a token trims to nothing.
    /// - [`SpecificationError::ReservedCharacter`] if a token contains `(`,
    ///   `{` or `}`.
    /// - [`SpecificationError::InvalidMultiplicity`],
    ///   [`SpecificationError::ZeroMinimum`] or
    ///   [`SpecificationError::InvertedBounds`] for a bad `{...}` group.
    pub fn parse(spec: &str) -> Result<Self, SpecificationError> {
        let unit_list =
            first_group(spec, '(', ')').ok_or_else(|| SpecificationError::MissingUnitList {
                spec: spec.to_string(),
            })?;

        let mut units: Vec<String> = Vec::new();
        for token in unit_list.split(',').map(str::trim) {
            if token.is_empty() {
                return Err(SpecificationError::EmptyUnitToken {
                    spec: spec.to_string(),
                });
            }
            let reserved = token.chars().find(|c| RESERVED_UNIT_CHARACTERS.contains(c));
            if let Some(character) = reserved {
                return Err(SpecificationError::ReservedCharacter {
                    spec: spec.to_string(),
                    token: token.to_string(),
                    character,
                });
            }
            if !units.iter().any(|u| u == token) {
                units.push(token.to_string());
            }
        }

        let multiplicity = match first_group(spec, '{', '}') {
            Some(raw) => parse_multiplicity(spec, raw)?,
            None => Multiplicity::default(),
        };

        Ok(Self {
            units,
            multiplicity,
        })
    }

    /// Accepted unit tokens, in declaration order.
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Accepted value-count range.
    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }
}

impl FromStr for TypeSpecification {
    type Err = SpecificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeSpecification {
    type Error = SpecificationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TypeSpecification> for String {
    fn from(spec: TypeSpecification) -> Self {
        spec.to_string()
    }
}

impl fmt::Display for TypeSpecification {
    /// Canonical form: `unit(px,em){1,4}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{UNIT_TYPE_PREFIX}{}){{{},{}}}",
            self.units.join(","),
            self.multiplicity.min,
            self.multiplicity.max
        )
    }
}

/// Contents of the leftmost `open ... close` group with at least one
/// character between the delimiters.
fn first_group(spec: &str, open: char, close: char) -> Option<&str> {
    spec.match_indices(open).find_map(|(start, _)| {
        let body = &spec[start + open.len_utf8()..];
        let end = body.find(close)?;
        (end > 0).then(|| &body[..end])
    })
}

fn parse_multiplicity(spec: &str, raw: &str) -> Result<Multiplicity, SpecificationError> {
    let invalid = |reason: String| SpecificationError::InvalidMultiplicity {
        spec: spec.to_string(),
        raw: raw.to_string(),
        reason,
    };

    let bounds: Vec<u32> = raw
        .split(',')
        .map(|part| {
            let part = part.trim();
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(format!("{part:?} is not a count")));
            }
            part.parse::<u32>()
                .map_err(|e| invalid(format!("{part:?} is not a count: {e}")))
        })
        .collect::<Result<_, _>>()?;

    match bounds.as_slice() {
        [n] => Multiplicity::checked(spec, *n, *n),
        [min, max] => Multiplicity::checked(spec, *min, *max),
        _ => Err(invalid(format!(
            "expected one or two counts, found {}",
            bounds.len()
        ))),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Tokens built from characters the grammar leaves opaque.
    fn unit_token() -> impl Strategy<Value = String> {
        "[a-zA-Z%.#!*+?$^|\\[\\]-]{1,4}"
    }

    proptest! {
        /// Any accepted specification survives a trip through its canonical form.
        #[test]
        fn canonical_form_parses_back(
            units in prop::collection::vec(unit_token(), 1..5),
            min in 1u32..6,
            span in 0u32..6,
        ) {
            let source = format!("unit({}){{{},{}}}", units.join(","), min, min + span);
            let spec = TypeSpecification::parse(&source).unwrap();
            let reparsed = TypeSpecification::parse(&spec.to_string());
            prop_assert_eq!(reparsed, Ok(spec.clone()));

            let json = serde_json::to_string(&spec).unwrap();
            let back: TypeSpecification = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, spec);
        }

        /// Whatever `parse` accepts, its canonical form is accepted too.
        #[test]
        fn arbitrary_accepted_input_round_trips(source in "unit\\([^)]{1,12}\\)(\\{[0-9, +]{1,5}\\})?") {
            if let Ok(spec) = TypeSpecification::parse(&source) {
                prop_assert_eq!(TypeSpecification::parse(&spec.to_string()), Ok(spec));
            }
        }
    }
}
