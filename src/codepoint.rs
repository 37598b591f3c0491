//! Codepoint keys: the three notations a glyph identity shows up under.
//!
//! - `U+E050`: SMuFL metadata and `glyphnames.json` (canonical form)
//! - `uniE050`: SVG `glyph-name` attribute
//! - the literal character: SVG `unicode` attribute

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

const CANONICAL_PREFIX: &str = "U+";
const SVG_PREFIX: &str = "uni";

/// A codepoint in canonical `U+XXXX` form.
///
/// The hex digits are kept exactly as the source wrote them, so two
/// codepoints compare equal only when they are spelled the same way.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Codepoint(String);

impl Codepoint {
    /// Validate a `U+XXXX` string.
    pub fn parse(value: &str) -> Result<Self> {
        match value.strip_prefix(CANONICAL_PREFIX) {
            Some(hex) if is_hex(hex) => Ok(Self(value.to_string())),
            _ => Err(Error::MalformedCodepoint(value.to_string())),
        }
    }

    /// The scalar value of `ch` as uppercase hex, at least four digits.
    ///
    /// Works on the full scalar value, so characters outside the BMP
    /// (e.g. `U+1D11E`) never resolve to a surrogate half.
    pub fn from_char(ch: char) -> Self {
        Self(format!("{CANONICAL_PREFIX}{:04X}", ch as u32))
    }

    /// Codepoint of an SVG `unicode` attribute, if it holds exactly one character.
    pub fn from_unicode_attr(attr: &str) -> Option<Self> {
        let mut chars = attr.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(Self::from_char(ch)),
            _ => None,
        }
    }

    /// The SVG glyph-name spelling: `U+E050` → `uniE050`.
    pub fn to_svg_key(&self) -> String {
        format!("{SVG_PREFIX}{}", self.hex())
    }

    pub fn hex(&self) -> &str {
        &self.0[CANONICAL_PREFIX.len()..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Codepoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}
