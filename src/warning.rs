//! Per-glyph problems. Each one drops a single glyph and the run goes on.

use std::fmt;

use log::warn;

use crate::codepoint::Codepoint;
use crate::model::GlyphName;
use crate::path::PathError;

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// An alternate shares its name with a main glyph and replaced it.
    AlternateOverridesMain { glyph: GlyphName },
    /// No `glyphBBoxes` entry; the font build does not support the glyph.
    MissingBoundingBox { glyph: GlyphName },
    /// A whitelisted alternate is not among the font's alternates.
    UnknownWhitelistedAlternate { glyph: GlyphName },
    /// Neither SVG index knows the glyph's codepoint.
    MissingPath { glyph: GlyphName, codepoint: Codepoint },
    /// Path data was found but cannot be used.
    UnusablePath { glyph: GlyphName, error: PathError },
    /// An anchor shares its name with a glyph record field and was left out.
    ReservedAnchorName { glyph: GlyphName, anchor: String },
}

impl Warning {
    pub fn glyph(&self) -> &str {
        match self {
            Warning::AlternateOverridesMain { glyph }
            | Warning::MissingBoundingBox { glyph }
            | Warning::UnknownWhitelistedAlternate { glyph }
            | Warning::MissingPath { glyph, .. }
            | Warning::UnusablePath { glyph, .. }
            | Warning::ReservedAnchorName { glyph, .. } => glyph,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::AlternateOverridesMain { glyph } => write!(
                f,
                "the alternate glyph {{{glyph}}} replaces the main glyph of the same name"
            ),
            Warning::MissingBoundingBox { glyph } => write!(
                f,
                "glyph name {{{glyph}}} is not present inside the `glyphBBoxes` meta-data section"
            ),
            Warning::UnknownWhitelistedAlternate { glyph } => write!(
                f,
                "the alternate glyph {{{glyph}}} from the white list is not in the font metadata"
            ),
            Warning::MissingPath { glyph, codepoint } => write!(
                f,
                "the glyph {{{glyph}[{codepoint}]}} does not appear in the svg file"
            ),
            Warning::UnusablePath { glyph, error } => {
                write!(f, "the path of glyph {{{glyph}}} is unusable: {error}")
            }
            Warning::ReservedAnchorName { glyph, anchor } => write!(
                f,
                "the anchor {{{anchor}}} of glyph {{{glyph}}} clashes with a glyph field"
            ),
        }
    }
}

/// Collects warnings, logging each one as it arrives.
#[derive(Debug, Default)]
pub struct Warnings(Vec<Warning>);

impl Warnings {
    pub fn push(&mut self, warning: Warning) {
        warn!("{warning}");
        self.0.push(warning);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.0
    }
}
