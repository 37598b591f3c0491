//! Data model for the SMuFL source documents and the assembled glyph dictionary.
//!
//! Input structures mirror the JSON files as published by SMuFL
//! (`glyphnames.json`, a font's `metadata.json`) plus the optional
//! whitelist; output structures describe the dictionary handed to the
//! rendering library.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::codepoint::Codepoint;

/// Symbolic SMuFL glyph name, e.g. `gClef`.
pub type GlyphName = String;

/// Name-keyed identity table: `glyphnames.json`, or the flattened alternates.
pub type GlyphTable = BTreeMap<GlyphName, GlyphNameEntry>;

/// Alternate groups keyed by base glyph name.
pub type AlternateGroups = BTreeMap<GlyphName, AlternatesGroup>;

/// Named anchor points of one glyph (`stemUpSE`, `cutOutNW`, ...).
pub type Anchors = BTreeMap<String, Point>;

// ─── Inputs ──────────────────────────────────────────────────────────

/// One value of `glyphnames.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphNameEntry {
    /// `U+XXXX`, validated when the glyph enters the assembler
    pub codepoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_codepoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GlyphNameEntry {
    pub fn new(codepoint: impl Into<String>) -> Self {
        Self {
            codepoint: codepoint.into(),
            alternate_codepoint: None,
            description: None,
        }
    }
}

/// A point in staff spaces, stored by SMuFL as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point(pub f64, pub f64);

/// Glyph bounding box, north-east and south-west corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(rename = "bBoxNE")]
    pub ne: Point,
    #[serde(rename = "bBoxSW")]
    pub sw: Point,
}

/// One named alternate of a base glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternate {
    pub name: GlyphName,
    pub codepoint: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlternatesGroup {
    pub alternates: Vec<Alternate>,
}

/// A font's `metadata.json`. Sections not used by the assembler are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetadata {
    pub font_name: Option<String>,
    /// Usually a number (`1.39`), occasionally a string
    pub font_version: Option<Value>,
    pub engraving_defaults: Option<Value>,
    #[serde(rename = "glyphBBoxes")]
    pub glyph_bboxes: BTreeMap<GlyphName, BoundingBox>,
    #[serde(default)]
    pub glyphs_with_anchors: BTreeMap<GlyphName, Anchors>,
    #[serde(default)]
    pub glyphs_with_alternates: AlternateGroups,
}

/// Optional filter restricting which glyphs end up in the dictionary.
///
/// `None` means "no filtering" for that category; an empty set keeps nothing.
/// Each set is written either as an object whose keys are glyph names
/// (`{"gClef": 1}`) or as an array of names.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Whitelist {
    #[serde(default, deserialize_with = "name_set")]
    pub main_glyphes: Option<BTreeSet<GlyphName>>,
    #[serde(default, deserialize_with = "name_set")]
    pub alternate_glyphes: Option<BTreeSet<GlyphName>>,
}

fn name_set<'de, D>(deserializer: D) -> Result<Option<BTreeSet<GlyphName>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NameSet {
        List(Vec<GlyphName>),
        Keys(BTreeMap<GlyphName, serde::de::IgnoredAny>),
    }

    let set = Option::<NameSet>::deserialize(deserializer)?;
    Ok(set.map(|set| match set {
        NameSet::List(names) => names.into_iter().collect(),
        NameSet::Keys(keys) => keys.into_keys().collect(),
    }))
}

// ─── Output ──────────────────────────────────────────────────────────

/// JSON keys written by [`GlyphRecord`] itself.
const RECORD_FIELDS: [&str; 4] = ["codepoint", "bBoxNE", "bBoxSW", "path"];

/// One assembled glyph.
///
/// Bounding box and anchor fields are serialized directly on the glyph
/// object (`bBoxNE`, `stemUpSE`, ...), next to `codepoint` and `path`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphRecord {
    pub codepoint: Codepoint,
    #[serde(flatten)]
    pub bounding_box: Option<BoundingBox>,
    #[serde(flatten)]
    pub anchors: Option<Anchors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl GlyphRecord {
    pub fn new(codepoint: Codepoint) -> Self {
        Self {
            codepoint,
            bounding_box: None,
            anchors: None,
            path: None,
        }
    }

    pub fn merge_bounding_box(&mut self, bbox: &BoundingBox) {
        self.bounding_box = Some(*bbox);
    }

    /// Anchors already on the record are overwritten by same-named ones.
    ///
    /// Anchors named like one of the record's own fields would serialize
    /// as duplicate keys; they are left out and their names returned.
    pub fn merge_anchors(&mut self, anchors: &Anchors) -> Vec<String> {
        let mut skipped = Vec::new();
        for (name, point) in anchors {
            if RECORD_FIELDS.contains(&name.as_str()) {
                skipped.push(name.clone());
            } else {
                self.anchors
                    .get_or_insert_with(Anchors::new)
                    .insert(name.clone(), *point);
            }
        }
        skipped
    }
}

/// The assembled dictionary handed to the rendering library.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphDictionary {
    pub glyphs: BTreeMap<GlyphName, GlyphRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engraving_defaults: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_version: Option<Value>,
    /// Attributes of the SVG `font-face` element
    pub meta: BTreeMap<String, String>,
}
