//! Glyph assembler: merges the identity tables, layers in metadata and
//! resolves every glyph's outline from the SVG font.
//!
//! Structural problems (bad codepoints, a document that is not a music
//! font) abort the run. Problems with a single glyph drop that glyph,
//! record a [`Warning`] and carry on.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::codepoint::Codepoint;
use crate::error::{Error, Result};
use crate::model::{FontMetadata, GlyphDictionary, GlyphName, GlyphRecord, GlyphTable};
use crate::path::{transcode_str, PathError, PathTransform};
use crate::svg::{SvgDocument, SvgFont, SvgIndex};
use crate::warning::{Warning, Warnings};

/// How the assembler treats path data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AssembleOptions {
    /// Store transcoded paths instead of the raw `d` attribute.
    pub transcode: Option<PathTransform>,
}

/// A finished dictionary and everything that was dropped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub dictionary: GlyphDictionary,
    pub warnings: Vec<Warning>,
}

type GlyphMap = BTreeMap<GlyphName, GlyphRecord>;

/// Assemble the glyph dictionary from already filtered identity tables.
pub fn assemble(
    main_glyphes: GlyphTable,
    alternate_glyphes: GlyphTable,
    metadata: &FontMetadata,
    svg: &SvgDocument,
    options: &AssembleOptions,
    warnings: &mut Warnings,
) -> Result<GlyphDictionary> {
    let mut glyphs = merge_identities(main_glyphes, alternate_glyphes, warnings)?;
    debug!("{} glyphs before metadata", glyphs.len());

    info!("[FILL-METADATA]");
    fill_metadata(&mut glyphs, metadata, warnings);

    info!("[FILL-PATHS]");
    let font = music_font(svg)?;
    let index = SvgIndex::new(&font.glyphs);
    fill_paths(&mut glyphs, &index, options, warnings);
    debug!("{} glyphs assembled", glyphs.len());

    Ok(GlyphDictionary {
        glyphs,
        engraving_defaults: metadata.engraving_defaults.clone(),
        font_name: metadata.font_name.clone(),
        font_version: metadata.font_version.clone(),
        meta: font.font_face.clone().unwrap_or_default(),
    })
}

/// Union of both tables; an alternate replaces a main glyph of the same name.
fn merge_identities(
    main_glyphes: GlyphTable,
    alternate_glyphes: GlyphTable,
    warnings: &mut Warnings,
) -> Result<GlyphMap> {
    let mut glyphs = GlyphMap::new();

    for (name, entry) in main_glyphes {
        let codepoint = Codepoint::parse(&entry.codepoint)?;
        glyphs.insert(name, GlyphRecord::new(codepoint));
    }

    for (name, entry) in alternate_glyphes {
        let codepoint = Codepoint::parse(&entry.codepoint)?;
        if glyphs.insert(name.clone(), GlyphRecord::new(codepoint)).is_some() {
            warnings.push(Warning::AlternateOverridesMain { glyph: name });
        }
    }

    Ok(glyphs)
}

/// Bounding boxes are required, anchors are optional.
fn fill_metadata(glyphs: &mut GlyphMap, metadata: &FontMetadata, warnings: &mut Warnings) {
    glyphs.retain(|name, record| match metadata.glyph_bboxes.get(name) {
        Some(bbox) => {
            record.merge_bounding_box(bbox);
            true
        }
        None => {
            warnings.push(Warning::MissingBoundingBox { glyph: name.clone() });
            false
        }
    });

    for (name, record) in glyphs.iter_mut() {
        let Some(anchors) = metadata.glyphs_with_anchors.get(name) else {
            continue;
        };
        for anchor in record.merge_anchors(anchors) {
            warnings.push(Warning::ReservedAnchorName {
                glyph: name.clone(),
                anchor,
            });
        }
    }
}

/// The `defs > font` element, with glyphs and a `font-face`.
fn music_font(svg: &SvgDocument) -> Result<&SvgFont> {
    let font = svg
        .font
        .as_ref()
        .ok_or_else(|| Error::InvalidFontDocument("no <defs><font> element".to_string()))?;
    if font.glyphs.is_empty() {
        return Err(Error::InvalidFontDocument("the font has no <glyph> elements".to_string()));
    }
    if font.font_face.is_none() {
        return Err(Error::InvalidFontDocument("the font has no <font-face> element".to_string()));
    }
    Ok(font)
}

fn fill_paths(
    glyphs: &mut GlyphMap,
    index: &SvgIndex<'_>,
    options: &AssembleOptions,
    warnings: &mut Warnings,
) {
    glyphs.retain(|name, record| {
        let Some(svg_glyph) = index.lookup(&record.codepoint) else {
            warnings.push(Warning::MissingPath {
                glyph: name.clone(),
                codepoint: record.codepoint.clone(),
            });
            return false;
        };

        match resolve_path(&svg_glyph.d, options) {
            Ok(path) => {
                record.path = Some(path);
                true
            }
            Err(error) => {
                warnings.push(Warning::UnusablePath {
                    glyph: name.clone(),
                    error,
                });
                false
            }
        }
    });
}

fn resolve_path(d: &str, options: &AssembleOptions) -> std::result::Result<String, PathError> {
    let path = match &options.transcode {
        Some(transform) => transcode_str(d, transform)?,
        None => d.trim().to_string(),
    };
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    Ok(path)
}
