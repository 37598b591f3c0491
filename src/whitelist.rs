//! Whitelist filtering and alternate-glyph flattening.
//!
//! Main glyphs are filtered strictly: a whitelist is curated against the
//! exact `glyphnames.json` it ships with, so an unknown name is an error.
//! Alternate sets vary between metadata revisions, so unknown alternates
//! only produce a warning.

use crate::error::{Error, Result};
use crate::model::{AlternateGroups, AlternatesGroup, GlyphNameEntry, GlyphTable, Whitelist};
use crate::warning::{Warning, Warnings};

/// Keep only the whitelisted main glyphs.
///
/// Without a `mainGlyphes` set the table is handed back untouched.
pub fn filter_main(mut table: GlyphTable, whitelist: &Whitelist) -> Result<GlyphTable> {
    let Some(names) = &whitelist.main_glyphes else {
        return Ok(table);
    };

    let mut filtered = GlyphTable::new();
    for name in names {
        let entry = table
            .remove(name)
            .ok_or_else(|| Error::UnknownWhitelistedGlyph(name.clone()))?;
        filtered.insert(name.clone(), entry);
    }
    Ok(filtered)
}

/// Keep only the whitelisted alternates, warning about names the font lacks.
pub fn filter_alternates(
    mut table: GlyphTable,
    whitelist: &Whitelist,
    warnings: &mut Warnings,
) -> GlyphTable {
    let Some(names) = &whitelist.alternate_glyphes else {
        return table;
    };

    let mut filtered = GlyphTable::new();
    for name in names {
        match table.remove(name) {
            Some(entry) => {
                filtered.insert(name.clone(), entry);
            }
            None => warnings.push(Warning::UnknownWhitelistedAlternate {
                glyph: name.clone(),
            }),
        }
    }
    filtered
}

/// Alternate groups whose base glyph passes the main-glyph whitelist.
pub fn filter_groups<'a>(
    groups: &'a AlternateGroups,
    whitelist: &'a Whitelist,
) -> impl Iterator<Item = &'a AlternatesGroup> + 'a {
    groups
        .iter()
        .filter(move |(base, _)| {
            whitelist
                .main_glyphes
                .as_ref()
                .map_or(true, |names| names.contains(*base))
        })
        .map(|(_, group)| group)
}

/// One `{codepoint}` entry per alternate, keyed by the alternate's own name.
///
/// The base glyph association is dropped. If two groups list an alternate
/// under the same name, the one visited last wins; with `AlternateGroups`
/// that is the group whose base name sorts last. Whitelists are expected
/// to keep such collisions out.
pub fn flatten<'a>(groups: impl IntoIterator<Item = &'a AlternatesGroup>) -> GlyphTable {
    let mut flat = GlyphTable::new();
    for group in groups {
        for alternate in &group.alternates {
            flat.insert(
                alternate.name.clone(),
                GlyphNameEntry::new(alternate.codepoint.clone()),
            );
        }
    }
    flat
}

/// The alternate identity table for a font: group filter, flatten, name filter.
pub fn alternates_for(
    groups: &AlternateGroups,
    whitelist: &Whitelist,
    warnings: &mut Warnings,
) -> GlyphTable {
    let flat = flatten(filter_groups(groups, whitelist));
    filter_alternates(flat, whitelist, warnings)
}
