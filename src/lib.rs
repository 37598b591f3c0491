//! glyphlib: builds a SMuFL glyph dictionary for a music font.
//!
//! Three sources are merged into one JSON document that a rendering
//! library can draw glyphs from:
//!   - `glyphnames.json`: SMuFL glyph name → codepoint
//!   - the font's `metadata.json`: bounding boxes, anchors, alternates
//!   - the font's `font.svg`: one outline per glyph
//!
//! # Example
//! ```no_run
//! use glyphlib::{assemble_files, AssembleOptions, SourcePaths};
//!
//! let paths = SourcePaths::from_font_dir(
//!     "fonts/bravura",
//!     "smufl/glyphnames.json".into(),
//!     None,
//! );
//! let assembly = assemble_files(&paths, &AssembleOptions::default()).unwrap();
//! println!("Glyphs: {}", assembly.dictionary.glyphs.len());
//! println!("Dropped: {}", assembly.warnings.len());
//! ```

pub mod assembler;
pub mod codepoint;
pub mod error;
pub mod loader;
pub mod model;
pub mod path;
pub mod svg;
pub mod warning;
pub mod whitelist;

use log::info;

pub use assembler::{assemble, AssembleOptions, Assembly};
pub use codepoint::Codepoint;
pub use error::{Error, Result};
pub use loader::{dictionary_to_json, load_sources, write_dictionary, SourcePaths, Sources};
pub use model::*;
pub use path::{tokenize, transcode, PathError, PathToken, PathTransform, PathTranscoder};
pub use svg::{parse_svg_document, SvgDocument, SvgGlyph, SvgIndex};
pub use warning::{Warning, Warnings};
pub use whitelist::{alternates_for, filter_alternates, filter_main, flatten};

/// Filter, flatten and assemble already loaded sources.
pub fn build_dictionary(sources: Sources, options: &AssembleOptions) -> Result<Assembly> {
    let Sources {
        glyph_names,
        metadata,
        svg,
        whitelist,
    } = sources;
    let mut warnings = Warnings::default();

    info!("[FILTERING] main glyphes");
    let main_glyphes = filter_main(glyph_names, &whitelist)?;

    info!("[FILTERING] alternates glyphes");
    let alternate_glyphes =
        alternates_for(&metadata.glyphs_with_alternates, &whitelist, &mut warnings);

    info!("[GENERATE-OUTPUT]");
    let dictionary = assemble(
        main_glyphes,
        alternate_glyphes,
        &metadata,
        &svg,
        options,
        &mut warnings,
    )?;
    info!("[WARNINGS] {}", warnings.len());

    Ok(Assembly {
        dictionary,
        warnings: warnings.into_vec(),
    })
}

/// Load every source document and assemble the dictionary.
pub fn assemble_files(paths: &SourcePaths, options: &AssembleOptions) -> Result<Assembly> {
    let sources = load_sources(paths)?;
    build_dictionary(sources, options)
}
