//! Reading the source documents and writing the dictionary.
//!
//! A font folder holds two files:
//!   - `metadata.json`: the font's SMuFL metadata
//!   - `font.svg`: the SVG font with one `<glyph>` per outline
//!
//! `glyphnames.json` and the optional whitelist live wherever the caller says.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread::ScopedJoinHandle;

use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::model::{FontMetadata, GlyphDictionary, GlyphTable, Whitelist};
use crate::svg::{parse_svg_document, SvgDocument};

pub const METADATA_RELATIVE_PATH: &str = "metadata.json";
pub const FONT_RELATIVE_PATH: &str = "font.svg";

/// Where each source document lives.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePaths {
    pub glyph_names: PathBuf,
    pub metadata: PathBuf,
    pub font: PathBuf,
    pub whitelist: Option<PathBuf>,
}

impl SourcePaths {
    /// Paths for a font folder laid out as `metadata.json` + `font.svg`.
    pub fn from_font_dir<P: AsRef<Path>>(
        font_dir: P,
        glyph_names: PathBuf,
        whitelist: Option<PathBuf>,
    ) -> Self {
        let font_dir = font_dir.as_ref();
        Self {
            glyph_names,
            metadata: font_dir.join(METADATA_RELATIVE_PATH),
            font: font_dir.join(FONT_RELATIVE_PATH),
            whitelist,
        }
    }
}

/// Every decoded source document, ready for assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Sources {
    pub glyph_names: GlyphTable,
    pub metadata: FontMetadata,
    pub svg: SvgDocument,
    pub whitelist: Whitelist,
}

/// Load all documents concurrently. Returns only once every load succeeded.
pub fn load_sources(paths: &SourcePaths) -> Result<Sources> {
    std::thread::scope(|s| {
        let whitelist = s.spawn(|| match &paths.whitelist {
            Some(path) => load_json::<Whitelist>(path),
            None => Ok(Whitelist::default()),
        });
        let glyph_names = s.spawn(|| load_json::<GlyphTable>(&paths.glyph_names));
        let metadata = s.spawn(|| load_json::<FontMetadata>(&paths.metadata));
        let svg = s.spawn(|| load_svg(&paths.font));

        Ok(Sources {
            whitelist: join(whitelist)?,
            glyph_names: join(glyph_names)?,
            metadata: join(metadata)?,
            svg: join(svg)?,
        })
    })
}

fn join<T>(handle: ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    handle
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}

/// Read and decode one JSON document.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    info!("[LOADING] {}", path.display());
    let data = read_to_string(path)?;
    serde_json::from_str(&data).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse an SVG font.
pub fn load_svg(path: &Path) -> Result<SvgDocument> {
    info!("[LOADING] {}", path.display());
    let xml = read_to_string(path)?;
    parse_svg_document(&xml).map_err(|source| Error::Xml {
        path: path.to_path_buf(),
        source,
    })
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize the dictionary; `indent` spaces per level, compact when `None`.
pub fn dictionary_to_json(dictionary: &GlyphDictionary, indent: Option<usize>) -> Result<String> {
    let Some(width) = indent else {
        return serde_json::to_string(dictionary).map_err(Error::Serialize);
    };

    let indent = " ".repeat(width);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    dictionary
        .serialize(&mut serializer)
        .map_err(Error::Serialize)?;
    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Serialize, write to a temporary file next to `path`, then rename it over
/// `path`. On failure the target keeps its previous contents (or stays
/// absent) and the temporary file is removed.
pub fn write_dictionary(
    dictionary: &GlyphDictionary,
    path: &Path,
    indent: Option<usize>,
) -> Result<()> {
    let json = dictionary_to_json(dictionary, indent)?;
    info!("[WRITE] {}", path.display());

    let write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(json.as_bytes()).map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
