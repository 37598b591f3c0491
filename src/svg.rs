//! SVG font documents: `<svg><defs><font>` with a `font-face` and one
//! `glyph` element per outline.

use std::collections::{BTreeMap, HashMap};

use roxmltree::{Document, Node};

use crate::codepoint::Codepoint;

/// The parts of an SVG document the assembler looks at.
///
/// Parsing never fails on a missing `defs`/`font`; the shape is checked by
/// the assembler so the error names what is wrong with the font.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgDocument {
    pub font: Option<SvgFont>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgFont {
    /// Attributes of `<font-face>`, if the element exists
    pub font_face: Option<BTreeMap<String, String>>,
    pub glyphs: Vec<SvgGlyph>,
}

/// One `<glyph>` element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgGlyph {
    /// `glyph-name`, e.g. `uniE050`
    pub glyph_name: String,
    /// `unicode`, the literal character(s)
    pub unicode: Option<String>,
    /// Raw path data
    pub d: String,
}

/// Parse an SVG font from its XML text.
pub fn parse_svg_document(xml: &str) -> Result<SvgDocument, roxmltree::Error> {
    // Font exports start with a DOCTYPE declaration
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = Document::parse_with_options(xml, options)?;
    let root = doc.root_element();

    let font = child_element(&root, "defs")
        .and_then(|defs| child_element(&defs, "font"))
        .map(|font| parse_font(&font));

    Ok(SvgDocument { font })
}

fn parse_font(node: &Node) -> SvgFont {
    let mut font = SvgFont::default();

    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "font-face" => {
                font.font_face = Some(
                    child
                        .attributes()
                        .map(|a| (a.name().to_string(), a.value().to_string()))
                        .collect(),
                );
            }
            "glyph" => font.glyphs.push(SvgGlyph {
                glyph_name: child.attribute("glyph-name").unwrap_or("").to_string(),
                unicode: child.attribute("unicode").map(String::from),
                d: child.attribute("d").unwrap_or("").to_string(),
            }),
            _ => {}
        }
    }

    font
}

fn child_element<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

// ─── Indices ─────────────────────────────────────────────────────────

/// Glyph lookup by codepoint through both SVG naming schemes.
///
/// When several glyphs share a key the last one in document order wins.
#[derive(Debug)]
pub struct SvgIndex<'a> {
    by_name: HashMap<&'a str, &'a SvgGlyph>,
    by_unicode: HashMap<Codepoint, &'a SvgGlyph>,
}

impl<'a> SvgIndex<'a> {
    pub fn new(glyphs: &'a [SvgGlyph]) -> Self {
        let mut by_name = HashMap::with_capacity(glyphs.len());
        let mut by_unicode = HashMap::with_capacity(glyphs.len());

        for glyph in glyphs {
            by_name.insert(glyph.glyph_name.as_str(), glyph);
            if let Some(cp) = glyph.unicode.as_deref().and_then(Codepoint::from_unicode_attr) {
                by_unicode.insert(cp, glyph);
            }
        }

        Self {
            by_name,
            by_unicode,
        }
    }

    /// `uniXXXX` glyph name first, then the `unicode` attribute.
    pub fn lookup(&self, codepoint: &Codepoint) -> Option<&'a SvgGlyph> {
        self.by_name
            .get(codepoint.to_svg_key().as_str())
            .or_else(|| self.by_unicode.get(codepoint))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT: &str = r#"<?xml version="1.0" standalone="no"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd" >
<svg xmlns="http://www.w3.org/2000/svg" version="1.1">
<metadata>test</metadata>
<defs>
<font id="Test" horiz-adv-x="0">
  <font-face font-family="Test" units-per-em="1000"/>
  <missing-glyph/>
  <glyph glyph-name="uniE050" unicode="&#xe050;" d="M0 0L1 1Z"/>
  <glyph glyph-name="fClef" unicode="&#xe062;" d="M2 2Z"/>
  <glyph glyph-name="space" unicode=" " horiz-adv-x="250"/>
</font>
</defs>
</svg>"#;

    fn cp(s: &str) -> Codepoint {
        Codepoint::parse(s).unwrap()
    }

    #[test]
    fn parses_font_face_and_glyphs() {
        let doc = parse_svg_document(FONT).unwrap();
        let font = doc.font.expect("font element");
        let face = font.font_face.expect("font-face");
        assert_eq!(face["font-family"], "Test");
        assert_eq!(face["units-per-em"], "1000");
        assert_eq!(font.glyphs.len(), 3);
        assert_eq!(font.glyphs[0].glyph_name, "uniE050");
        assert_eq!(font.glyphs[0].unicode.as_deref(), Some("\u{E050}"));
        assert_eq!(font.glyphs[2].d, "");
    }

    #[test]
    fn missing_defs_gives_no_font() {
        let xml = r#"<svg xmlns="http://www.w3.org/2000/svg"><g/></svg>"#;
        let doc = parse_svg_document(xml).unwrap();
        assert_eq!(doc.font, None);
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(parse_svg_document("<svg><defs></svg>").is_err());
    }

    #[test]
    fn lookup_prefers_glyph_name_then_unicode() {
        let font = parse_svg_document(FONT).unwrap().font.unwrap();
        let index = SvgIndex::new(&font.glyphs);

        assert_eq!(index.lookup(&cp("U+E050")).unwrap().d, "M0 0L1 1Z");
        assert_eq!(index.lookup(&cp("U+E062")).unwrap().glyph_name, "fClef");
        assert!(index.lookup(&cp("U+E0A4")).is_none());
    }

    #[test]
    fn name_index_wins_over_unicode_index() {
        let glyphs = vec![
            SvgGlyph {
                glyph_name: "other".into(),
                unicode: Some("\u{E050}".into()),
                d: "M1 1Z".into(),
            },
            SvgGlyph {
                glyph_name: "uniE050".into(),
                unicode: None,
                d: "M2 2Z".into(),
            },
        ];
        let index = SvgIndex::new(&glyphs);
        assert_eq!(index.lookup(&cp("U+E050")).unwrap().d, "M2 2Z");
    }

    #[test]
    fn codepoints_round_trip_through_both_indices() {
        let font = parse_svg_document(FONT).unwrap().font.unwrap();
        let index = SvgIndex::new(&font.glyphs);
        let codepoint = cp("U+E050");

        let glyph = index.lookup(&codepoint).unwrap();
        assert_eq!(glyph.glyph_name, codepoint.to_svg_key());
        let from_attr = glyph.unicode.as_deref().and_then(Codepoint::from_unicode_attr);
        assert_eq!(from_attr, Some(codepoint));
    }
}
