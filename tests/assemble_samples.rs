//! Integration tests: assemble the sample font in tests/data/.

use glyphlib::{
    assemble_files, dictionary_to_json, load_sources, AssembleOptions, Error, PathError,
    PathTransform, SourcePaths, Warning,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::PathBuf;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn testura(whitelist: Option<&str>) -> SourcePaths {
    let data = data_dir();
    SourcePaths::from_font_dir(
        data.join("testura"),
        data.join("glyphnames.json"),
        whitelist.map(|name| data.join(name)),
    )
}

fn glyph_names(assembly: &glyphlib::Assembly) -> Vec<&str> {
    assembly.dictionary.glyphs.keys().map(String::as_str).collect()
}

// ─── Raw paths ───────────────────────────────────────────────────────

#[test]
fn assemble_testura_keeps_resolvable_glyphs() {
    let assembly = assemble_files(&testura(None), &AssembleOptions::default())
        .expect("Failed to assemble testura");

    assert_eq!(
        glyph_names(&assembly),
        ["accidentalFlat", "fClef", "gClef", "gClefSmall", "noteheadBlack"]
    );

    let dict = &assembly.dictionary;
    assert_eq!(dict.font_name.as_deref(), Some("Testura"));
    assert_eq!(dict.font_version, Some(json!(1.1)));
    assert_eq!(dict.meta["font-family"], "Testura");
    assert_eq!(dict.meta["units-per-em"], "1000");
    assert_eq!(
        dict.engraving_defaults.as_ref().unwrap()["staffLineThickness"],
        json!(0.13)
    );

    // Raw path data is stored untouched
    assert_eq!(dict.glyphs["gClef"].path.as_deref(), Some("M100 200L300 400Z"));
    // fClef has no uniXXXX name and is found through its unicode attribute
    assert_eq!(
        dict.glyphs["fClef"].path.as_deref(),
        Some("M0 0C10 20 30 40 50 60Z")
    );
    assert_eq!(dict.glyphs["gClefSmall"].codepoint.as_str(), "U+F472");
}

#[test]
fn assemble_testura_reports_dropped_glyphs() {
    let assembly = assemble_files(&testura(None), &AssembleOptions::default()).unwrap();

    let dropped: Vec<(&str, &str)> = assembly
        .warnings
        .iter()
        .map(|w| {
            let kind = match w {
                Warning::MissingBoundingBox { .. } => "bbox",
                Warning::MissingPath { .. } => "path",
                _ => "other",
            };
            (w.glyph(), kind)
        })
        .collect();
    assert_eq!(
        dropped,
        [("segno", "bbox"), ("brace", "path"), ("noteheadBlackSmall", "path")]
    );
}

#[test]
fn glyph_record_json_shape() {
    let assembly = assemble_files(&testura(None), &AssembleOptions::default()).unwrap();
    let value = serde_json::to_value(&assembly.dictionary).unwrap();

    assert_eq!(
        value["glyphs"]["noteheadBlack"],
        json!({
            "codepoint": "U+E0A4",
            "bBoxNE": [1.18, 0.5],
            "bBoxSW": [0.0, -0.5],
            "stemDownNW": [0.0, -0.168],
            "stemUpSE": [1.18, 0.168],
            "path": "M0 -42h295v84H0z"
        })
    );
}

#[test]
fn assembling_twice_gives_identical_output() {
    let options = AssembleOptions::default();
    let first = assemble_files(&testura(None), &options).unwrap();
    let second = assemble_files(&testura(None), &options).unwrap();

    assert_eq!(
        dictionary_to_json(&first.dictionary, Some(2)).unwrap(),
        dictionary_to_json(&second.dictionary, Some(2)).unwrap()
    );
}

// ─── Transcoded paths ────────────────────────────────────────────────

#[test]
fn transcoded_paths_flip_the_y_axis() {
    let options = AssembleOptions {
        transcode: Some(PathTransform::default()),
    };
    let assembly = assemble_files(&testura(None), &options).unwrap();
    let glyphs = &assembly.dictionary.glyphs;

    assert_eq!(glyphs["gClef"].path.as_deref(), Some("M100,-200L300,-400Z"));
    assert_eq!(
        glyphs["fClef"].path.as_deref(),
        Some("M0,0C10,-20,30,-40,50,-60Z")
    );
    assert_eq!(glyphs["noteheadBlack"].path.as_deref(), Some("M0,42h295v-84H0z"));

    // The flat uses a quadratic curve, which the transcoder does not handle
    assert!(!glyphs.contains_key("accidentalFlat"));
    assert!(assembly.warnings.contains(&Warning::UnusablePath {
        glyph: "accidentalFlat".into(),
        error: PathError::UnknownCommand { command: 'Q', index: 3 },
    }));
}

#[test]
fn transcoded_paths_are_scaled() {
    let options = AssembleOptions {
        transcode: Some(PathTransform {
            scale: 0.01,
            ..PathTransform::default()
        }),
    };
    let assembly = assemble_files(&testura(None), &options).unwrap();
    assert_eq!(
        assembly.dictionary.glyphs["gClef"].path.as_deref(),
        Some("M1,-2L3,-4Z")
    );
}

// ─── Whitelists ──────────────────────────────────────────────────────

#[test]
fn whitelist_restricts_main_and_alternate_glyphs() {
    let assembly = assemble_files(&testura(Some("whitelist.json")), &AssembleOptions::default())
        .unwrap();

    assert_eq!(glyph_names(&assembly), ["gClef", "gClefSmall", "noteheadBlack"]);
    assert_eq!(
        assembly.warnings,
        vec![Warning::UnknownWhitelistedAlternate {
            glyph: "gClefLarge".into()
        }]
    );
}

#[test]
fn whitelist_with_unknown_main_glyph_fails() {
    let result = assemble_files(&testura(Some("bad-whitelist.json")), &AssembleOptions::default());
    match result {
        Err(Error::UnknownWhitelistedGlyph(name)) => assert_eq!(name, "notAGlyph"),
        other => panic!("expected UnknownWhitelistedGlyph, got {other:?}"),
    }
}

// ─── Broken inputs ───────────────────────────────────────────────────

#[test]
fn svg_without_font_is_rejected() {
    let data = data_dir();
    let paths = SourcePaths::from_font_dir(data.join("broken"), data.join("glyphnames.json"), None);

    // Loading succeeds; the shape is checked during assembly
    assert!(load_sources(&paths).is_ok());
    let result = assemble_files(&paths, &AssembleOptions::default());
    assert!(matches!(result, Err(Error::InvalidFontDocument(_))));
}

#[test]
fn missing_font_folder_is_an_io_error() {
    let data = data_dir();
    let paths =
        SourcePaths::from_font_dir(data.join("nowhere"), data.join("glyphnames.json"), None);
    let result = assemble_files(&paths, &AssembleOptions::default());
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn malformed_json_is_reported_with_its_path() {
    let data = data_dir();
    // An SVG file is not JSON
    let paths = SourcePaths {
        glyph_names: data.join("testura/font.svg"),
        ..testura(None)
    };
    match assemble_files(&paths, &AssembleOptions::default()) {
        Err(Error::Json { path, .. }) => assert!(path.ends_with("font.svg")),
        other => panic!("expected a JSON error, got {other:?}"),
    }
}
