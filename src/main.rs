//! Convert a SMuFL font to a JSON glyph dictionary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glyphlib::{assemble_files, write_dictionary, AssembleOptions, PathTransform, SourcePaths};
use log::info;

const USAGE: &str = "Convert a SMuFL font to a json file to be used by a music rendering library.

The font folder must contain 2 files:
 - font.svg, an xml file containing the svg paths
 - metadata.json, a json file containing the font metadata

Example:
  glyphlib -f ./bravura-1.02 -m ./smufl-metadata-1.0/glyphnames.json \\
    -o ./fonts/bravura.json -w ./filter/whiteList.json -i 2";

#[derive(Parser, Debug)]
#[command(version, about, long_about = USAGE)]
struct Args {
    /// The font folder
    #[arg(short, long)]
    font: PathBuf,

    /// The SMuFL `glyphnames.json` file
    #[arg(short, long)]
    metadata: PathBuf,

    /// Path to the output file
    #[arg(short, long)]
    output: PathBuf,

    /// Optional white list file to filter glyphs to include in the output
    #[arg(short = 'w', long = "white-list")]
    white_list: Option<PathBuf>,

    /// Optional indent value for pretty print
    #[arg(short, long)]
    indent: Option<usize>,

    /// Store transcoded paths (scaled, y-axis flipped) instead of raw SVG data
    #[arg(long)]
    transcode: bool,

    /// Transcoding scale factor
    #[arg(long, default_value_t = 1.0, value_parser = finite)]
    scale: f64,

    /// Transcoding origin, x
    #[arg(long, default_value_t = 0.0, value_parser = finite, allow_negative_numbers = true)]
    origin_x: f64,

    /// Transcoding origin, y
    #[arg(long, default_value_t = 0.0, value_parser = finite, allow_negative_numbers = true)]
    origin_y: f64,

    /// Fractional digits kept in transcoded paths
    #[arg(long, default_value_t = 3)]
    precision: usize,
}

impl Args {
    fn options(&self) -> AssembleOptions {
        AssembleOptions {
            transcode: self.transcode.then_some(PathTransform {
                origin_x: self.origin_x,
                origin_y: self.origin_y,
                scale: self.scale,
                precision: self.precision,
            }),
        }
    }
}

/// Path data has no spelling for `NaN` or infinities.
fn finite(value: &str) -> Result<f64, String> {
    let number: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(format!("{value} is not a finite number"))
    }
}

fn run(args: &Args) -> glyphlib::Result<()> {
    let paths =
        SourcePaths::from_font_dir(&args.font, args.metadata.clone(), args.white_list.clone());
    let assembly = assemble_files(&paths, &args.options())?;
    info!("{} glyphs assembled", assembly.dictionary.glyphs.len());
    write_dictionary(&assembly.dictionary, &args.output, args.indent)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => {
            info!("[DONE]");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 7] = [
        "glyphlib",
        "-f",
        "font",
        "-m",
        "glyphnames.json",
        "-o",
        "out.json",
    ];

    #[test]
    fn transform_flags_build_the_options() {
        let args = Args::try_parse_from(
            REQUIRED
                .into_iter()
                .chain(["--transcode", "--scale", "0.5", "--origin-y", "-10"]),
        )
        .unwrap();
        let transform = args.options().transcode.unwrap();
        assert_eq!(transform.scale, 0.5);
        assert_eq!(transform.origin_y, -10.0);
        assert_eq!(transform.precision, 3);
    }

    #[test]
    fn raw_paths_by_default() {
        let args = Args::try_parse_from(REQUIRED).unwrap();
        assert_eq!(args.options().transcode, None);
    }

    #[test]
    fn non_finite_transform_values_are_rejected() {
        for (flag, value) in [("--scale", "NaN"), ("--origin-x", "inf"), ("--origin-y", "-inf")] {
            let args = REQUIRED.into_iter().chain(["--transcode", flag, value]);
            assert!(Args::try_parse_from(args).is_err(), "{flag} {value} was accepted");
        }
    }
}
