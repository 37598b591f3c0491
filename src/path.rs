//! SVG path data: tokenizer and transcoder.
//!
//! Font outlines are drawn with y going up; SVG paths have y going down.
//! The transcoder scales every coordinate, inverts the y-axis and moves
//! absolute coordinates to an origin, emitting compact path syntax
//! (`M10,-20L30,-40Z`).
//!
//! Only the commands found in SMuFL SVG fonts are understood:
//! `M L S C Z H V` and their relative forms.

/// A path command letter or a numeric operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathToken {
    Command(char),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("invalid path data at byte {position}: unexpected '{found}'")]
    InvalidData { position: usize, found: char },

    #[error("unknown path command '{command}' at token {index}")]
    UnknownCommand { command: char, index: usize },

    #[error("path command '{command}' is missing operands")]
    MissingOperand { command: char },

    #[error("unexpected number {value} at token {index}")]
    UnexpectedNumber { value: f64, index: usize },

    #[error("path command '{command}' at token {index} maps to a non-finite coordinate")]
    NonFinite { command: char, index: usize },

    #[error("no path data")]
    Empty,
}

/// Split raw path data on command letters and signed-number boundaries.
///
/// Commas and whitespace separate; `1-2` and `.5.5` are two numbers each.
pub fn tokenize(d: &str) -> Result<Vec<PathToken>, PathError> {
    let bytes = d.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() || b == b',' {
            i += 1;
        } else if b.is_ascii_alphabetic() {
            tokens.push(PathToken::Command(b as char));
            i += 1;
        } else {
            let end = scan_number(bytes, i);
            let value = d[i..end]
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| invalid_data(d, i))?;
            tokens.push(PathToken::Number(value));
            i = end;
        }
    }

    Ok(tokens)
}

/// End of the number starting at `start`, or `start` if there is none.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut i = start;
    if matches!(bytes.get(i), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_end = digits_from(i);
    let mut has_digits = int_end > i;
    i = int_end;
    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        has_digits |= frac_end > i + 1;
        i = frac_end;
    }
    if !has_digits {
        return start;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }
    i
}

fn invalid_data(d: &str, position: usize) -> PathError {
    PathError::InvalidData {
        position,
        found: d[position..].chars().next().unwrap_or_default(),
    }
}

/// Scale, vertical flip and origin applied to every coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub scale: f64,
    /// Fractional digits kept in the output
    pub precision: usize,
}

impl Default for PathTransform {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            scale: 1.0,
            precision: 3,
        }
    }
}

impl PathTransform {
    fn x(&self, x: f64, absolute: bool) -> f64 {
        let x = x * self.scale;
        if absolute {
            self.origin_x + x
        } else {
            x
        }
    }

    fn y(&self, y: f64, absolute: bool) -> f64 {
        let y = y * -self.scale;
        if absolute {
            self.origin_y + y
        } else {
            y
        }
    }
}

enum Operands {
    Points(usize),
    Horizontal,
    Vertical,
}

fn operands(command: char) -> Option<Operands> {
    match command.to_ascii_uppercase() {
        'M' | 'L' => Some(Operands::Points(1)),
        'S' => Some(Operands::Points(2)),
        'C' => Some(Operands::Points(3)),
        'Z' => Some(Operands::Points(0)),
        'H' => Some(Operands::Horizontal),
        'V' => Some(Operands::Vertical),
        _ => None,
    }
}

/// Command repeated when operands follow a complete segment.
fn implicit_repeat(previous: char) -> Option<char> {
    match previous {
        'M' => Some('L'),
        'm' => Some('l'),
        'Z' | 'z' => None,
        other => Some(other),
    }
}

/// Render a token stream through `transform`.
///
/// Interpretation stops at the first problem and the error is returned;
/// a partially rendered path is never handed out.
pub fn transcode(tokens: &[PathToken], transform: &PathTransform) -> Result<String, PathError> {
    let mut out = String::with_capacity(tokens.len() * 6);
    let mut previous: Option<char> = None;
    let mut i = 0;

    while i < tokens.len() {
        let index = i;
        let command = match tokens[i] {
            PathToken::Command(c) => {
                i += 1;
                c
            }
            PathToken::Number(value) => previous
                .and_then(implicit_repeat)
                .ok_or(PathError::UnexpectedNumber { value, index })?,
        };
        let kind = operands(command).ok_or(PathError::UnknownCommand { command, index })?;
        let absolute = command.is_ascii_uppercase();
        let push = |out: &mut String, value: f64| {
            if !value.is_finite() {
                return Err(PathError::NonFinite { command, index });
            }
            push_number(out, value, transform.precision);
            Ok(())
        };

        out.push(command);
        match kind {
            Operands::Points(count) => {
                for p in 0..count {
                    let x = next_number(tokens, &mut i, command)?;
                    let y = next_number(tokens, &mut i, command)?;
                    if p > 0 {
                        out.push(',');
                    }
                    push(&mut out, transform.x(x, absolute))?;
                    out.push(',');
                    push(&mut out, transform.y(y, absolute))?;
                }
            }
            Operands::Horizontal => {
                let x = next_number(tokens, &mut i, command)?;
                push(&mut out, transform.x(x, absolute))?;
            }
            Operands::Vertical => {
                let y = next_number(tokens, &mut i, command)?;
                push(&mut out, transform.y(y, absolute))?;
            }
        }
        previous = Some(command);
    }

    Ok(out)
}

fn next_number(tokens: &[PathToken], i: &mut usize, command: char) -> Result<f64, PathError> {
    match tokens.get(*i) {
        Some(PathToken::Number(value)) => {
            *i += 1;
            Ok(*value)
        }
        _ => Err(PathError::MissingOperand { command }),
    }
}

/// Plain decimal: fixed precision, trailing zeros trimmed, never `-0` or exponents.
fn push_number(out: &mut String, value: f64, precision: usize) {
    let mut s = format!("{value:.precision$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s.remove(0);
    }
    out.push_str(&s);
}

/// Tokenize then transcode.
pub fn transcode_str(d: &str, transform: &PathTransform) -> Result<String, PathError> {
    transcode(&tokenize(d)?, transform)
}

/// A transcoder remembering its last input and output.
///
/// Rendering the same tokens twice in a row returns the cached string; any
/// other input replaces the cache. Not meant to be shared between threads
/// rendering different paths; use [`transcode`] there.
#[derive(Debug, Clone)]
pub struct PathTranscoder {
    transform: PathTransform,
    last: Option<(Vec<PathToken>, String)>,
}

impl PathTranscoder {
    pub fn new(transform: PathTransform) -> Self {
        Self {
            transform,
            last: None,
        }
    }

    pub fn transform(&self) -> &PathTransform {
        &self.transform
    }

    /// Forget the cached rendering.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn is_cached(&self, tokens: &[PathToken]) -> bool {
        matches!(&self.last, Some((cached, _)) if cached.as_slice() == tokens)
    }

    pub fn render(&mut self, tokens: &[PathToken]) -> Result<&str, PathError> {
        if !self.is_cached(tokens) {
            self.reset();
            let rendered = transcode(tokens, &self.transform)?;
            self.last = Some((tokens.to_vec(), rendered));
        }
        Ok(self.last.as_ref().map_or("", |(_, rendered)| rendered.as_str()))
    }
}
