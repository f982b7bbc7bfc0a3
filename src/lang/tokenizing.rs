use crate::{
    lang::source_buffer::SourceBuffer,
    runtime::{
        data_structures::value::Value,
        error::{self, ErrorKind, ScriptError},
    },
};
use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
};

/// A number is either an integer or a floating point value.  Arithmetic words receive their
/// operands in this form and hand their results back in it.
#[derive(Clone, Copy)]
pub enum NumberType {
    /// We're holding an integer value.
    Int(i64),

    /// We're holding a floating point value.
    Float(f64),
}

impl NumberType {
    /// The value as a float, whichever variant we hold.
    pub fn as_float(&self) -> f64 {
        match self {
            NumberType::Int(num) => *num as f64,
            NumberType::Float(num) => *num,
        }
    }

    /// Order two numbers.  Mixed integer and float pairs are compared as floats.
    pub fn compare(&self, other: &NumberType) -> Option<Ordering> {
        match (self, other) {
            (NumberType::Int(a), NumberType::Int(b)) => a.partial_cmp(b),
            _ => self.as_float().partial_cmp(&other.as_float()),
        }
    }
}

/// Print the value of the held number.
impl Display for NumberType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            NumberType::Int(num) => write!(f, "{}", num),
            NumberType::Float(num) => write!(f, "{:?}", num),
        }
    }
}

/// Print the value of the held number as well as an indicator of which variant we're holding for
/// debugging purposes.
impl Debug for NumberType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            NumberType::Int(num) => write!(f, "{} i", num),
            NumberType::Float(num) => write!(f, "{:?} f", num),
        }
    }
}

/// The states of the scanner.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ScanState {
    /// Skipping whitespace between tokens.
    Whitespace,

    /// Inside a quoted string literal.
    String,

    /// Inside a bare word or number.
    Token,
}

/// Check if the given character is considered whitespace.
fn is_whitespace(next: char) -> bool {
    next.is_whitespace()
}

/// Scan the next token out of the buffer.
///
/// String literals come back string typed.  Everything else comes back as a word, already run
/// through numeric classification.  Ok(None) means the buffer is exhausted.
pub fn scan(buffer: &mut SourceBuffer) -> error::Result<Option<Value>> {
    let mut state = ScanState::Whitespace;
    let mut text = String::new();
    let mut start = buffer.location().clone();

    while let Some(next) = buffer.next_char() {
        match state {
            ScanState::Whitespace => {
                if next == '"' {
                    state = ScanState::String;
                } else if !is_whitespace(next) {
                    text.push(next);
                    state = ScanState::Token;
                } else {
                    start = buffer.location().clone();
                }
            }

            ScanState::String => {
                if next == '"' {
                    return Ok(Some(Value::String(text)));
                }

                text.push(next);
            }

            ScanState::Token => {
                if is_whitespace(next) {
                    return Ok(Some(Value::word(text)));
                }

                text.push(next);
            }
        }
    }

    match state {
        ScanState::Whitespace => Ok(None),
        ScanState::Token => Ok(Some(Value::word(text))),
        ScanState::String => ScriptError::new_as_result(
            ErrorKind::UnterminatedDelimiter,
            Some(start),
            "Missing closing '\"' for string literal.".to_string(),
            None,
        ),
    }
}

/// Split an optional leading sign off of the text.
fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    }
}

/// Attempt to read the text as an integer literal.  Decimal, 0x hexadecimal, 0b binary and 0o octal
/// forms are supported, with _ allowed as a separator between digits for readability.
pub fn to_integer(text: &str) -> Option<i64> {
    let (negative, body) = split_sign(text);

    let (radix, digits) = if let Some(hex) = body.strip_prefix("0x") {
        (16, hex)
    } else if let Some(binary) = body.strip_prefix("0b") {
        (2, binary)
    } else if let Some(octal) = body.strip_prefix("0o") {
        (8, octal)
    } else {
        (10, body)
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }

    let cleaned = digits.replace('_', "");

    if !cleaned.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = i128::from_str_radix(&cleaned, radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };

    i64::try_from(value).ok()
}

/// Attempt to read the text as a floating point literal.  The text has to start and end with a
/// digit, so the spellings Rust accepts for infinity and NaN are not numbers here.
pub fn to_float(text: &str) -> Option<f64> {
    let (_, body) = split_sign(text);

    let starts_with_digit = body.chars().next().is_some_and(|c| c.is_ascii_digit());
    let ends_with_digit = body.chars().last().is_some_and(|c| c.is_ascii_digit());

    if !starts_with_digit || !ends_with_digit {
        return None;
    }

    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '_' | '+' | '-'))
    {
        return None;
    }

    text.replace('_', "").parse().ok()
}
