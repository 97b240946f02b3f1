//! Stretch options from `key=value` strings.
//!
//! Parses strings like `?offsetX=120&offsetY=-40&speed=fast` into
//! [`StretchOptions`](crate::stretch::StretchOptions). Useful when options
//! arrive through a URL query or a `data-` attribute.
//!
//! # Example
//!
//! ```
//! use zencover::query;
//! use zencover::stretch::{ElementPosition, FadeSpeed};
//!
//! let result = query::parse("offsetX=120&offsetY=-40&speed=fast&elPosition=absolute");
//! assert!(result.warnings.is_empty());
//!
//! let opts = result.options;
//! assert_eq!(opts.offset_x, Some(120.0));
//! assert_eq!(opts.offset_y, Some(-40.0));
//! assert_eq!(opts.speed, Some(FadeSpeed::Fast));
//! assert_eq!(opts.el_position, Some(ElementPosition::Absolute));
//! ```
//!
//! Parsing never fails. Problems come back as [`ParseWarning`]s and the
//! offending key is left unset.

use alloc::string::String;
use alloc::vec::Vec;

use crate::stretch::{ElementPosition, FadeSpeed, StretchOptions};

/// Result of parsing an options string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed options; unset fields were absent or invalid.
    pub options: StretchOptions,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from options parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key was not recognized.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Keys the widget historically accepted but never acted on.
const IGNORED_KEYS: &[&str] = &["positionx", "positiony"];

/// Parse an options string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let mut options = StretchOptions::new();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(&raw_key).to_ascii_lowercase();
        let value = percent_decode(&raw_value);
        dispatch_key(&key, &value, &mut options, &mut warnings);
    }

    ParseResult { options, warnings }
}

fn dispatch_key(
    key: &str,
    value: &str,
    opts: &mut StretchOptions,
    warnings: &mut Vec<ParseWarning>,
) {
    match key {
        "offsetx" | "offset.x" | "x" => match parse_offset(value) {
            Some(v) => set_or_warn(&mut opts.offset_x, v, key, value, warnings),
            None => invalid(warnings, "offsetx", value, "expected a finite number"),
        },
        "offsety" | "offset.y" | "y" => match parse_offset(value) {
            Some(v) => set_or_warn(&mut opts.offset_y, v, key, value, warnings),
            None => invalid(warnings, "offsety", value, "expected a finite number"),
        },
        "speed" | "fade" => match parse_speed(value) {
            Some(s) => set_or_warn(&mut opts.speed, s, key, value, warnings),
            None => invalid(
                warnings,
                "speed",
                value,
                "expected instant|fast|normal|slow or milliseconds",
            ),
        },
        "elposition" | "position" => match parse_position(value) {
            Some(p) => set_or_warn(&mut opts.el_position, p, key, value, warnings),
            None => invalid(
                warnings,
                "elposition",
                value,
                "expected relative|absolute|fixed|sticky",
            ),
        },
        _ if IGNORED_KEYS.contains(&key) => {}
        _ => warnings.push(ParseWarning::KeyNotRecognized {
            key: String::from(key),
            value: String::from(value),
        }),
    }
}

/// Set a field, warning on duplicate.
fn set_or_warn<T>(
    field: &mut Option<T>,
    parsed: T,
    key: &str,
    value: &str,
    warnings: &mut Vec<ParseWarning>,
) {
    if field.is_some() {
        warnings.push(ParseWarning::DuplicateKey {
            key: String::from(key),
            value: String::from(value),
        });
    }
    *field = Some(parsed);
}

fn invalid(warnings: &mut Vec<ParseWarning>, key: &'static str, value: &str, reason: &'static str) {
    warnings.push(ParseWarning::ValueInvalid {
        key,
        value: String::from(value),
        reason,
    });
}

// ---- Value parsers ----

/// Accepts a trailing `px` suffix.
fn parse_offset(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix("px").unwrap_or(s);
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_speed(s: &str) -> Option<FadeSpeed> {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "instant" | "none" | "0" => Some(FadeSpeed::Instant),
        "fast" => Some(FadeSpeed::Fast),
        "normal" | "_default" => Some(FadeSpeed::Normal),
        "slow" => Some(FadeSpeed::Slow),
        other => {
            let ms = other.strip_suffix("ms").unwrap_or(other);
            ms.trim().parse::<u32>().ok().map(FadeSpeed::Millis)
        }
    }
}

fn parse_position(s: &str) -> Option<ElementPosition> {
    match s.trim().to_ascii_lowercase().as_str() {
        "relative" => Some(ElementPosition::Relative),
        "absolute" => Some(ElementPosition::Absolute),
        "fixed" => Some(ElementPosition::Fixed),
        "sticky" => Some(ElementPosition::Sticky),
        _ => None,
    }
}

// ---- Tokenizer ----

/// Split on '&', dropping a leading '?'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (String, String) {
    match pair.find('=') {
        Some(pos) => (String::from(&pair[..pos]), String::from(&pair[pos + 1..])),
        None => (String::from(pair), String::new()),
    }
}

/// Percent-decode a URL component. Also handles '+' as space.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
