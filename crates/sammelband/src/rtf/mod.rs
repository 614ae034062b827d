//! RTF to plain-text extraction with a provenance header.
//!
//! Source bytes are decoded as Latin-1, never UTF-8: RTF control words and
//! legacy text payloads are ASCII-compatible under that decoding, and
//! characters outside it arrive as RTF escape sequences that the stripping
//! pass decodes itself. Parsing is tolerant - unbalanced groups and unknown
//! control words degrade to best-effort text rather than failing.
//!
//! The extracted text is returned with a fixed-format header recording the
//! source filename and the conversion time, and an output filename derived
//! from the source's base name plus that same timestamp.

use chrono::{DateTime, Local};
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

/// Timestamp layout shared by the provenance header and the output name.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Result of converting one RTF document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// Output name, unique per source name and timestamp.
    pub file_name: String,
    /// Provenance header plus stripped text, ready to write as UTF-8.
    pub content: String,
}

/// Convert RTF bytes to plain text with a provenance header.
///
/// The header is present even when the stripped text is empty. `now` is
/// passed in by the caller so conversions are reproducible under test.
pub fn extract_rtf(bytes: &[u8], original_filename: &str, now: DateTime<Local>) -> ExtractedText {
    let source = encoding_rs::mem::decode_latin1(bytes);
    let text = strip_rtf(&source);

    let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
    let stem = Path::new(original_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(original_filename);

    ExtractedText {
        file_name: format!("{stem}_{timestamp}_converted.txt"),
        content: format!("Converted from: {original_filename}\nDate-time: {timestamp}\n\n{text}"),
    }
}

/// Destination groups whose entire contents are dropped from the output.
fn is_ignored_destination(word: &str) -> bool {
    matches!(
        word,
        "fonttbl"
            | "colortbl"
            | "stylesheet"
            | "info"
            | "generator"
            | "pict"
            | "object"
            | "header"
            | "headerl"
            | "headerr"
            | "headerf"
            | "footer"
            | "footerl"
            | "footerr"
            | "footerf"
            | "footnote"
    )
}

/// Convert a hex digit character to its numeric value.
#[inline]
fn hex_digit_to_u8(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some((c as u8) - b'0'),
        'a'..='f' => Some((c as u8) - b'a' + 10),
        'A'..='F' => Some((c as u8) - b'A' + 10),
        _ => None,
    }
}

/// Parse a hex-encoded byte from two characters.
#[inline]
fn parse_hex_byte(h1: char, h2: char) -> Option<u8> {
    let high = hex_digit_to_u8(h1)?;
    let low = hex_digit_to_u8(h2)?;
    Some((high << 4) | low)
}

/// Decode one `\'xx` escape byte.
///
/// The 0x80-0x9F range carries the Windows-1252 punctuation repertoire;
/// everything else maps through Latin-1 identity.
fn decode_escape_byte(byte: u8) -> char {
    match byte {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        0x81 | 0x8D | 0x8F | 0x90 | 0x9D => '?',
        _ => byte as char,
    }
}

/// Parse an RTF control word and its optional numeric parameter.
///
/// A single space following the word is the control word's delimiter, not
/// document text, and is consumed here.
fn parse_control_word(chars: &mut Peekable<Chars>) -> (String, Option<i32>) {
    let mut word = String::new();
    let mut num_str = String::new();
    let mut is_negative = false;

    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphabetic() {
            word.push(c);
            chars.next();
        } else {
            break;
        }
    }

    if let Some(&'-') = chars.peek() {
        is_negative = true;
        chars.next();
    }

    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            num_str.push(c);
            chars.next();
        } else {
            break;
        }
    }

    if let Some(&' ') = chars.peek() {
        chars.next();
    }

    let value = if num_str.is_empty() {
        None
    } else {
        let val = num_str.parse::<i32>().unwrap_or(0);
        Some(if is_negative { -val } else { val })
    };

    (word, value)
}

/// Skip the remainder of the current group, including its closing brace.
///
/// Tolerates truncated input: running out of characters simply ends the
/// skip.
fn skip_group(chars: &mut Peekable<Chars>) {
    let mut depth = 0usize;
    while let Some(ch) = chars.next() {
        match ch {
            // Escaped delimiter or a control word lead-in; the next
            // character is never a group boundary.
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' => {
                if depth == 0 {
                    return;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
}

/// Strip RTF markup from `content`, yielding plain text.
///
/// Unknown control words are formatting noise and contribute nothing;
/// unbalanced braces never abort the scan.
pub fn strip_rtf(content: &str) -> String {
    let mut result = String::new();
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let Some(&next_ch) = chars.peek() else {
                    break;
                };
                match next_ch {
                    '\\' | '{' | '}' => {
                        chars.next();
                        result.push(next_ch);
                    }
                    '~' => {
                        chars.next();
                        result.push(' ');
                    }
                    '\'' => {
                        chars.next();
                        let hex = (chars.next(), chars.next());
                        if let (Some(h1), Some(h2)) = hex
                            && let Some(byte) = parse_hex_byte(h1, h2)
                        {
                            result.push(decode_escape_byte(byte));
                        }
                    }
                    '*' => {
                        // `\*` marks an optional destination; nothing in it
                        // is document text.
                        chars.next();
                        skip_group(&mut chars);
                    }
                    '\r' | '\n' => {
                        // An escaped line break is shorthand for \par.
                        chars.next();
                        result.push('\n');
                    }
                    c if c.is_ascii_alphabetic() => {
                        let (word, value) = parse_control_word(&mut chars);
                        match word.as_str() {
                            "u" => {
                                if let Some(code) = value {
                                    let code_u = if code < 0 { (code + 65536) as u32 } else { code as u32 };
                                    if let Some(decoded) = char::from_u32(code_u) {
                                        result.push(decoded);
                                    }
                                    // Substitute character for readers
                                    // without unicode support.
                                    if let Some(&'?') = chars.peek() {
                                        chars.next();
                                    }
                                }
                            }
                            "par" | "line" | "sect" | "page" => result.push('\n'),
                            "tab" => result.push('\t'),
                            "bullet" => result.push('\u{2022}'),
                            "lquote" => result.push('\u{2018}'),
                            "rquote" => result.push('\u{2019}'),
                            "ldblquote" => result.push('\u{201C}'),
                            "rdblquote" => result.push('\u{201D}'),
                            "endash" => result.push('\u{2013}'),
                            "emdash" => result.push('\u{2014}'),
                            w if is_ignored_destination(w) => skip_group(&mut chars),
                            _ => {}
                        }
                    }
                    _ => {
                        // Unknown control symbol.
                        chars.next();
                    }
                }
            }
            '{' | '}' => {}
            '\r' | '\n' => {}
            _ => result.push(ch),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document() {
        assert_eq!(strip_rtf(r"{\rtf1 Hello World}"), "Hello World");
    }

    #[test]
    fn test_hex_escape_latin1() {
        assert_eq!(strip_rtf(r"{\rtf1 caf\'e9}"), "caf\u{e9}");
    }

    #[test]
    fn test_hex_escape_windows_1252_range() {
        assert_eq!(strip_rtf(r"{\rtf1 \'93quoted\'94}"), "\u{201C}quoted\u{201D}");
    }

    #[test]
    fn test_unicode_escape_with_substitute() {
        assert_eq!(strip_rtf("{\\rtf1 price \\u8364? now}"), "price \u{20AC} now");
    }

    #[test]
    fn test_negative_unicode_escape() {
        // Values above 32767 are encoded as negative 16-bit integers.
        assert_eq!(strip_rtf(r"{\rtf1 \u-3825?}"), "\u{F10F}");
    }

    #[test]
    fn test_paragraph_becomes_newline() {
        assert_eq!(strip_rtf(r"{\rtf1 line one\par line two}"), "line one\nline two");
    }

    #[test]
    fn test_destination_groups_are_dropped() {
        let source = r"{\rtf1{\fonttbl{\f0 Helvetica;}}{\colortbl;\red0\green0\blue0;}Hello}";
        assert_eq!(strip_rtf(source), "Hello");
    }

    #[test]
    fn test_optional_destination_is_dropped() {
        assert_eq!(strip_rtf(r"{\rtf1{\*\generator Word 12;}text}"), "text");
    }

    #[test]
    fn test_escaped_braces_are_literal() {
        assert_eq!(strip_rtf(r"{\rtf1 \{keep\}}"), "{keep}");
    }

    #[test]
    fn test_unbalanced_input_is_best_effort() {
        assert_eq!(strip_rtf(r"{\rtf1 {\b bold text"), "bold text");
    }

    #[test]
    fn test_raw_newlines_are_ignored() {
        assert_eq!(strip_rtf("{\\rtf1 one\ntwo}"), "onetwo");
    }

    #[test]
    fn test_unknown_control_words_are_noise() {
        assert_eq!(strip_rtf(r"{\rtf1\ansi\deff0 plain}"), "plain");
    }
}
