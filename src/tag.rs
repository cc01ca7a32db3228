//! Field tag literals and tag queries.
//!
//! A tag is written in the declaration as a quoted literal, for example
//! `` `android:"arch_variant,path" blueprint:"mutated"` ``. The builder unquotes
//! the literal with [`unquote_tag`] and stores the result as a [`Tag`], which
//! answers `key -> comma separated values` queries.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// One `key:"value"` entry at the start of the remaining tag text.
static TAG_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^ *([^\x00-\x20\x7f:"]+):("(?:[^"\\]|\\.)*")"#).expect("tag entry regex is valid")
});

/// An unquoted field tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(tag: impl Into<String>) -> Self {
        Tag(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value stored under `key`, or `None` if the key is absent.
    ///
    /// Entries are scanned left to right; scanning stops at the first entry
    /// that is not of the form `key:"value"`.
    pub fn lookup(&self, key: &str) -> Option<String> {
        let mut rest = self.0.as_str();
        while let Some(caps) = TAG_ENTRY.captures(rest) {
            let whole = caps.get(0).map_or(0, |m| m.end());
            let name = &caps[1];
            let quoted = &caps[2];
            if name == key {
                return unquote(quoted).ok();
            }
            rest = &rest[whole..];
        }
        None
    }

    /// Returns the comma-separated values stored under `key`.
    ///
    /// An absent key behaves like an empty value and yields a single empty
    /// token.
    pub fn values(&self, key: &str) -> Vec<String> {
        self.lookup(key)
            .unwrap_or_default()
            .split(',')
            .map(str::to_string)
            .collect()
    }

    /// Returns true if `value` is one of the comma-separated values under `key`.
    pub fn has_value(&self, key: &str, value: &str) -> bool {
        self.lookup(key)
            .unwrap_or_default()
            .split(',')
            .any(|entry| entry == value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decodes a quoted tag literal as written in a declaration.
///
/// Accepts back-quoted raw literals and double-quoted literals with escapes.
///
/// # Errors
///
/// Returns `Error::TagParse` if the literal is not validly quoted.
pub fn unquote_tag(literal: &str) -> Result<Tag> {
    unquote(literal)
        .map(Tag)
        .map_err(|message| Error::TagParse {
            tag: literal.to_string(),
            message,
        })
}

fn unquote(literal: &str) -> std::result::Result<String, String> {
    let quote = literal.chars().next().ok_or_else(|| "empty literal".to_string())?;
    if quote != '`' && quote != '"' {
        return Err(format!("unexpected quote character {:?}", quote));
    }
    // Both quote characters are one byte long.
    if literal.len() < 2 || !literal.ends_with(quote) {
        return Err("missing closing quote".to_string());
    }
    let body = &literal[1..literal.len() - 1];

    if quote == '`' {
        if body.contains('`') {
            return Err("unexpected back quote inside raw literal".to_string());
        }
        return Ok(body.replace('\r', ""));
    }
    unescape(body)
}

fn unescape(body: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => return Err("unescaped double quote".to_string()),
            '\n' => return Err("newline in quoted literal".to_string()),
            '\\' => {}
            c => {
                out.push(c);
                continue;
            }
        }

        let escape = chars
            .next()
            .ok_or_else(|| "trailing backslash".to_string())?;
        match escape {
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            'x' => out.push(hex_escape(&mut chars, 2)?),
            'u' => out.push(hex_escape(&mut chars, 4)?),
            'U' => out.push(hex_escape(&mut chars, 8)?),
            '0'..='7' => {
                let mut value = escape.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    let digit = chars
                        .next()
                        .and_then(|d| d.to_digit(8))
                        .ok_or_else(|| "invalid octal escape".to_string())?;
                    value = value * 8 + digit;
                }
                if value > 0xff {
                    return Err("octal escape out of range".to_string());
                }
                out.push(char::from_u32(value).ok_or_else(|| "invalid octal escape".to_string())?);
            }
            other => return Err(format!("unknown escape sequence \\{}", other)),
        }
    }

    Ok(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> std::result::Result<char, String> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|d| d.to_digit(16))
            .ok_or_else(|| "invalid hex escape".to_string())?;
        value = value * 16 + digit;
    }
    char::from_u32(value).ok_or_else(|| format!("invalid code point {:#x}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_raw_literal() {
        let tag = unquote_tag(r#"`android:"arch_variant"`"#).unwrap();
        assert_eq!(tag.as_str(), r#"android:"arch_variant""#);
    }

    #[test]
    fn test_unquote_double_quoted_literal() {
        let tag = unquote_tag(r#""android:\"path\"""#).unwrap();
        assert_eq!(tag.as_str(), r#"android:"path""#);

        let tag = unquote_tag(r#""a\tb\x41é\101""#).unwrap();
        assert_eq!(tag.as_str(), "a\tbAéA");
    }

    #[test]
    fn test_unquote_rejects_invalid_literals() {
        for literal in [
            "",
            "`",
            "\"open",
            "android:\"x\"",
            "`a`b`",
            r#""bad\q""#,
            r#""a"b""#,
            r#""\x4""#,
            "é",
            "ééé",
        ] {
            let result = unquote_tag(literal);
            assert!(
                matches!(result, Err(Error::TagParse { .. })),
                "expected TagParse for {:?}, got {:?}",
                literal,
                result
            );
        }
    }

    #[test]
    fn test_lookup() {
        let tag = Tag::new(r#"android:"arch_variant,path" blueprint:"mutated""#);
        assert_eq!(tag.lookup("android").as_deref(), Some("arch_variant,path"));
        assert_eq!(tag.lookup("blueprint").as_deref(), Some("mutated"));
        assert_eq!(tag.lookup("json"), None);
    }

    #[test]
    fn test_lookup_stops_at_malformed_entry() {
        let tag = Tag::new(r#"android:"a" broken blueprint:"b""#);
        assert_eq!(tag.lookup("android").as_deref(), Some("a"));
        assert_eq!(tag.lookup("blueprint"), None);
    }

    #[test]
    fn test_lookup_value_with_escaped_quote() {
        let tag = Tag::new(r#"doc:"say \"hi\"" other:"x""#);
        assert_eq!(tag.lookup("doc").as_deref(), Some("say \"hi\""));
        assert_eq!(tag.lookup("other").as_deref(), Some("x"));
    }

    #[test]
    fn test_values_and_has_value() {
        let tag = Tag::new(r#"android:"arch_variant,path""#);
        assert_eq!(tag.values("android"), vec!["arch_variant", "path"]);
        assert!(tag.has_value("android", "path"));
        assert!(tag.has_value("android", "arch_variant"));
        assert!(!tag.has_value("android", "arch"));
        assert!(!tag.has_value("blueprint", "path"));
    }

    #[test]
    fn test_absent_key_matches_empty_value() {
        let tag = Tag::default();
        assert_eq!(tag.values("android"), vec![""]);
        assert!(tag.has_value("android", ""));
    }
}
