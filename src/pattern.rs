//! Shell-glob name patterns.
//!
//! A glob here is deliberately small: `*` matches any run of characters
//! (including none), `?` matches exactly one character, and everything else
//! is literal. The pattern is matched against a whole name, never a substring.

use regex::{Regex, RegexBuilder};

use crate::error::GilchristError;
use crate::traits::Matcher;

/// A compiled glob, matched against a single path segment.
///
/// # Examples
/// ```
/// use gilchrist::GlobPattern;
///
/// let txt = GlobPattern::compile("*.txt", false).unwrap();
/// assert!(txt.is_match("report.txt"));
/// assert!(!txt.is_match("report.txt.bak"));
///
/// let loud = GlobPattern::compile("foo.txt", true).unwrap();
/// assert!(loud.is_match("FOO.TXT"));
/// ```
#[derive(Debug, Clone)]
pub struct GlobPattern {
    raw:              String,
    case_insensitive: bool,
    regex:            Regex,
}

impl GlobPattern {
    /// Compile `pattern` into an anchored matcher.
    ///
    /// # Errors
    ///
    /// Returns [`GilchristError::InvalidPattern`] if the translated expression
    /// is rejected by the regex engine (in practice only when it exceeds the
    /// engine's size limits).
    pub fn compile(pattern: &str, case_insensitive: bool) -> Result<Self, GilchristError> {
        let regex = RegexBuilder::new(&glob_to_regex(pattern))
            .case_insensitive(case_insensitive)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| GilchristError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            raw: pattern.to_string(),
            case_insensitive,
            regex,
        })
    }

    /// The glob as written by the caller.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl Matcher for GlobPattern {
    fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Translate a glob into an anchored regular expression.
///
/// `*` becomes `.*`, `?` becomes `.`, and every other character is escaped
/// so regex metacharacters like `.`, `+`, `(` or `|` stay literal.
///
/// ```
/// use gilchrist::pattern::glob_to_regex;
///
/// assert_eq!(glob_to_regex("*.txt"), r"^.*\.txt$");
/// assert_eq!(glob_to_regex("a?c"), "^a.c$");
/// ```
pub fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push('^');
    let mut buf = [0u8; 4];
    for c in glob.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    out.push('$');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glob(p: &str) -> GlobPattern {
        GlobPattern::compile(p, false).unwrap()
    }

    #[test]
    fn star_matches_whole_name() {
        let p = glob("*.txt");
        assert!(p.is_match("a.txt"));
        assert!(p.is_match("report.txt"));
        assert!(p.is_match(".txt"));
        assert!(!p.is_match("a.txt.bak"));
        assert!(!p.is_match("txt"));
    }

    #[test]
    fn question_matches_exactly_one() {
        let p = glob("?bc");
        assert!(p.is_match("abc"));
        assert!(!p.is_match("bc"));
        assert!(!p.is_match("abcd"));
    }

    #[test]
    fn question_counts_characters_not_bytes() {
        let p = glob("?.md");
        assert!(p.is_match("é.md"));
        assert!(!p.is_match("éé.md"));
    }

    #[test]
    fn literal_pattern_is_exact() {
        let p = glob("Cargo.toml");
        assert!(p.is_match("Cargo.toml"));
        assert!(!p.is_match("Cargo.tomlx"));
        assert!(!p.is_match("xCargo.toml"));
        assert!(!p.is_match("Cargo_toml"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let p = glob("a+b(1)[x]{y}|^$\\.c");
        assert!(p.is_match("a+b(1)[x]{y}|^$\\.c"));
        assert!(!p.is_match("aab1xy"));
    }

    #[test]
    fn star_alone_matches_anything() {
        let p = glob("*");
        assert!(p.is_match(""));
        assert!(p.is_match("anything at all"));
        assert!(p.is_match("line\nbreak"));
    }

    #[test]
    fn case_insensitive_folds_both_sides() {
        let p = GlobPattern::compile("foo.txt", true).unwrap();
        assert!(p.is_match("FOO.TXT"));
        assert!(p.is_match("Foo.Txt"));
        assert!(p.is_case_insensitive());

        let strict = glob("foo.txt");
        assert!(!strict.is_match("FOO.TXT"));
    }

    #[test]
    fn empty_pattern_matches_only_empty_name() {
        let p = glob("");
        assert!(p.is_match(""));
        assert!(!p.is_match("a"));
    }

    #[test]
    fn translation_escapes_dots() {
        assert_eq!(glob_to_regex("cache*"), "^cache.*$");
        assert_eq!(glob_to_regex("a.b"), r"^a\.b$");
    }

    #[test]
    fn keeps_raw_pattern() {
        assert_eq!(glob("*.log").as_str(), "*.log");
    }
}
