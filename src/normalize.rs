//! Text cleanup shared by titles, artist names and lyrics.
//!
//! The metadata API and the lyrics pages both leak a handful of typographic
//! characters (non-breaking spaces, curly apostrophes, zero-width spaces and a
//! look-alike Cyrillic letter). These helpers replace them with plain text and
//! break compound credits such as `"Calvin Harris & Lana Del Rey"` into
//! individual names.

use crate::{CollabError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Default delimiters between artist names in a single credit string.
pub const DEFAULT_NAME_DELIMITERS: &str = r",|&";

static DEFAULT_DELIMITER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&delimiter_regex_source(DEFAULT_NAME_DELIMITERS)).unwrap());

fn delimiter_regex_source(delimiters: &str) -> String {
    format!(r"\s*(?:{delimiters})\s*")
}

/// Ordered table of artifact strings and their plain-text replacements.
///
/// Replacements run in table order, so a later needle sees the output of
/// earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnicodeMap {
    replacements: Vec<(String, String)>,
}

impl UnicodeMap {
    /// Build a table from `(needle, replacement)` pairs. Empty needles are ignored.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let replacements = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        Self { replacements }
    }

    /// A table with no entries; `remove_unicode_artifacts` becomes the identity.
    pub fn empty() -> Self {
        Self {
            replacements: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.replacements
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for UnicodeMap {
    fn default() -> Self {
        Self::new([
            ("\u{00a0}", " "),
            ("\u{2019}", "'"),
            ("\u{200b}", " "),
            ("\u{0435}", "e"),
        ])
    }
}

/// Replace every needle of `mapping` in `text` with its plain-text value.
///
/// Empty and whitespace-only input is returned unchanged.
pub fn remove_unicode_artifacts(text: &str, mapping: &UnicodeMap) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let mut content = text.to_string();
    for (needle, replacement) in mapping.iter() {
        if content.contains(needle) {
            content = content.replace(needle, replacement);
        }
    }
    content
}

/// Splits credit strings on a configurable delimiter alternation.
#[derive(Debug, Clone)]
pub struct NameSplitter {
    regex: Regex,
}

impl NameSplitter {
    /// Compile a splitter for `delimiters`, a regex alternation such as `",|&"`.
    /// Whitespace around each delimiter is absorbed.
    pub fn new(delimiters: &str) -> Result<Self> {
        let regex = Regex::new(&delimiter_regex_source(delimiters)).map_err(|e| {
            CollabError::InvalidPattern {
                pattern: delimiters.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { regex })
    }

    /// Split `text` into trimmed, non-empty names in their original order.
    pub fn split(&self, text: &str) -> Vec<String> {
        split_with(&self.regex, text)
    }
}

impl Default for NameSplitter {
    fn default() -> Self {
        Self {
            regex: DEFAULT_DELIMITER_REGEX.clone(),
        }
    }
}

/// Split a delimited credit string on commas and ampersands.
///
/// ```
/// use genius_collab::normalize::split_delimited_names;
///
/// assert_eq!(
///     split_delimited_names("Lana Del Rey, Calvin Harris, & Doja Cat"),
///     vec!["Lana Del Rey", "Calvin Harris", "Doja Cat"]
/// );
/// assert!(split_delimited_names("  , & ,").is_empty());
/// ```
pub fn split_delimited_names(text: &str) -> Vec<String> {
    split_with(&DEFAULT_DELIMITER_REGEX, text)
}

fn split_with(regex: &Regex, text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    regex
        .split(text)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_unicode_empty_and_whitespace_unchanged() {
        let map = UnicodeMap::default();
        assert_eq!(remove_unicode_artifacts("", &map), "");
        assert_eq!(remove_unicode_artifacts("   ", &map), "   ");
        // A lone non-breaking space counts as whitespace and is left alone
        assert_eq!(remove_unicode_artifacts("\u{00a0}", &map), "\u{00a0}");
    }

    #[test]
    fn test_remove_unicode_replacements() {
        let map = UnicodeMap::default();
        assert_eq!(remove_unicode_artifacts("\u{0435}", &map), "e");
        assert_eq!(
            remove_unicode_artifacts("Fitz\u{200b}and\u{00a0}the\u{00a0}Tantrums", &map),
            "Fitz and the Tantrums"
        );
        assert_eq!(
            remove_unicode_artifacts("The Maria\u{2019}s", &map),
            "The Maria's"
        );
        assert_eq!(
            remove_unicode_artifacts("\u{00a0}\u{2019}\u{200b}\u{0435}", &map),
            " ' e"
        );
        // Zero-width spaces are not whitespace, so this input is rewritten
        assert_eq!(
            remove_unicode_artifacts(" \u{200b}  \u{200b}", &map),
            "     "
        );
    }

    #[test]
    fn test_remove_unicode_is_idempotent() {
        let map = UnicodeMap::default();
        for input in [
            "Karma\u{2019}s a relaxing thought",
            "\u{0435} \u{0435} \u{2019}\u{200b}",
            "plain ascii",
            "",
        ] {
            let once = remove_unicode_artifacts(input, &map);
            assert_eq!(remove_unicode_artifacts(&once, &map), once);
        }
    }

    #[test]
    fn test_remove_unicode_table_order() {
        let map = UnicodeMap::new([("ab", "b"), ("bb", "c")]);
        assert_eq!(remove_unicode_artifacts("abb", &map), "c");
        assert_eq!(remove_unicode_artifacts("abb", &UnicodeMap::empty()), "abb");
    }

    #[test]
    fn test_split_delimiters_only_yields_nothing() {
        for input in ["", " ", "        ", "    ,   ,  ", "&&&,,,,", " & , & "] {
            assert!(
                split_delimited_names(input).is_empty(),
                "expected no names for {input:?}"
            );
        }
    }

    #[test]
    fn test_split_single_name_is_trimmed() {
        assert_eq!(split_delimited_names("  Rihanna "), vec!["Rihanna"]);
        assert_eq!(split_delimited_names("J. Balvin"), vec!["J. Balvin"]);
    }

    #[test]
    fn test_split_commas_and_ampersands() {
        assert_eq!(
            split_delimited_names("J. Balvin, Bad Bunny, The Weekend, Rihanna "),
            vec!["J. Balvin", "Bad Bunny", "The Weekend", "Rihanna"]
        );
        assert_eq!(
            split_delimited_names("J. Balvin & Bad Bunny & The Weekend & Rihanna "),
            vec!["J. Balvin", "Bad Bunny", "The Weekend", "Rihanna"]
        );
        assert_eq!(
            split_delimited_names("   & Lady Gaga & , & & SZA, Tame Impala,"),
            vec!["Lady Gaga", "SZA", "Tame Impala"]
        );
    }

    #[test]
    fn test_custom_splitter() {
        let splitter = NameSplitter::new(r",|&|\bx\b|feat\.").unwrap();
        assert_eq!(
            splitter.split("Marshmello x Bastille feat. Khalid"),
            vec!["Marshmello", "Bastille", "Khalid"]
        );
    }

    #[test]
    fn test_invalid_splitter_pattern() {
        let err = NameSplitter::new("(,").unwrap_err();
        assert!(matches!(err, CollabError::InvalidPattern { .. }));
    }
}
