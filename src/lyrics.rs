//! Lyrics extraction from Genius song pages.
//!
//! A song page flattened to text looks like
//! `"...Song Title Lyrics[Verse 1]First lineSecond line...Embed123"`: the
//! lyrics sit between a start marker and an end marker, line breaks have been
//! lost so words run together, and a view counter trails the block. The
//! extractor slices out the block, drops the counter, replaces typographic
//! artifacts and re-inserts the missing spaces.

use crate::normalize::{remove_unicode_artifacts, UnicodeMap};
use crate::{CollabError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

/// Text that precedes the lyrics block on a song page.
pub const DEFAULT_START_MARKER: &str = "Lyrics[";

/// Text that follows the lyrics block on a song page.
pub const DEFAULT_END_MARKER: &str = "Embed";

/// Patterns whose two groups get a space inserted between them:
/// lowercase→uppercase, `]`→uppercase and `)`→uppercase.
pub const DEFAULT_SPACING_PATTERNS: [&str; 3] =
    [r"([a-z])([A-Z])", r"(\])([A-Z])", r"(\))([A-Z])"];

static DEFAULT_RULES: Lazy<Vec<SpacingRule>> = Lazy::new(|| {
    DEFAULT_SPACING_PATTERNS
        .iter()
        .map(|pattern| SpacingRule {
            regex: Regex::new(pattern).unwrap(),
        })
        .collect()
});

/// A compiled whitespace-insertion rule with exactly two capture groups.
#[derive(Debug, Clone)]
pub struct SpacingRule {
    regex: Regex,
}

impl SpacingRule {
    /// Compile `pattern`, rejecting it unless it has exactly two capture groups.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| CollabError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        // captures_len counts the implicit whole-match group
        let groups = regex.captures_len() - 1;
        if groups != 2 {
            return Err(CollabError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: format!("expected exactly 2 capture groups, found {groups}"),
            });
        }

        Ok(Self { regex })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Insert a single space between the two groups at every match.
    pub fn apply(&self, content: &str) -> String {
        self.regex.replace_all(content, "${1} ${2}").into_owned()
    }
}

/// Compile a list of spacing patterns, failing on the first invalid one.
pub fn compile_spacing_rules<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<SpacingRule>> {
    patterns
        .iter()
        .map(|pattern| SpacingRule::new(pattern.as_ref()))
        .collect()
}

/// Apply each rule in order.
pub fn insert_spaces(content: &str, rules: &[SpacingRule]) -> String {
    let mut content = content.to_string();
    for rule in rules {
        content = rule.apply(&content);
    }
    content
}

/// Drop the run of ASCII digits at the end of `content`.
///
/// ```
/// use genius_collab::lyrics::remove_trailing_digits;
///
/// assert_eq!(remove_trailing_digits("Alien SuperStar960"), "Alien SuperStar");
/// assert_eq!(remove_trailing_digits("12345"), "");
/// ```
pub fn remove_trailing_digits(content: &str) -> &str {
    content.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// Flatten an HTML document to the concatenation of its text nodes.
pub fn html_to_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let document = Html::parse_document(html);
    document.root_element().text().collect()
}

/// Cuts the lyrics block out of a flattened song page and cleans it.
#[derive(Debug, Clone)]
pub struct LyricsExtractor {
    start_marker: String,
    end_marker: String,
    rules: Vec<SpacingRule>,
    unicode_map: UnicodeMap,
}

impl LyricsExtractor {
    /// Create an extractor with the default markers and spacing rules.
    pub fn new(unicode_map: UnicodeMap) -> Self {
        Self {
            start_marker: DEFAULT_START_MARKER.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            rules: DEFAULT_RULES.clone(),
            unicode_map,
        }
    }

    /// Replace the start and end markers. An empty marker is treated as absent.
    pub fn with_markers(mut self, start_marker: &str, end_marker: &str) -> Self {
        self.start_marker = start_marker.to_string();
        self.end_marker = end_marker.to_string();
        self
    }

    /// Replace the spacing rules; fails with [`CollabError::InvalidPattern`]
    /// on the first pattern that does not have exactly two groups.
    pub fn with_spacing_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        self.rules = compile_spacing_rules(patterns)?;
        Ok(self)
    }

    pub fn unicode_map(&self) -> &UnicodeMap {
        &self.unicode_map
    }

    /// The slice strictly between the start marker and the first end marker after it.
    pub fn slice_between_markers<'a>(&self, text: &'a str) -> &'a str {
        let start = match self.find_marker(text, &self.start_marker) {
            Some(index) => index + self.start_marker.len(),
            None => 0,
        };

        let rest = &text[start..];
        let end = self
            .find_marker(rest, &self.end_marker)
            .unwrap_or(rest.len());

        &rest[..end]
    }

    fn find_marker(&self, text: &str, marker: &str) -> Option<usize> {
        if marker.is_empty() {
            None
        } else {
            text.find(marker)
        }
    }

    /// Extract clean lyrics from flattened page text.
    pub fn extract(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lyrics = self.slice_between_markers(text);
        let lyrics = remove_trailing_digits(lyrics);
        let lyrics = remove_unicode_artifacts(lyrics, &self.unicode_map);
        insert_spaces(&lyrics, &self.rules)
    }

    /// Flatten an HTML page and extract its lyrics.
    pub fn extract_from_html(&self, html: &str) -> String {
        self.extract(&html_to_text(html))
    }
}

impl Default for LyricsExtractor {
    fn default() -> Self {
        Self::new(UnicodeMap::default())
    }
}
