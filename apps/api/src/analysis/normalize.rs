//! Text normalizer: one lower-cased copy for matching, one line list for evidence lookup.

/// Extracted résumé text prepared for the rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub lower: String,
    /// Original-case lines. Not trimmed, so a highlight shows the line as extracted.
    pub lines: Vec<String>,
}

impl NormalizedText {
    /// First line containing `needle` (case-insensitive).
    pub fn line_containing(&self, needle: &str) -> Option<&str> {
        let needle = needle.to_lowercase();
        self.lines
            .iter()
            .find(|line| line.to_lowercase().contains(&needle))
            .map(String::as_str)
    }

    /// First line for which `predicate` holds.
    pub fn line_matching(&self, predicate: impl Fn(&str) -> bool) -> Option<&str> {
        self.lines
            .iter()
            .map(String::as_str)
            .find(|line| predicate(line))
    }

    /// First non-blank line, used when a check has no better evidence to point at.
    pub fn first_line(&self) -> Option<&str> {
        self.line_matching(|line| !line.trim().is_empty())
    }
}

/// Lower-cases `raw` and splits it on `\r\n`, `\r` and `\n`.
///
/// Always succeeds; empty input yields a single empty line.
pub fn normalize(raw: &str) -> NormalizedText {
    let lines = raw
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::to_string)
        .collect();

    NormalizedText {
        lower: raw.to_lowercase(),
        lines,
    }
}
