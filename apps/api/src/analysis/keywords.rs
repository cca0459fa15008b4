//! Keyword resolver — decides which target keywords the coverage rule tests against.
//!
//! Resolution order:
//! 1. caller-supplied keywords (e.g. mined from a job description upstream)
//! 2. tokens from a "skills"-like section of the résumé
//! 3. the most frequent non-stop-word tokens of the whole document

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::analysis::normalize::NormalizedText;

/// Cap on tokens taken from a skills-like section.
pub const MAX_SECTION_KEYWORDS: usize = 15;
/// Cap on tokens taken from frequency analysis of the résumé.
pub const MAX_FREQUENT_KEYWORDS: usize = 10;
/// Characters after a skills heading that are scanned for tokens.
const SECTION_WINDOW_CHARS: usize = 200;

/// Skills heading synonyms, in priority order.
const SKILLS_HEADINGS: &[&str] = &[
    "skills",
    "core competencies",
    "expertise",
    "areas of expertise",
    "proficiencies",
];

const SECTION_SEPARATORS: &[char] = &[',', '\n', '\r', '•', '-'];

const STOP_WORDS: &[&str] = &[
    // common English
    "the", "and", "for", "with", "that", "this", "from", "have", "has", "had", "was", "were",
    "are", "been", "being", "will", "would", "should", "could", "your", "you", "our", "their",
    "they", "them", "his", "her", "its", "into", "onto", "over", "under", "about", "also",
    "all", "any", "can", "not", "but", "more", "most", "other", "such", "than", "then",
    "there", "these", "those", "what", "when", "where", "which", "who", "whom", "why", "how",
    "each", "both", "few", "some", "very", "just", "only", "own", "same", "too", "out", "off",
    "per", "via", "etc", "including", "within", "across", "through", "during", "while",
    "using", "used", "use", "well", "new", "may", "must", "able", "based",
    // résumé boilerplate
    "resume", "curriculum", "vitae", "experience", "education", "skills", "summary",
    "profile", "objective", "references", "company", "position", "role", "responsible",
    "responsibilities", "work", "worked", "working", "team", "years", "year", "months",
    "present", "university", "college", "email", "phone", "address", "contact",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Ordered, distinct, lower-cased target keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    /// Builds a set from arbitrary tokens: lower-cases, drops empties, keeps first occurrence.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let keywords = tokens
            .into_iter()
            .map(|t| t.as_ref().to_lowercase())
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.clone()))
            .collect();
        KeywordSet(keywords)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Resolves the keyword set for one analysis.
///
/// Supplied keywords win outright; auto-derivation never runs when any are given.
pub fn resolve_keywords(text: &NormalizedText, supplied: &[String]) -> KeywordSet {
    let supplied = KeywordSet::from_tokens(supplied);
    if !supplied.is_empty() {
        return supplied;
    }

    let from_section = section_keywords(&text.lower);
    if !from_section.is_empty() {
        tracing::debug!(count = from_section.len(), "keywords taken from skills section");
        return from_section;
    }

    frequent_keywords(&text.lower, MAX_FREQUENT_KEYWORDS)
}

/// Up to [`SECTION_WINDOW_CHARS`] characters after the first heading in
/// [`SKILLS_HEADINGS`] order that occurs anywhere in the text.
fn section_window(lower: &str) -> Option<&str> {
    SKILLS_HEADINGS.iter().find_map(|heading| {
        let rest = &lower[lower.find(heading)? + heading.len()..];
        let end = rest
            .char_indices()
            .nth(SECTION_WINDOW_CHARS)
            .map_or(rest.len(), |(at, _)| at);
        Some(&rest[..end])
    })
}

/// Tokens listed after the first skills-like heading, split on commas, newlines,
/// bullet glyphs and hyphens.
pub fn section_keywords(lower: &str) -> KeywordSet {
    let Some(window) = section_window(lower) else {
        return KeywordSet::default();
    };

    let tokens = window
        .split(SECTION_SEPARATORS)
        .map(|t| t.trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | ';' | '.')))
        .filter(|t| t.chars().count() > 2)
        .take(MAX_SECTION_KEYWORDS * 2);

    let mut set = KeywordSet::from_tokens(tokens);
    set.0.truncate(MAX_SECTION_KEYWORDS);
    set
}

/// The `limit` most frequent tokens, ties kept in first-seen order.
pub fn frequent_keywords(lower: &str, limit: usize) -> KeywordSet {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for token in lower.split(|c: char| !c.is_alphanumeric()) {
        if token.chars().count() <= 2 || STOP_WORD_SET.contains(token) {
            continue;
        }
        match index.get(token) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(token, order.len());
                order.push((token, 1));
            }
        }
    }

    // sort_by is stable, so equal counts stay in first-seen order
    order.sort_by(|a, b| b.1.cmp(&a.1));
    KeywordSet::from_tokens(order.into_iter().take(limit).map(|(token, _)| token))
}

/// Mines target keywords from a job description for the keyword-source endpoint.
pub fn mine_job_keywords(jd_text: &str, limit: usize) -> KeywordSet {
    frequent_keywords(&jd_text.to_lowercase(), limit)
}
