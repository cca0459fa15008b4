use std::fmt;

use serde::{Serialize, Serializer};

/// Marker prefixed to every finding so the client can tell outcomes apart at a glance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingStatus {
    Pass,
    Fail,
    Info,
}

impl FindingStatus {
    pub fn marker(self) -> &'static str {
        match self {
            FindingStatus::Pass => "✅",
            FindingStatus::Fail => "❌",
            FindingStatus::Info => "ℹ️",
        }
    }
}

/// One human-readable detail line. Serialized as a plain string (`"✅ Contact info found"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub status: FindingStatus,
    pub message: String,
}

impl Finding {
    pub fn new(status: FindingStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(FindingStatus::Pass, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(FindingStatus::Fail, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FindingStatus::Info, message)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.marker(), self.message)
    }
}

impl Serialize for Finding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Evidence pointer shown next to a failed or degraded check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub reason: String,
    pub line: String,
}

impl Highlight {
    pub fn new(reason: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            line: line.into(),
        }
    }
}

/// What a single rule contributes to the final result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub delta: i32,
    pub finding: Finding,
    pub suggestions: Vec<String>,
    pub highlights: Vec<Highlight>,
}

impl RuleOutcome {
    /// A passing outcome: no delta, no suggestions, no evidence.
    pub fn passed(finding: Finding) -> Self {
        Self {
            delta: 0,
            finding,
            suggestions: vec![],
            highlights: vec![],
        }
    }

    pub fn penalized(delta: i32, finding: Finding) -> Self {
        Self {
            delta,
            finding,
            suggestions: vec![],
            highlights: vec![],
        }
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.highlights.push(highlight);
        self
    }
}

/// Final assessment of one résumé. Built once by the aggregator and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    score: u32,
    details: Vec<Finding>,
    suggestions: Vec<String>,
    highlights: Vec<Highlight>,
}

impl AnalysisResult {
    pub(crate) fn new(
        score: u32,
        details: Vec<Finding>,
        suggestions: Vec<String>,
        highlights: Vec<Highlight>,
    ) -> Self {
        Self {
            score,
            details,
            suggestions,
            highlights,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn details(&self) -> &[Finding] {
        &self.details
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }
}
