use crate::analysis::models::{AnalysisResult, Finding, Highlight, RuleOutcome};

/// Starting score before rule deltas are applied.
pub const BASELINE_SCORE: i32 = 100;
/// Highest score ever reported. No résumé is treated as flawless.
pub const MAX_SCORE: i32 = 95;
pub const MIN_SCORE: i32 = 0;

/// Sums rule deltas onto the baseline, clamps to `[0, 95]` and appends the
/// tailoring reminder when the result lands on the cap.
pub fn aggregate(outcomes: impl IntoIterator<Item = RuleOutcome>) -> AnalysisResult {
    let mut total = BASELINE_SCORE;
    let mut details = Vec::new();
    let mut suggestions = Vec::new();
    let mut highlights = Vec::new();

    for outcome in outcomes {
        total += outcome.delta;
        details.push(outcome.finding);
        suggestions.extend(outcome.suggestions);
        highlights.extend(outcome.highlights);
    }

    let score = total.clamp(MIN_SCORE, MAX_SCORE);

    if score == MAX_SCORE {
        details.push(Finding::info(
            "No resume is ever truly perfect: your resume passes every ATS check.",
        ));
        suggestions.push(
            "Keep tailoring your resume to each job description to stay ahead.".to_string(),
        );
        highlights.push(Highlight::new(
            format!("Score capped at {MAX_SCORE}"),
            "No resume is ever truly perfect; tailor it for every application.",
        ));
    }

    AnalysisResult::new(score as u32, details, suggestions, highlights)
}
