// ATS résumé analysis engine.
// Pipeline: normalize → resolve keywords → rule table → aggregate.
// Pure and synchronous: no I/O, no shared state, safe to call from any task.

pub mod aggregate;
pub mod handlers;
pub mod keywords;
pub mod models;
pub mod normalize;
pub mod rules;
pub mod verdict;

use crate::analysis::aggregate::aggregate;
use crate::analysis::keywords::{resolve_keywords, KeywordSet};
use crate::analysis::models::AnalysisResult;
use crate::analysis::normalize::normalize;
use crate::analysis::rules::{evaluate_all, Document};

/// The result together with the keyword set it was scored against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub keywords: KeywordSet,
    pub result: AnalysisResult,
}

/// Scores extracted résumé text. `supplied_keywords`, when non-empty, replaces
/// keyword auto-derivation entirely.
pub fn analyze(text: &str, supplied_keywords: &[String]) -> AnalysisResult {
    let normalized = normalize(text);
    let keywords = resolve_keywords(&normalized, supplied_keywords);

    let doc = Document {
        raw: text,
        text: &normalized,
        keywords: &keywords,
    };
    aggregate(evaluate_all(&doc))
}

/// Entry point for the HTTP host: [`analyze`] plus the keyword set it scored against.
///
/// A resolved set resolves to itself, so passing it back through [`analyze`] scores
/// exactly what the caller asked for.
pub fn assess(text: &str, supplied_keywords: &[String]) -> Assessment {
    let keywords = resolve_keywords(&normalize(text), supplied_keywords);
    let result = analyze(text, keywords.as_slice());

    Assessment { keywords, result }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Only stop words, so frequency analysis derives no keywords.
    fn bare_fifty_words() -> String {
        "the and for with that ".repeat(10)
    }

    /// Résumé that passes every rule with auto-derived keywords.
    pub(crate) fn strong_resume() -> String {
        let mut text = String::from("Jane Doe\njohn@x.com | 555-123-4567\n");
        text.push_str("Skills: rust, python, kubernetes, terraform, postgres, kafka\n");
        text.push_str("Experience\n");
        for i in 0..12 {
            text.push_str(&format!(
                "• Shipped backend service number {i} handling payments for retail customers across regions\n"
            ));
        }
        text.push_str("Education\nBachelor of Science in Computer Science, State University\n");
        text.push_str(&"Led reliability reviews and mentored engineers on production readiness. ".repeat(15));
        text
    }

    fn kw(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scenario_bare_document_scores_zero() {
        let text = bare_fifty_words();
        assert_eq!(text.split_whitespace().count(), 50);

        let result = analyze(&text, &[]);
        assert_eq!(result.score(), 0);
        let failures = result
            .details()
            .iter()
            .filter(|d| d.to_string().starts_with('❌'))
            .count();
        assert!(failures >= 5, "expected 5+ failures, got {failures}");
    }

    #[test]
    fn test_scenario_strong_resume_is_capped_at_95() {
        let text = strong_resume();
        let words = text.split_whitespace().count();
        assert!((200..=700).contains(&words), "word count {words}");

        let assessment = assess(&text, &[]);
        assert!(assessment.keywords.len() >= 6);
        assert_eq!(assessment.result.score(), 95);
        assert!(assessment
            .result
            .details()
            .iter()
            .any(|d| d.message.contains("No resume is ever truly perfect")));
    }

    #[test]
    fn test_scenario_supplied_keywords_absent_hits_none_found() {
        let text = strong_resume();
        let result = analyze(&text, &kw(&["docker", "kubernetes-operator"]));
        // strong résumé loses only the keyword rule: 100 - 40
        assert_eq!(result.score(), 60);
        assert!(result
            .details()
            .iter()
            .any(|d| d.message.starts_with("No target keywords found")));
    }

    #[test]
    fn test_supplied_keywords_bypass_auto_derivation() {
        let text = format!("{}\nOnce visited zanzibar.", strong_resume());
        let assessment = assess(&text, &kw(&["Zanzibar"]));
        assert_eq!(assessment.keywords.iter().collect::<Vec<_>>(), vec!["zanzibar"]);
        assert!(assessment
            .result
            .highlights()
            .iter()
            .any(|h| h.line == "Found: zanzibar"));
    }

    #[test]
    fn test_adding_contact_info_adds_exactly_twenty() {
        let body = strong_resume().replace("john@x.com | 555-123-4567\n", "");
        let keywords = kw(&["rust", "python", "kafka"]);
        let without = analyze(&body, &keywords);
        let with = analyze(
            &format!("{body}\nreach.me@example.org 555 123 4567"),
            &keywords,
        );
        assert_eq!(with.score(), without.score() + 20);
    }

    #[test]
    fn test_assess_scores_like_analyze() {
        let text = strong_resume();
        for supplied in [kw(&[]), kw(&["Rust", "", "rust", "Docker"]), kw(&[""])] {
            let assessment = assess(&text, &supplied);
            assert_eq!(assessment.result, analyze(&text, &supplied));
        }
        let derived = assess(&text, &[]).keywords;
        assert_eq!(derived.iter().next(), Some("rust"));
    }

    #[test]
    fn test_every_rule_reports_once() {
        let result = analyze(&bare_fifty_words(), &[]);
        assert_eq!(result.details().len(), rules::RULES.len());
    }

    #[test]
    fn test_empty_text_is_scored_not_rejected() {
        let result = analyze("", &[]);
        assert_eq!(result.score(), 0);
        assert_eq!(result.details().len(), rules::RULES.len());
    }

    proptest! {
        #[test]
        fn prop_score_within_bounds(text in "[a-z@.\\-• 0-9\n]{0,600}") {
            let result = analyze(&text, &[]);
            prop_assert!(result.score() <= 95);
        }

        #[test]
        fn prop_analysis_is_idempotent(text in ".{0,400}", kws in proptest::collection::vec("[a-z]{1,8}", 0..4)) {
            prop_assert_eq!(analyze(&text, &kws), analyze(&text, &kws));
        }
    }
}
