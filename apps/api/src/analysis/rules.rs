//! Rule table — the ordered, independent ATS checks.
//!
//! Every rule sees the same read-only [`Document`] and returns a [`RuleOutcome`].
//! Rules never short-circuit each other; the aggregator only sums deltas, so a new
//! check is added by appending a [`Rule`] to [`RULES`].
//!
//! # Canonical rule set
//! | rule | fail delta |
//! |---|---|
//! | contact info (email + phone) | −20 |
//! | section headings | −30 |
//! | length (200–700 words) | −15 |
//! | bullet density | −15 severe / −10 moderate |
//! | keyword coverage | −40 / −35 / −25 |
//! | formatting blockers | −10 |
//! | font / color advisory | 0 |

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::keywords::KeywordSet;
use crate::analysis::models::{Finding, Highlight, RuleOutcome};
use crate::analysis::normalize::NormalizedText;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("email pattern is valid")
});

/// Phone candidates: optional `+`, digits separated by spaces or hyphens.
static PHONE_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d -]{6,}\d").expect("phone pattern is valid"));

static FORMATTING_BLOCKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:table|column|image|img)\b").expect("blocker pattern is valid")
});

const MIN_PHONE_DIGITS: usize = 8;
const REQUIRED_HEADINGS: &[&str] = &["education", "experience", "skills"];
const MIN_WORDS: usize = 200;
const MAX_WORDS: usize = 700;
const BULLET_GLYPHS: &[char] = &['•', '-'];

/// Placeholder evidence when the document has no usable line to point at.
const EMPTY_DOCUMENT_LINE: &str = "(document has no readable lines)";

// ────────────────────────────────────────────────────────────────────────────
// Rule descriptors
// ────────────────────────────────────────────────────────────────────────────

/// Everything a rule may inspect. Borrowed for the duration of one analysis.
pub struct Document<'a> {
    pub raw: &'a str,
    pub text: &'a NormalizedText,
    pub keywords: &'a KeywordSet,
}

impl Document<'_> {
    fn first_line_or_placeholder(&self) -> String {
        self.text
            .first_line()
            .unwrap_or(EMPTY_DOCUMENT_LINE)
            .to_string()
    }

    fn word_count(&self) -> usize {
        self.raw.split_whitespace().count()
    }

    fn bullet_count(&self) -> usize {
        self.raw.chars().filter(|c| BULLET_GLYPHS.contains(c)).count()
    }
}

pub struct Rule {
    pub name: &'static str,
    pub evaluate: fn(&Document<'_>) -> RuleOutcome,
}

/// Evaluation order is output order. Score is order-independent.
pub const RULES: &[Rule] = &[
    Rule {
        name: "contact_info",
        evaluate: check_contact_info,
    },
    Rule {
        name: "section_headings",
        evaluate: check_section_headings,
    },
    Rule {
        name: "length",
        evaluate: check_length,
    },
    Rule {
        name: "bullet_density",
        evaluate: check_bullet_density,
    },
    Rule {
        name: "keyword_coverage",
        evaluate: check_keyword_coverage,
    },
    Rule {
        name: "formatting_blockers",
        evaluate: check_formatting_blockers,
    },
    Rule {
        name: "font_color_advisory",
        evaluate: font_color_advisory,
    },
];

/// Runs every rule in [`RULES`] against `doc`.
pub fn evaluate_all(doc: &Document<'_>) -> Vec<RuleOutcome> {
    RULES
        .iter()
        .map(|rule| {
            let outcome = (rule.evaluate)(doc);
            tracing::debug!(rule = rule.name, delta = outcome.delta, "rule evaluated");
            outcome
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tiered thresholds
// ────────────────────────────────────────────────────────────────────────────

/// One degraded band of a count-based rule. The first tier with `count < below` applies.
struct Tier {
    below: usize,
    delta: i32,
    label: &'static str,
}

const BULLET_TIERS: &[Tier] = &[
    Tier {
        below: 5,
        delta: -15,
        label: "Very few bullet points",
    },
    Tier {
        below: 10,
        delta: -10,
        label: "Few bullet points",
    },
];

const KEYWORD_TIERS: &[Tier] = &[
    Tier {
        below: 1,
        delta: -40,
        label: "No target keywords found",
    },
    Tier {
        below: 3,
        delta: -35,
        label: "Very few target keywords found",
    },
    Tier {
        below: 5,
        delta: -25,
        label: "Some target keywords found",
    },
];

fn tier_for(count: usize, tiers: &'static [Tier]) -> Option<&'static Tier> {
    tiers.iter().find(|tier| count < tier.below)
}

// ────────────────────────────────────────────────────────────────────────────
// Checks
// ────────────────────────────────────────────────────────────────────────────

fn is_phone_like(candidate: &str) -> bool {
    candidate.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

fn has_phone(text: &str) -> bool {
    PHONE_CANDIDATE
        .find_iter(text)
        .any(|m| is_phone_like(m.as_str()))
}

fn check_contact_info(doc: &Document<'_>) -> RuleOutcome {
    let email_found = EMAIL.is_match(&doc.text.lower);
    let phone_found = has_phone(doc.raw);

    if email_found && phone_found {
        return RuleOutcome::passed(Finding::pass("Contact info found (email and phone)"));
    }

    let missing: Vec<&str> = [
        (!email_found).then_some("email"),
        (!phone_found).then_some("phone"),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut outcome = RuleOutcome::penalized(
        -20,
        Finding::fail(format!("Missing contact info: {}", missing.join(", "))),
    )
    .suggest("Add a professional email address and a phone number at the top of your resume.");

    if !email_found {
        let line = doc
            .text
            .line_matching(has_phone)
            .map(str::to_string)
            .unwrap_or_else(|| doc.first_line_or_placeholder());
        outcome = outcome.highlight(Highlight::new("No email address detected", line));
    }
    if !phone_found {
        let line = doc
            .text
            .line_containing("@")
            .map(str::to_string)
            .unwrap_or_else(|| doc.first_line_or_placeholder());
        outcome = outcome.highlight(Highlight::new("No phone number detected", line));
    }
    outcome
}

fn check_section_headings(doc: &Document<'_>) -> RuleOutcome {
    let missing: Vec<&str> = REQUIRED_HEADINGS
        .iter()
        .copied()
        .filter(|heading| !doc.text.lower.contains(heading))
        .collect();

    if missing.is_empty() {
        return RuleOutcome::passed(Finding::pass(
            "Standard sections found (Education, Experience, Skills)",
        ));
    }

    let mut outcome = RuleOutcome::penalized(
        -30,
        Finding::fail(format!("Missing standard sections: {}", missing.join(", "))),
    )
    .suggest(format!(
        "Add clearly labelled section headings for: {}.",
        missing.join(", ")
    ));
    for heading in missing {
        outcome = outcome.highlight(Highlight::new(
            format!("Missing '{heading}' section"),
            format!("No '{heading}' heading found in the document"),
        ));
    }
    outcome
}

fn check_length(doc: &Document<'_>) -> RuleOutcome {
    let words = doc.word_count();
    let evidence = Highlight::new(
        format!("Word count is {words}"),
        format!("Document contains {words} words"),
    );

    if words < MIN_WORDS {
        RuleOutcome::penalized(
            -15,
            Finding::fail(format!("Resume is too short ({words} words)")),
        )
        .suggest(format!(
            "Expand your resume to at least {MIN_WORDS} words with achievements and responsibilities."
        ))
        .highlight(evidence)
    } else if words > MAX_WORDS {
        RuleOutcome::penalized(
            -15,
            Finding::fail(format!("Resume is too long ({words} words)")),
        )
        .suggest(format!(
            "Trim your resume to under {MAX_WORDS} words; keep only the most relevant content."
        ))
        .highlight(evidence)
    } else {
        RuleOutcome::passed(Finding::pass(format!("Resume length is good ({words} words)")))
    }
}

fn check_bullet_density(doc: &Document<'_>) -> RuleOutcome {
    let bullets = doc.bullet_count();

    match tier_for(bullets, BULLET_TIERS) {
        None => RuleOutcome::passed(Finding::pass(format!(
            "Good use of bullet points ({bullets})"
        ))),
        Some(tier) => RuleOutcome::penalized(
            tier.delta,
            Finding::fail(format!("{} ({bullets})", tier.label)),
        )
        .suggest("Use bullet points to list responsibilities and quantified achievements.")
        .highlight(Highlight::new(
            tier.label,
            format!("Found {bullets} bullet points"),
        )),
    }
}

fn check_keyword_coverage(doc: &Document<'_>) -> RuleOutcome {
    let (found, missing): (Vec<&str>, Vec<&str>) = doc
        .keywords
        .iter()
        .partition(|kw| doc.text.lower.contains(kw));

    let Some(tier) = tier_for(found.len(), KEYWORD_TIERS) else {
        return RuleOutcome::passed(Finding::pass(format!(
            "Strong keyword coverage ({}/{} keywords found)",
            found.len(),
            doc.keywords.len()
        )));
    };

    let evidence_line = if found.is_empty() {
        "None of the target keywords appear in the document".to_string()
    } else {
        format!("Found: {}", found.join(", "))
    };

    let mut outcome = RuleOutcome::penalized(
        tier.delta,
        Finding::fail(format!(
            "{} ({}/{})",
            tier.label,
            found.len(),
            doc.keywords.len()
        )),
    )
    .highlight(Highlight::new(tier.label, evidence_line));

    if missing.is_empty() {
        outcome = outcome.suggest("Add more role-specific keywords from the job description.");
    } else {
        let sample: Vec<&str> = missing.iter().copied().take(5).collect();
        outcome = outcome.suggest(format!(
            "Add relevant keywords from the job description, e.g.: {}.",
            sample.join(", ")
        ));
    }
    outcome
}

fn check_formatting_blockers(doc: &Document<'_>) -> RuleOutcome {
    let Some(hit) = FORMATTING_BLOCKER.find(&doc.text.lower) else {
        return RuleOutcome::passed(Finding::pass("No tables, columns or images detected"));
    };

    let line = doc
        .text
        .line_matching(|line| FORMATTING_BLOCKER.is_match(&line.to_lowercase()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Mentions '{}'", hit.as_str()));

    RuleOutcome::penalized(
        -10,
        Finding::fail("Possible tables, columns or images detected"),
    )
    .suggest("Avoid tables, multi-column layouts and images; many ATS parsers cannot read them.")
    .highlight(Highlight::new(
        "Tables, columns or images can break ATS parsing",
        line,
    ))
}

fn font_color_advisory(_doc: &Document<'_>) -> RuleOutcome {
    RuleOutcome::passed(Finding::info(
        "Fonts and colors cannot be checked from extracted text",
    ))
    .suggest(
        "Use a standard font (Arial, Calibri, Times New Roman) and dark text on a white background.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::FindingStatus;
    use crate::analysis::normalize::normalize;

    fn run(raw: &str, keywords: &[&str], rule: fn(&Document<'_>) -> RuleOutcome) -> RuleOutcome {
        let text = normalize(raw);
        let keywords = KeywordSet::from_tokens(keywords);
        let doc = Document {
            raw,
            text: &text,
            keywords: &keywords,
        };
        rule(&doc)
    }

    #[test]
    fn test_contact_passes_with_email_and_phone() {
        let o = run("jane@example.com\n+1 555-123-4567", &[], check_contact_info);
        assert_eq!(o.delta, 0);
        assert!(o.highlights.is_empty());
    }

    #[test]
    fn test_contact_missing_both_emits_two_highlights() {
        let o = run("Jane Doe\nEngineer", &[], check_contact_info);
        assert_eq!(o.delta, -20);
        assert_eq!(o.highlights.len(), 2);
        assert_eq!(o.highlights[0].line, "Jane Doe");
        assert!(o.finding.message.contains("email, phone"));
    }

    #[test]
    fn test_missing_phone_points_at_email_line() {
        let o = run("Jane Doe\nContact: jane@example.com", &[], check_contact_info);
        assert_eq!(o.delta, -20);
        assert_eq!(o.highlights.len(), 1);
        assert_eq!(o.highlights[0].line, "Contact: jane@example.com");
    }

    #[test]
    fn test_missing_email_points_at_phone_line() {
        let o = run("Jane Doe\nCall 555 123 4567", &[], check_contact_info);
        assert_eq!(o.highlights.len(), 1);
        assert_eq!(o.highlights[0].line, "Call 555 123 4567");
    }

    #[test]
    fn test_short_digit_runs_are_not_phones() {
        assert!(!has_phone("class of 2019"));
        assert!(!has_phone("123-4567"));
        assert!(has_phone("+44 20 7946 0958"));
    }

    #[test]
    fn test_sections_reports_each_missing_heading() {
        let o = run("Experience at Acme", &[], check_section_headings);
        assert_eq!(o.delta, -30);
        let reasons: Vec<&str> = o.highlights.iter().map(|h| h.reason.as_str()).collect();
        assert_eq!(reasons, vec!["Missing 'education' section", "Missing 'skills' section"]);
    }

    #[test]
    fn test_sections_match_case_insensitively() {
        let o = run("EDUCATION\nExperience\nSkills", &[], check_section_headings);
        assert_eq!(o.delta, 0);
    }

    #[test]
    fn test_length_bounds() {
        let short = "word ".repeat(199);
        let ok_low = "word ".repeat(200);
        let ok_high = "word ".repeat(700);
        let long = "word ".repeat(701);
        assert_eq!(run(&short, &[], check_length).delta, -15);
        assert_eq!(run(&ok_low, &[], check_length).delta, 0);
        assert_eq!(run(&ok_high, &[], check_length).delta, 0);
        assert_eq!(run(&long, &[], check_length).delta, -15);
    }

    #[test]
    fn test_length_highlight_reports_word_count() {
        let o = run("only three words", &[], check_length);
        assert_eq!(o.highlights[0].reason, "Word count is 3");
    }

    #[test]
    fn test_bullet_tiers() {
        assert_eq!(run(&"• x\n".repeat(4), &[], check_bullet_density).delta, -15);
        assert_eq!(run(&"• x\n".repeat(5), &[], check_bullet_density).delta, -10);
        assert_eq!(run(&"- x\n".repeat(9), &[], check_bullet_density).delta, -10);
        assert_eq!(run(&"- x\n".repeat(10), &[], check_bullet_density).delta, 0);
    }

    #[test]
    fn test_degraded_tiers_are_reported_as_failures() {
        let o = run(&"• x\n".repeat(7), &[], check_bullet_density);
        assert_eq!(o.delta, -10);
        assert_eq!(o.finding.status, FindingStatus::Fail);
        assert!(o.finding.to_string().starts_with('❌'));
        assert_eq!(o.highlights[0].line, "Found 7 bullet points");
    }

    #[test]
    fn test_keyword_tiers() {
        let kws = ["rust", "go", "sql", "kafka", "docker", "aws"];
        assert_eq!(run("nothing here", &kws, check_keyword_coverage).delta, -40);
        assert_eq!(run("rust go", &kws, check_keyword_coverage).delta, -35);
        let some = run("rust go sql kafka", &kws, check_keyword_coverage);
        assert_eq!(some.delta, -25);
        assert_eq!(some.finding.status, FindingStatus::Fail);
        assert_eq!(run("rust go sql kafka docker", &kws, check_keyword_coverage).delta, 0);
    }

    #[test]
    fn test_keyword_highlight_lists_found_keywords() {
        let o = run("Rust and SQL", &["rust", "sql", "kafka"], check_keyword_coverage);
        assert_eq!(o.highlights[0].line, "Found: rust, sql");
        assert!(o.suggestions[0].contains("kafka"));
    }

    #[test]
    fn test_keyword_none_found_notice() {
        let o = run("plain text", &["docker"], check_keyword_coverage);
        assert_eq!(
            o.highlights[0].line,
            "None of the target keywords appear in the document"
        );
    }

    #[test]
    fn test_empty_keyword_set_counts_as_none_found() {
        assert_eq!(run("", &[], check_keyword_coverage).delta, -40);
    }

    #[test]
    fn test_formatting_blockers_word_boundary() {
        assert_eq!(run("See the table below", &[], check_formatting_blockers).delta, -10);
        assert_eq!(run("Two-Column layout", &[], check_formatting_blockers).delta, -10);
        assert_eq!(run("<img src=x>", &[], check_formatting_blockers).delta, -10);
        assert_eq!(run("Comfortable with tables", &[], check_formatting_blockers).delta, 0);
        assert_eq!(run("imagery and notable work", &[], check_formatting_blockers).delta, 0);
    }

    #[test]
    fn test_formatting_blocker_highlights_matching_line() {
        let o = run("Jane\nPortfolio image attached", &[], check_formatting_blockers);
        assert_eq!(o.highlights[0].line, "Portfolio image attached");
    }

    #[test]
    fn test_advisory_never_changes_score() {
        let o = run("", &[], font_color_advisory);
        assert_eq!(o.delta, 0);
        assert_eq!(o.finding.status, FindingStatus::Info);
        assert_eq!(o.suggestions.len(), 1);
    }

    #[test]
    fn test_rule_table_order() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "contact_info",
                "section_headings",
                "length",
                "bullet_density",
                "keyword_coverage",
                "formatting_blockers",
                "font_color_advisory",
            ]
        );
    }

    #[test]
    fn test_empty_document_uses_placeholder_line() {
        let o = run("", &[], check_contact_info);
        assert!(o.highlights.iter().all(|h| h.line == EMPTY_DOCUMENT_LINE));
    }
}
