use serde::Serialize;

/// Score band shown next to the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    VeryLow,
    Low,
    BelowAverage,
    GettingCloser,
    Decent,
    Good,
    Excellent,
}

impl Rating {
    pub fn for_score(score: u32) -> Self {
        match score {
            0..=39 => Rating::VeryLow,
            40..=49 => Rating::Low,
            50..=59 => Rating::BelowAverage,
            60..=69 => Rating::GettingCloser,
            70..=79 => Rating::Decent,
            80..=89 => Rating::Good,
            _ => Rating::Excellent,
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Rating::VeryLow => "Very low ATS compatibility. Add missing sections, contact info and relevant keywords.",
            Rating::Low => "Low ATS compatibility. Add more detail, use bullet points and include job-specific keywords.",
            Rating::BelowAverage => "Below average. Tailor your resume with relevant skills, achievements and clear formatting.",
            Rating::GettingCloser => "Getting closer. Add job-specific keywords, quantify achievements and tighten the structure.",
            Rating::Decent => "Decent. Your resume is somewhat ATS-friendly; more keywords and clarity would help.",
            Rating::Good => "Good. Your resume is ATS-friendly; a few targeted tweaks could make it better.",
            Rating::Excellent => "Excellent. Your resume is highly ATS-friendly; review the suggestions and tailor it for each job.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub rating: Rating,
    pub summary: &'static str,
}

pub fn verdict_for(score: u32) -> Verdict {
    let rating = Rating::for_score(score);
    Verdict {
        rating,
        summary: rating.summary(),
    }
}
