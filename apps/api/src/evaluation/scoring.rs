//! Resume scoring: rule-based heuristics over extracted resume text.
//!
//! Default: `HeuristicScorer` (pure, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn ResumeScorer>`, so another backend can be
//! dropped in without touching the handler.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::evaluation::feedback;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Result of evaluating one resume. Serialized as the endpoint's JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u32, // 0 – 100
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The resume scorer trait. Carried in `AppState` as `Arc<dyn ResumeScorer>`.
pub trait ResumeScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<AnalysisResult, AppError>;
}

/// Keyword and pattern based scorer. Never fails.
pub struct HeuristicScorer;

impl ResumeScorer for HeuristicScorer {
    fn score(&self, text: &str) -> Result<AnalysisResult, AppError> {
        Ok(analyze_resume(text))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rule table
// ────────────────────────────────────────────────────────────────────────────

/// Awarded to every submitted resume before clamping.
pub const BASE_SCORE: u32 = 20;
pub const MAX_SCORE: u32 = 100;

/// Inclusive bounds, in characters, for a resume of reasonable length.
pub const MIN_LENGTH: usize = 1500;
pub const MAX_LENGTH: usize = 6000;
const LENGTH_POINTS: u32 = 5;

const MIN_ACTION_VERBS: usize = 5;

const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "university",
    "college",
    "bachelor",
    "master",
    "phd",
    "degree",
];

const EXPERIENCE_KEYWORDS: &[&str] = &["experience", "work", "job", "position", "employment"];

const SKILLS_KEYWORDS: &[&str] = &["skills", "abilities", "proficient", "expertise"];

const ACTION_VERBS: &[&str] = &[
    "achieved",
    "implemented",
    "developed",
    "created",
    "managed",
    "led",
    "designed",
    "improved",
];

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+").unwrap());

// Optional +CC, then (ddd) or ddd, ddd, dddd with optional -, . or space separators.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[-.\s]?)?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap()
});

static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+%").unwrap());

// Matched against lowercased text; `.` stops at line ends.
static INCREASED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bincreased\b.*\b\d+\b").unwrap());
static DECREASED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bdecreased\b.*\b\d+\b").unwrap());

/// Resume text plus its lowercased form, computed once per analysis.
struct ResumeText<'a> {
    raw: &'a str,
    lower: String,
}

impl<'a> ResumeText<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lower: raw.to_lowercase(),
        }
    }

    fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.lower.contains(k))
    }
}

/// One independent check: points on success, narrative on either outcome.
struct Check {
    points: u32,
    passes: fn(&ResumeText) -> bool,
    strength: Option<&'static str>,
    weakness: Option<&'static str>,
    suggestion: Option<&'static str>,
}

/// Evaluated in order; the order only affects the order of feedback entries.
static CHECKS: &[Check] = &[
    Check {
        points: 5,
        passes: has_email,
        strength: None,
        weakness: Some(feedback::MISSING_EMAIL),
        suggestion: Some(feedback::ADD_EMAIL),
    },
    Check {
        points: 5,
        passes: has_phone,
        strength: None,
        weakness: Some(feedback::MISSING_PHONE),
        suggestion: Some(feedback::ADD_PHONE),
    },
    Check {
        points: 5,
        passes: has_linkedin,
        strength: Some(feedback::HAS_LINKEDIN),
        weakness: None,
        suggestion: Some(feedback::ADD_LINKEDIN),
    },
    Check {
        points: 10,
        passes: has_education,
        strength: Some(feedback::HAS_EDUCATION),
        weakness: Some(feedback::MISSING_EDUCATION),
        suggestion: Some(feedback::ADD_EDUCATION),
    },
    Check {
        points: 15,
        passes: has_experience,
        strength: Some(feedback::HAS_EXPERIENCE),
        weakness: Some(feedback::MISSING_EXPERIENCE),
        suggestion: Some(feedback::ADD_EXPERIENCE),
    },
    Check {
        points: 10,
        passes: has_skills,
        strength: Some(feedback::HAS_SKILLS),
        weakness: Some(feedback::MISSING_SKILLS),
        suggestion: Some(feedback::ADD_SKILLS),
    },
    Check {
        points: 10,
        passes: has_action_verbs,
        strength: Some(feedback::HAS_ACTION_VERBS),
        weakness: Some(feedback::FEW_ACTION_VERBS),
        suggestion: Some(feedback::ADD_ACTION_VERBS),
    },
    Check {
        points: 15,
        passes: has_quantified_achievements,
        strength: Some(feedback::HAS_METRICS),
        weakness: Some(feedback::MISSING_METRICS),
        suggestion: Some(feedback::ADD_METRICS),
    },
];

fn has_email(text: &ResumeText) -> bool {
    EMAIL_RE.is_match(text.raw)
}

fn has_phone(text: &ResumeText) -> bool {
    PHONE_RE.is_match(text.raw)
}

fn has_linkedin(text: &ResumeText) -> bool {
    text.lower.contains("linkedin.com")
}

fn has_education(text: &ResumeText) -> bool {
    text.mentions_any(EDUCATION_KEYWORDS)
}

fn has_experience(text: &ResumeText) -> bool {
    text.mentions_any(EXPERIENCE_KEYWORDS)
}

fn has_skills(text: &ResumeText) -> bool {
    text.mentions_any(SKILLS_KEYWORDS)
}

fn has_action_verbs(text: &ResumeText) -> bool {
    count_action_verbs(&text.lower) >= MIN_ACTION_VERBS
}

fn has_quantified_achievements(text: &ResumeText) -> bool {
    PERCENT_RE.is_match(text.raw)
        || INCREASED_RE.is_match(&text.lower)
        || DECREASED_RE.is_match(&text.lower)
}

/// Number of distinct action verbs present in already-lowercased text.
pub fn count_action_verbs(lower: &str) -> usize {
    ACTION_VERBS.iter().filter(|v| lower.contains(*v)).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthAssessment {
    TooShort,
    Appropriate,
    TooLong,
}

/// Classifies resume length by character count.
pub fn assess_length(text: &str) -> LengthAssessment {
    let chars = text.chars().count();
    if chars < MIN_LENGTH {
        LengthAssessment::TooShort
    } else if chars > MAX_LENGTH {
        LengthAssessment::TooLong
    } else {
        LengthAssessment::Appropriate
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Runs every check over `text` and aggregates points and feedback.
///
/// score = min(earned + BASE_SCORE, MAX_SCORE). Two general suggestions are
/// always appended, and a generic strength is added if no check produced one.
pub fn analyze_resume(text: &str) -> AnalysisResult {
    let resume = ResumeText::new(text);

    let mut earned = 0_u32;
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut suggestions = Vec::new();

    for check in CHECKS {
        if (check.passes)(&resume) {
            earned += check.points;
            strengths.extend(check.strength.map(String::from));
        } else {
            weaknesses.extend(check.weakness.map(String::from));
            suggestions.extend(check.suggestion.map(String::from));
        }
    }

    match assess_length(text) {
        LengthAssessment::TooShort => {
            weaknesses.push(feedback::TOO_SHORT.to_string());
            suggestions.push(feedback::EXPAND_RESUME.to_string());
        }
        LengthAssessment::TooLong => {
            weaknesses.push(feedback::TOO_LONG.to_string());
            suggestions.push(feedback::CONDENSE_RESUME.to_string());
        }
        LengthAssessment::Appropriate => {
            earned += LENGTH_POINTS;
            strengths.push(feedback::GOOD_LENGTH.to_string());
        }
    }

    suggestions.extend(feedback::GENERAL_SUGGESTIONS.iter().map(|s| s.to_string()));

    if strengths.is_empty() {
        strengths.push(feedback::FALLBACK_STRENGTH.to_string());
    }

    AnalysisResult {
        score: (earned + BASE_SCORE).min(MAX_SCORE),
        strengths,
        weaknesses,
        suggestions,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const STRONG_RESUME_CORE: &str = "Jane Doe\n\
        Contact: jane.doe@example.com, 555-123-4567. linkedin.com/in/janedoe\n\
        Education: Bachelor of Science, State University\n\
        Experience: Senior engineer. Developed and led projects, managed a team of 6,\n\
        designed the billing platform, implemented CI, achieved 99.9% uptime.\n\
        Increased sales by 20% in two quarters.\n\
        Skills: proficient in Rust, Go and SQL.\n";

    /// Pads `core` with neutral filler until it is exactly `len` characters.
    fn padded(core: &str, len: usize) -> String {
        let mut text = core.to_string();
        while text.chars().count() < len {
            text.push('.');
        }
        text
    }

    #[test]
    fn test_strong_resume_scores_max() {
        let result = analyze_resume(&padded(STRONG_RESUME_CORE, 2000));
        assert_eq!(result.score, 100);
        assert!(result.weaknesses.is_empty(), "{:?}", result.weaknesses);
        for expected in [
            feedback::HAS_LINKEDIN,
            feedback::HAS_EDUCATION,
            feedback::HAS_EXPERIENCE,
            feedback::HAS_SKILLS,
            feedback::HAS_ACTION_VERBS,
            feedback::HAS_METRICS,
            feedback::GOOD_LENGTH,
        ] {
            assert!(result.strengths.iter().any(|s| s == expected), "missing {expected}");
        }
        // only the two general suggestions remain
        assert_eq!(result.suggestions.len(), 2);
    }

    #[test]
    fn test_empty_text_gets_base_score_and_fallback() {
        let result = analyze_resume("");
        assert_eq!(result.score, BASE_SCORE);
        assert_eq!(result.strengths, vec![feedback::FALLBACK_STRENGTH.to_string()]);
        assert!(result.weaknesses.contains(&feedback::TOO_SHORT.to_string()));
    }

    #[test]
    fn test_no_fallback_when_a_strength_exists() {
        let result = analyze_resume("see linkedin.com/in/someone");
        assert_eq!(result.strengths, vec![feedback::HAS_LINKEDIN.to_string()]);
    }

    #[test]
    fn test_email_present_awards_points_without_feedback() {
        let result = analyze_resume("Reach me at jane.doe+cv@example.co.uk");
        assert_eq!(result.score, BASE_SCORE + 5);
        assert!(!result.weaknesses.iter().any(|w| w == feedback::MISSING_EMAIL));
        assert!(!result.suggestions.iter().any(|s| s == feedback::ADD_EMAIL));
    }

    #[test]
    fn test_email_missing_adds_weakness_and_suggestion() {
        let result = analyze_resume("no contact details");
        assert!(result.weaknesses.iter().any(|w| w == feedback::MISSING_EMAIL));
        assert!(result.suggestions.iter().any(|s| s == feedback::ADD_EMAIL));
    }

    #[test]
    fn test_bare_at_sign_is_not_an_email() {
        assert!(!has_email(&ResumeText::new("meet me @ noon")));
        assert!(!has_email(&ResumeText::new("user@localhost")));
    }

    #[test]
    fn test_dotted_domain_email_matches() {
        assert!(has_email(&ResumeText::new("a@b.com")));
        assert!(has_email(&ResumeText::new("Email: jane.doe+cv@mail.example.co.uk")));
        assert!(!has_email(&ResumeText::new("jane@company")));
    }

    #[test]
    fn test_phone_formats() {
        for phone in [
            "555-123-4567",
            "555 123 4567",
            "555.123.4567",
            "5551234567",
            "(555) 123-4567",
            "+1 555-123-4567",
            "+44-555-123-4567",
        ] {
            assert!(has_phone(&ResumeText::new(phone)), "{phone} not matched");
        }
    }

    #[test]
    fn test_phone_rejects_short_and_long_numbers() {
        assert!(!has_phone(&ResumeText::new("call 123-4567")));
        assert!(!has_phone(&ResumeText::new("id 555123456789")));
    }

    #[test]
    fn test_linkedin_is_case_insensitive() {
        assert!(has_linkedin(&ResumeText::new("LinkedIn.COM/in/x")));
    }

    #[test]
    fn test_linkedin_missing_is_suggestion_only() {
        let result = analyze_resume("nothing here");
        assert!(result.suggestions.iter().any(|s| s == feedback::ADD_LINKEDIN));
        assert!(!result.weaknesses.iter().any(|w| w.contains("LinkedIn")));
    }

    #[test]
    fn test_section_keywords_case_insensitive() {
        assert!(has_education(&ResumeText::new("PhD in Physics")));
        assert!(has_experience(&ResumeText::new("EMPLOYMENT HISTORY")));
        assert!(has_skills(&ResumeText::new("Areas of Expertise")));
        assert!(!has_skills(&ResumeText::new("Hobbies: chess")));
    }

    #[test]
    fn test_action_verbs_count_distinct() {
        assert_eq!(count_action_verbs("developed developed developed"), 1);
        assert_eq!(
            count_action_verbs("achieved implemented developed created managed"),
            5
        );
    }

    #[test]
    fn test_action_verbs_threshold() {
        assert!(!has_action_verbs(&ResumeText::new("Achieved, implemented, developed, created")));
        assert!(has_action_verbs(&ResumeText::new(
            "Achieved, implemented, developed, created, designed"
        )));
    }

    #[test]
    fn test_quantified_achievements() {
        assert!(has_quantified_achievements(&ResumeText::new("cut costs 15%.")));
        assert!(has_quantified_achievements(&ResumeText::new(
            "Increased revenue to 3 million"
        )));
        assert!(has_quantified_achievements(&ResumeText::new(
            "decreased churn over 12 months"
        )));
        assert!(!has_quantified_achievements(&ResumeText::new(
            "increased revenue significantly"
        )));
    }

    #[test]
    fn test_increased_does_not_span_lines() {
        assert!(!has_quantified_achievements(&ResumeText::new(
            "increased revenue\nteam of 5"
        )));
    }

    #[test]
    fn test_length_boundaries() {
        let filler = |n: usize| "x".repeat(n);
        assert_eq!(assess_length(&filler(1499)), LengthAssessment::TooShort);
        assert_eq!(assess_length(&filler(1500)), LengthAssessment::Appropriate);
        assert_eq!(assess_length(&filler(6000)), LengthAssessment::Appropriate);
        assert_eq!(assess_length(&filler(6001)), LengthAssessment::TooLong);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 1500 two-byte characters
        assert_eq!(assess_length(&"é".repeat(1500)), LengthAssessment::Appropriate);
    }

    #[test]
    fn test_length_feedback() {
        let short = analyze_resume(&"x".repeat(1499));
        assert_eq!(short.score, BASE_SCORE);
        assert!(short.weaknesses.contains(&feedback::TOO_SHORT.to_string()));

        let exact = analyze_resume(&"x".repeat(1500));
        assert_eq!(exact.score, BASE_SCORE + 5);
        assert_eq!(exact.strengths, vec![feedback::GOOD_LENGTH.to_string()]);

        let long = analyze_resume(&"x".repeat(6001));
        assert_eq!(long.score, BASE_SCORE);
        assert!(long.weaknesses.contains(&feedback::TOO_LONG.to_string()));
        assert!(long.suggestions.contains(&feedback::CONDENSE_RESUME.to_string()));
    }

    #[test]
    fn test_general_suggestions_always_last() {
        let result = analyze_resume("anything");
        let n = result.suggestions.len();
        assert_eq!(result.suggestions[n - 2], feedback::GENERAL_SUGGESTIONS[0]);
        assert_eq!(result.suggestions[n - 1], feedback::GENERAL_SUGGESTIONS[1]);
    }

    #[test]
    fn test_feedback_order_follows_checks() {
        let result = analyze_resume("");
        assert_eq!(result.weaknesses[0], feedback::MISSING_EMAIL);
        assert_eq!(result.weaknesses[1], feedback::MISSING_PHONE);
        assert_eq!(result.weaknesses.last().unwrap(), feedback::TOO_SHORT);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let text = padded(STRONG_RESUME_CORE, 1800);
        assert_eq!(analyze_resume(&text), analyze_resume(&text));
    }

    #[test]
    fn test_score_always_within_bounds() {
        let samples = [
            String::new(),
            "x".repeat(7000),
            padded(STRONG_RESUME_CORE, 1600),
            STRONG_RESUME_CORE.repeat(40),
        ];
        for text in &samples {
            let score = analyze_resume(text).score;
            assert!((BASE_SCORE..=MAX_SCORE).contains(&score), "score {score}");
        }
    }

    #[test]
    fn test_heuristic_scorer_matches_analyze() {
        let text = padded(STRONG_RESUME_CORE, 1700);
        let scored = HeuristicScorer.score(&text).unwrap();
        assert_eq!(scored, analyze_resume(&text));
    }

    #[test]
    fn test_result_serializes_to_flat_json() {
        let value = serde_json::to_value(analyze_resume("")).unwrap();
        assert_eq!(value["score"], 20);
        assert!(value["strengths"].is_array());
        assert!(value["weaknesses"].is_array());
        assert!(value["suggestions"].is_array());
    }
}
