//! Pairwise agreement scoring
//!
//! Compares two respondents' answers to the same ordered prompt list.
//!
//! **Multiple-choice variant:** answers are option indices. Identical indices
//! are exact matches; indices one apart are partial matches (neighbouring
//! options express similar preferences). The total score gives full credit per
//! exact match and 30% credit per partial match, capped at 100. The category
//! breakdown counts exact matches only.
//!
//! **Free-text variant:** answers are compared after trimming and lowercasing.
//! There is no partial credit and no category breakdown.
//!
//! Both variants are pure functions of their inputs and reject malformed input
//! with [`Error::InvalidInput`] instead of producing a score.

use serde::{Deserialize, Serialize};

use crate::prompts::{validate_choice_prompts, Category, ChoicePrompt, TextPrompt};
use crate::{Error, Result};

/// Credit given to a partial match, relative to an exact match
pub const PARTIAL_CREDIT: f64 = 30.0;

/// Upper bound of the multiple-choice total score
pub const MAX_SCORE: f64 = 100.0;

/// Scoring strategy over two complete response sets
///
/// Implemented by [`ChoiceScorer`] and [`TextScorer`]; drives
/// [`crate::collector::QuizRun`].
pub trait Scorer {
    /// One respondent's answer to one prompt
    type Answer: Clone;

    /// Result of scoring two complete response sets
    type Output;

    /// Number of prompts each respondent must answer
    fn prompt_count(&self) -> usize;

    /// Score two complete response sets
    fn score(&self, a: &[Self::Answer], b: &[Self::Answer]) -> Result<Self::Output>;
}

/// How one pair of multiple-choice answers compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Same option
    Exact,
    /// Neighbouring options
    Partial,
    Different,
}

impl MatchKind {
    fn classify(a: usize, b: usize) -> Self {
        match a.abs_diff(b) {
            0 => MatchKind::Exact,
            1 => MatchKind::Partial,
            _ => MatchKind::Different,
        }
    }
}

/// Exact matches within one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    /// Exact matches only
    pub matches: usize,
    pub total: usize,
    /// `round(matches / total * 100)`
    pub percentage: u32,
}

/// Compatibility band derived from the rounded total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementTier {
    /// 90 and above
    Soulmates,
    /// 75 to 89
    GreatMatch,
    /// 50 to 74
    GoodMatch,
    /// Below 50
    GrowingTogether,
}

impl AgreementTier {
    pub fn from_score(score: u32) -> Self {
        match score {
            90..=u32::MAX => AgreementTier::Soulmates,
            75..=89 => AgreementTier::GreatMatch,
            50..=74 => AgreementTier::GoodMatch,
            _ => AgreementTier::GrowingTogether,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgreementTier::Soulmates => "Soulmates",
            AgreementTier::GreatMatch => "Great Match",
            AgreementTier::GoodMatch => "Good Match",
            AgreementTier::GrowingTogether => "Growing Together",
        }
    }
}

impl std::fmt::Display for AgreementTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Multiple-choice scoring result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceAgreement {
    pub exact_matches: usize,
    pub partial_matches: usize,
    pub different_count: usize,
    /// Raw score in `[0, 100]`, not rounded
    pub total_score: f64,
    /// One entry per category, in first-seen prompt order
    pub category_breakdown: Vec<CategoryScore>,
    /// Per-prompt comparison, in prompt order
    pub outcomes: Vec<MatchKind>,
}

impl ChoiceAgreement {
    /// Total score rounded for display
    pub fn display_score(&self) -> u32 {
        self.total_score.round() as u32
    }

    pub fn tier(&self) -> AgreementTier {
        AgreementTier::from_score(self.display_score())
    }
}

/// Free-text scoring result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAgreement {
    pub match_count: usize,
    /// `round(match_count / N * 100)`
    pub match_percentage: u32,
    /// Per-prompt match flags, in prompt order
    pub matched: Vec<bool>,
}

fn rounded_percentage(part: usize, whole: usize) -> u32 {
    (part as f64 / whole as f64 * 100.0).round() as u32
}

fn check_lengths(n: usize, a: usize, b: usize) -> Result<()> {
    if n == 0 {
        return Err(Error::InvalidInput("prompt list is empty".to_string()));
    }
    if a != n || b != n {
        return Err(Error::InvalidInput(format!(
            "response sets must have {} answers (got {} and {})",
            n, a, b
        )));
    }
    Ok(())
}

/// Score two multiple-choice response sets
///
/// # Errors
/// [`Error::InvalidInput`] if the prompt list is empty, either response set
/// length differs from the prompt count, or any index is outside its prompt's
/// option range.
pub fn score_choices(
    prompts: &[ChoicePrompt],
    responses_a: &[usize],
    responses_b: &[usize],
) -> Result<ChoiceAgreement> {
    check_lengths(prompts.len(), responses_a.len(), responses_b.len())?;

    for (i, prompt) in prompts.iter().enumerate() {
        let limit = prompt.options.len();
        for (label, answer) in [("A", responses_a[i]), ("B", responses_b[i])] {
            if answer >= limit {
                return Err(Error::InvalidInput(format!(
                    "respondent {} answer {} to prompt {} is out of range (0..{})",
                    label, answer, i, limit
                )));
            }
        }
    }

    let outcomes: Vec<MatchKind> = responses_a
        .iter()
        .zip(responses_b)
        .map(|(&a, &b)| MatchKind::classify(a, b))
        .collect();

    let n = prompts.len();
    let exact_matches = outcomes.iter().filter(|&&o| o == MatchKind::Exact).count();
    let partial_matches = outcomes.iter().filter(|&&o| o == MatchKind::Partial).count();
    let different_count = n - exact_matches - partial_matches;

    let n_f = n as f64;
    let total_score = (exact_matches as f64 / n_f * 100.0
        + partial_matches as f64 / n_f * PARTIAL_CREDIT)
        .min(MAX_SCORE);

    let mut category_breakdown: Vec<CategoryScore> = Vec::new();
    for (prompt, outcome) in prompts.iter().zip(&outcomes) {
        let idx = match category_breakdown
            .iter()
            .position(|c| c.category == prompt.category)
        {
            Some(idx) => idx,
            None => {
                category_breakdown.push(CategoryScore {
                    category: prompt.category,
                    matches: 0,
                    total: 0,
                    percentage: 0,
                });
                category_breakdown.len() - 1
            }
        };
        let entry = &mut category_breakdown[idx];
        entry.total += 1;
        if *outcome == MatchKind::Exact {
            entry.matches += 1;
        }
    }
    for entry in &mut category_breakdown {
        entry.percentage = rounded_percentage(entry.matches, entry.total);
    }

    Ok(ChoiceAgreement {
        exact_matches,
        partial_matches,
        different_count,
        total_score,
        category_breakdown,
        outcomes,
    })
}

/// Normalize a free-text answer for comparison: trim, then lowercase
///
/// Punctuation and accents are left untouched.
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Score two free-text response sets
///
/// # Errors
/// [`Error::InvalidInput`] if the prompt list is empty or either response set
/// length differs from the prompt count.
pub fn score_text<S: AsRef<str>>(
    prompts: &[TextPrompt],
    responses_a: &[S],
    responses_b: &[S],
) -> Result<TextAgreement> {
    check_lengths(prompts.len(), responses_a.len(), responses_b.len())?;

    let matched: Vec<bool> = responses_a
        .iter()
        .zip(responses_b)
        .map(|(a, b)| normalize_answer(a.as_ref()) == normalize_answer(b.as_ref()))
        .collect();
    let match_count = matched.iter().filter(|&&m| m).count();

    Ok(TextAgreement {
        match_count,
        match_percentage: rounded_percentage(match_count, prompts.len()),
        matched,
    })
}

/// Multiple-choice scorer bound to a prompt list
#[derive(Debug, Clone)]
pub struct ChoiceScorer {
    prompts: Vec<ChoicePrompt>,
}

impl ChoiceScorer {
    /// Create a scorer, checking the prompt list's structural contract
    pub fn new(prompts: Vec<ChoicePrompt>) -> Result<Self> {
        validate_choice_prompts(&prompts)?;
        Ok(Self { prompts })
    }

    /// Scorer over the built-in compatibility quiz
    pub fn standard() -> Self {
        Self {
            prompts: crate::prompts::choice_prompts().to_vec(),
        }
    }

    pub fn prompts(&self) -> &[ChoicePrompt] {
        &self.prompts
    }
}

impl Scorer for ChoiceScorer {
    type Answer = usize;
    type Output = ChoiceAgreement;

    fn prompt_count(&self) -> usize {
        self.prompts.len()
    }

    fn score(&self, a: &[usize], b: &[usize]) -> Result<ChoiceAgreement> {
        score_choices(&self.prompts, a, b)
    }
}

/// Free-text scorer bound to a prompt list
#[derive(Debug, Clone)]
pub struct TextScorer {
    prompts: Vec<TextPrompt>,
}

impl TextScorer {
    pub fn new(prompts: Vec<TextPrompt>) -> Result<Self> {
        if prompts.is_empty() {
            return Err(Error::InvalidInput("prompt list is empty".to_string()));
        }
        Ok(Self { prompts })
    }

    /// Scorer over the built-in free-text quiz
    pub fn standard() -> Self {
        Self {
            prompts: crate::prompts::text_prompts().to_vec(),
        }
    }

    pub fn prompts(&self) -> &[TextPrompt] {
        &self.prompts
    }
}

impl Scorer for TextScorer {
    type Answer = String;
    type Output = TextAgreement;

    fn prompt_count(&self) -> usize {
        self.prompts.len()
    }

    fn score(&self, a: &[String], b: &[String]) -> Result<TextAgreement> {
        score_text(&self.prompts, a, b)
    }
}
