//! Prompt fixtures for the compatibility quizzes
//!
//! Both quizzes run over a fixed, ordered prompt list shared by the two
//! respondents. The lists below are static seed data and never change at
//! runtime.
//!
//! - Multiple-choice quiz: 15 prompts, 5 categories × 3 prompts. Options are
//!   ordered so that neighbouring options express similar preferences; the
//!   scorer relies on this for partial credit.
//! - Free-text quiz: 10 prompts. Categories are for display only.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Prompt category
///
/// Closed set so per-category aggregation can be matched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    // Multiple-choice quiz
    Communication,
    Values,
    Lifestyle,
    Romance,
    Future,

    // Free-text quiz (display only)
    Favorites,
    Memories,
    Dreams,
}

impl Category {
    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Communication => "Communication",
            Category::Values => "Values",
            Category::Lifestyle => "Lifestyle",
            Category::Romance => "Romance",
            Category::Future => "Future",
            Category::Favorites => "Favorites",
            Category::Memories => "Memories",
            Category::Dreams => "Dreams",
        }
    }

    /// Parse category from its lowercase tag (case insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "communication" => Some(Category::Communication),
            "values" => Some(Category::Values),
            "lifestyle" => Some(Category::Lifestyle),
            "romance" => Some(Category::Romance),
            "future" => Some(Category::Future),
            "favorites" | "favourites" => Some(Category::Favorites),
            "memories" => Some(Category::Memories),
            "dreams" => Some(Category::Dreams),
            _ => None,
        }
    }

    /// All category variants in declaration order
    pub fn all_variants() -> &'static [Category] {
        &[
            Category::Communication,
            Category::Values,
            Category::Lifestyle,
            Category::Romance,
            Category::Future,
            Category::Favorites,
            Category::Memories,
            Category::Dreams,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicePrompt {
    /// Position in the prompt list
    pub id: usize,
    pub category: Category,
    pub text: String,
    /// Ordered answer options (at least two)
    pub options: Vec<String>,
}

/// One free-text question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPrompt {
    /// Position in the prompt list
    pub id: usize,
    pub category: Category,
    pub text: String,
}

fn choice(id: usize, category: Category, text: &str, options: [&str; 4]) -> ChoicePrompt {
    ChoicePrompt {
        id,
        category,
        text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
    }
}

fn text(id: usize, category: Category, text: &str) -> TextPrompt {
    TextPrompt {
        id,
        category,
        text: text.to_string(),
    }
}

static CHOICE_PROMPTS: Lazy<Vec<ChoicePrompt>> = Lazy::new(|| {
    use Category::*;
    vec![
        choice(0, Communication, "How do you prefer to resolve a disagreement?", [
            "Talk it through right away",
            "Take a short break, then talk",
            "Sleep on it and talk tomorrow",
            "Let it go unless it comes up again",
        ]),
        choice(1, Communication, "How often do you like to check in during the day?", [
            "Constantly",
            "A few times a day",
            "Once a day",
            "Only when something comes up",
        ]),
        choice(2, Communication, "How do you show you are upset?", [
            "I say so immediately",
            "I bring it up gently later",
            "I hint at it",
            "I keep it to myself",
        ]),
        choice(3, Values, "How important is family involvement in our decisions?", [
            "Essential",
            "Very important",
            "Somewhat important",
            "Not important",
        ]),
        choice(4, Values, "How should we handle money as a couple?", [
            "Fully shared accounts",
            "Mostly shared, some personal",
            "Mostly separate, some shared",
            "Fully separate",
        ]),
        choice(5, Values, "How much does faith or spirituality matter to you?", [
            "It is central to my life",
            "It matters a lot",
            "It matters a little",
            "It does not matter",
        ]),
        choice(6, Lifestyle, "What is your ideal weekend?", [
            "Out with friends all weekend",
            "One social plan, one quiet day",
            "Mostly relaxing at home",
            "Completely unplugged at home",
        ]),
        choice(7, Lifestyle, "When do you feel most energetic?", [
            "Early morning",
            "Late morning",
            "Afternoon",
            "Late night",
        ]),
        choice(8, Lifestyle, "How tidy should our home be?", [
            "Spotless at all times",
            "Mostly tidy",
            "Lived-in",
            "Organized chaos",
        ]),
        choice(9, Romance, "What is your favorite kind of date?", [
            "Fancy dinner",
            "Casual restaurant",
            "Cooking together at home",
            "Takeout on the couch",
        ]),
        choice(10, Romance, "How do you most like to receive love?", [
            "Words of affirmation",
            "Quality time",
            "Physical touch",
            "Acts of service",
        ]),
        choice(11, Romance, "How often should we plan a surprise for each other?", [
            "Every week",
            "Every month",
            "A few times a year",
            "Only on special occasions",
        ]),
        choice(12, Future, "Where would you like to live in ten years?", [
            "Big city",
            "Suburbs",
            "Small town",
            "Countryside",
        ]),
        choice(13, Future, "How many children would you like?", [
            "None",
            "One",
            "Two",
            "Three or more",
        ]),
        choice(14, Future, "What does retirement look like for you?", [
            "Travelling the world",
            "Splitting time between travel and home",
            "Staying close to family",
            "Never fully retiring",
        ]),
    ]
});

static TEXT_PROMPTS: Lazy<Vec<TextPrompt>> = Lazy::new(|| {
    use Category::*;
    vec![
        text(0, Favorites, "What is my favorite food?"),
        text(1, Favorites, "What is my favorite movie?"),
        text(2, Favorites, "What is my favorite color?"),
        text(3, Favorites, "What is my favorite song?"),
        text(4, Memories, "Where did we first meet?"),
        text(5, Memories, "Where did we go on our first date?"),
        text(6, Memories, "What was the first gift I gave you?"),
        text(7, Dreams, "Where is my dream vacation?"),
        text(8, Dreams, "What is my dream job?"),
        text(9, Dreams, "What city would I most like to live in?"),
    ]
});

/// The multiple-choice compatibility quiz prompts
pub fn choice_prompts() -> &'static [ChoicePrompt] {
    &CHOICE_PROMPTS
}

/// The free-text "how well do you know me" prompts
pub fn text_prompts() -> &'static [TextPrompt] {
    &TEXT_PROMPTS
}

/// Check the structural contract of a multiple-choice prompt list
///
/// The list must be non-empty and every prompt must offer at least two options.
pub fn validate_choice_prompts(prompts: &[ChoicePrompt]) -> Result<()> {
    if prompts.is_empty() {
        return Err(Error::InvalidInput("prompt list is empty".to_string()));
    }
    if let Some(p) = prompts.iter().find(|p| p.options.len() < 2) {
        return Err(Error::InvalidInput(format!(
            "prompt {} has {} option(s), at least 2 required",
            p.id,
            p.options.len()
        )));
    }
    Ok(())
}
