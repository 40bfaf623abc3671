//! # Duet Common Library
//!
//! Shared code for the Duet couple games:
//! - Prompt fixtures for the compatibility quizzes
//! - Agreement scoring (multiple-choice and free-text variants)
//! - Two-phase response collection
//! - Truth-or-dare picker and memory-match game
//! - Configuration loading

pub mod collector;
pub mod config;
pub mod error;
pub mod memory;
pub mod picker;
pub mod prompts;
pub mod scoring;

pub use collector::{Phase, QuizRun, ResponseCollector};
pub use error::{Error, Result};
pub use prompts::{Category, ChoicePrompt, TextPrompt};
pub use scoring::{ChoiceAgreement, ChoiceScorer, Scorer, TextAgreement, TextScorer};
