//! Two-phase response collection
//!
//! Respondent A answers every prompt, then respondent B answers the same
//! prompts in the same order. Only once both response sets are full is the
//! scorer invoked.
//!
//! ```text
//! CollectingA(0) → … → CollectingA(N-1) → CollectingB(0) → … → CollectingB(N-1) → Complete
//!        ↑                                                                           │
//!        └────────────────────────────── reset() ────────────────────────────────────┘
//! ```
//!
//! Submitting an answer in `Complete` is rejected with
//! [`Error::InvalidState`]; the response sets are left untouched until an
//! explicit [`ResponseCollector::reset`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::scoring::Scorer;
use crate::{Error, Result};

/// Collection phase; the index is the prompt awaiting an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "index", rename_all = "snake_case")]
pub enum Phase {
    CollectingA(usize),
    CollectingB(usize),
    Complete,
}

impl Phase {
    /// Index of the prompt awaiting an answer, if any
    pub fn prompt_index(&self) -> Option<usize> {
        match self {
            Phase::CollectingA(i) | Phase::CollectingB(i) => Some(*i),
            Phase::Complete => None,
        }
    }
}

/// Gathers one response set per respondent, A fully before B
///
/// Performs no validation of the answers themselves.
#[derive(Debug, Clone)]
pub struct ResponseCollector<A> {
    prompt_count: usize,
    phase: Phase,
    responses_a: Vec<A>,
    responses_b: Vec<A>,
}

impl<A> ResponseCollector<A> {
    /// Create a collector for `prompt_count` prompts (must be at least 1)
    pub fn new(prompt_count: usize) -> Result<Self> {
        if prompt_count == 0 {
            return Err(Error::InvalidInput(
                "collector needs at least one prompt".to_string(),
            ));
        }
        Ok(Self {
            prompt_count,
            phase: Phase::CollectingA(0),
            responses_a: Vec::with_capacity(prompt_count),
            responses_b: Vec::with_capacity(prompt_count),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn prompt_count(&self) -> usize {
        self.prompt_count
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn responses_a(&self) -> &[A] {
        &self.responses_a
    }

    pub fn responses_b(&self) -> &[A] {
        &self.responses_b
    }

    /// Record the answer for the current prompt and advance
    ///
    /// Returns the new phase.
    ///
    /// # Errors
    /// [`Error::InvalidState`] when the collector is already complete.
    pub fn submit(&mut self, answer: A) -> Result<Phase> {
        let n = self.prompt_count;
        self.phase = match self.phase {
            Phase::CollectingA(i) => {
                self.responses_a.push(answer);
                if i + 1 < n {
                    Phase::CollectingA(i + 1)
                } else {
                    Phase::CollectingB(0)
                }
            }
            Phase::CollectingB(i) => {
                self.responses_b.push(answer);
                if i + 1 < n {
                    Phase::CollectingB(i + 1)
                } else {
                    Phase::Complete
                }
            }
            Phase::Complete => {
                return Err(Error::InvalidState(
                    "both respondents have finished; reset before answering again".to_string(),
                ));
            }
        };
        Ok(self.phase)
    }

    /// Clear both response sets and return to `CollectingA(0)`
    pub fn reset(&mut self) {
        self.responses_a.clear();
        self.responses_b.clear();
        self.phase = Phase::CollectingA(0);
    }
}

/// One quiz play-through: a collector bound to a scorer
///
/// The scorer runs exactly once, on the transition into `Complete`. The
/// result then stays fixed until [`QuizRun::reset`].
pub struct QuizRun<S: Scorer> {
    scorer: S,
    collector: ResponseCollector<S::Answer>,
    result: Option<S::Output>,
}

impl<S: Scorer> QuizRun<S> {
    pub fn new(scorer: S) -> Result<Self> {
        let collector = ResponseCollector::new(scorer.prompt_count())?;
        Ok(Self {
            scorer,
            collector,
            result: None,
        })
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn phase(&self) -> Phase {
        self.collector.phase()
    }

    pub fn collector(&self) -> &ResponseCollector<S::Answer> {
        &self.collector
    }

    /// Scoring result, available once both respondents have finished
    pub fn result(&self) -> Option<&S::Output> {
        self.result.as_ref()
    }

    /// Submit the current respondent's answer
    ///
    /// When this answer completes respondent B's set the scorer runs. A
    /// scoring failure is returned to the caller and leaves the run complete
    /// without a result; only [`QuizRun::reset`] recovers from it.
    pub fn submit(&mut self, answer: S::Answer) -> Result<Phase> {
        let phase = self.collector.submit(answer)?;
        if phase == Phase::Complete {
            match self
                .scorer
                .score(self.collector.responses_a(), self.collector.responses_b())
            {
                Ok(output) => {
                    debug!(prompts = self.collector.prompt_count(), "Quiz run scored");
                    self.result = Some(output);
                }
                Err(e) => {
                    warn!(error = %e, "Quiz run could not be scored");
                    return Err(e);
                }
            }
        }
        Ok(phase)
    }

    /// Discard both response sets and any result
    pub fn reset(&mut self) {
        self.collector.reset();
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::{Category, ChoicePrompt};
    use crate::scoring::ChoiceScorer;
    use std::cell::Cell;

    #[test]
    fn test_zero_prompts_rejected() {
        assert!(matches!(
            ResponseCollector::<usize>::new(0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_phase_progression() {
        let mut c = ResponseCollector::new(2).unwrap();
        assert_eq!(c.phase(), Phase::CollectingA(0));
        assert_eq!(c.submit(10).unwrap(), Phase::CollectingA(1));
        assert_eq!(c.submit(11).unwrap(), Phase::CollectingB(0));
        assert_eq!(c.submit(20).unwrap(), Phase::CollectingB(1));
        assert_eq!(c.submit(21).unwrap(), Phase::Complete);

        assert_eq!(c.responses_a(), &[10, 11]);
        assert_eq!(c.responses_b(), &[20, 21]);
        assert!(c.is_complete());
    }

    #[test]
    fn test_single_prompt_collector() {
        let mut c = ResponseCollector::new(1).unwrap();
        assert_eq!(c.submit("a").unwrap(), Phase::CollectingB(0));
        assert_eq!(c.submit("b").unwrap(), Phase::Complete);
    }

    #[test]
    fn test_submit_after_complete_rejected() {
        let mut c = ResponseCollector::new(1).unwrap();
        c.submit(1).unwrap();
        c.submit(2).unwrap();

        let err = c.submit(3).unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
        assert_eq!(c.responses_a(), &[1]);
        assert_eq!(c.responses_b(), &[2]);
        assert_eq!(c.phase(), Phase::Complete);
    }

    #[test]
    fn test_reset_clears_both_sets() {
        let mut c = ResponseCollector::new(2).unwrap();
        c.submit(1).unwrap();
        c.submit(2).unwrap();
        c.submit(3).unwrap();
        c.reset();

        assert_eq!(c.phase(), Phase::CollectingA(0));
        assert!(c.responses_a().is_empty());
        assert!(c.responses_b().is_empty());
    }

    #[test]
    fn test_phase_prompt_index() {
        assert_eq!(Phase::CollectingA(3).prompt_index(), Some(3));
        assert_eq!(Phase::CollectingB(0).prompt_index(), Some(0));
        assert_eq!(Phase::Complete.prompt_index(), None);
    }

    /// Scorer that counts its invocations
    struct CountingScorer {
        calls: Cell<usize>,
    }

    impl Scorer for CountingScorer {
        type Answer = u8;
        type Output = usize;

        fn prompt_count(&self) -> usize {
            2
        }

        fn score(&self, a: &[u8], b: &[u8]) -> Result<usize> {
            self.calls.set(self.calls.get() + 1);
            Ok(a.iter().zip(b).filter(|(x, y)| x == y).count())
        }
    }

    #[test]
    fn test_quiz_run_scores_exactly_once() {
        let mut run = QuizRun::new(CountingScorer { calls: Cell::new(0) }).unwrap();
        for answer in [1, 2, 1, 3] {
            assert!(run.result().is_none());
            run.submit(answer).unwrap();
        }
        assert_eq!(run.result(), Some(&1));
        assert_eq!(run.scorer().calls.get(), 1);

        // Rejected submission does not rescore
        assert!(run.submit(9).is_err());
        assert_eq!(run.scorer().calls.get(), 1);
        assert_eq!(run.result(), Some(&1));
    }

    #[test]
    fn test_quiz_run_reset_clears_result() {
        let mut run = QuizRun::new(CountingScorer { calls: Cell::new(0) }).unwrap();
        for answer in [1, 1, 1, 1] {
            run.submit(answer).unwrap();
        }
        assert!(run.result().is_some());

        run.reset();
        assert!(run.result().is_none());
        assert_eq!(run.phase(), Phase::CollectingA(0));
    }

    #[test]
    fn test_quiz_run_scoring_failure_leaves_no_result() {
        let prompts = vec![ChoicePrompt {
            id: 0,
            category: Category::Lifestyle,
            text: "Tea or coffee?".to_string(),
            options: vec!["Tea".to_string(), "Coffee".to_string()],
        }];
        let mut run = QuizRun::new(ChoiceScorer::new(prompts).unwrap()).unwrap();
        run.submit(0).unwrap();
        let err = run.submit(5).unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(run.phase(), Phase::Complete);
        assert!(run.result().is_none());
    }

    #[test]
    fn test_phase_json_shape() {
        let json = serde_json::to_value(Phase::CollectingB(3)).unwrap();
        assert_eq!(json, serde_json::json!({"phase": "collecting_b", "index": 3}));

        let json = serde_json::to_value(Phase::Complete).unwrap();
        assert_eq!(json, serde_json::json!({"phase": "complete"}));
    }
}
