//! Agreement scorer and collector behavior over whole quizzes
//!
//! Covers:
//! - Determinism, score bounds, partition and symmetry properties
//! - Category sum equals exact matches
//! - Worked scenarios for both scorer variants
//! - Collector phase ordering and rejection after completion

use duet_common::collector::{Phase, QuizRun, ResponseCollector};
use duet_common::prompts::{choice_prompts, text_prompts, Category, ChoicePrompt, TextPrompt};
use duet_common::scoring::{score_choices, score_text, ChoiceScorer, TextScorer};
use duet_common::Error;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn single_category(n: usize, options: usize) -> Vec<ChoicePrompt> {
    (0..n)
        .map(|id| ChoicePrompt {
            id,
            category: Category::Values,
            text: format!("Prompt {}", id),
            options: (0..options).map(|o| format!("Option {}", o)).collect(),
        })
        .collect()
}

fn random_answers(prompts: &[ChoicePrompt], rng: &mut StdRng) -> Vec<usize> {
    prompts
        .iter()
        .map(|p| rng.gen_range(0..p.options.len()))
        .collect()
}

// =============================================================================
// Properties over randomized answers to the built-in quiz
// =============================================================================

#[test]
fn test_properties_hold_for_random_answers() {
    let prompts = choice_prompts();
    let n = prompts.len();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..500 {
        let a = random_answers(prompts, &mut rng);
        let b = random_answers(prompts, &mut rng);

        let result = score_choices(prompts, &a, &b).unwrap();

        // Determinism
        assert_eq!(score_choices(prompts, &a, &b).unwrap(), result);

        // Bounds
        assert!(result.total_score >= 0.0 && result.total_score <= 100.0);
        assert_eq!(result.total_score == 100.0, result.exact_matches == n);

        // Partition
        assert_eq!(
            result.exact_matches + result.partial_matches + result.different_count,
            n
        );

        // Symmetry
        let swapped = score_choices(prompts, &b, &a).unwrap();
        assert_eq!(swapped.exact_matches, result.exact_matches);
        assert_eq!(swapped.partial_matches, result.partial_matches);
        assert_eq!(swapped.total_score, result.total_score);

        // Category sum counts exact matches only
        let category_sum: usize = result.category_breakdown.iter().map(|c| c.matches).sum();
        assert_eq!(category_sum, result.exact_matches);
        let category_total: usize = result.category_breakdown.iter().map(|c| c.total).sum();
        assert_eq!(category_total, n);
    }
}

#[test]
fn test_builtin_quiz_breakdown_has_five_categories_in_order() {
    let prompts = choice_prompts();
    let answers = vec![0; prompts.len()];
    let result = score_choices(prompts, &answers, &answers).unwrap();

    let categories: Vec<Category> = result.category_breakdown.iter().map(|c| c.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Communication,
            Category::Values,
            Category::Lifestyle,
            Category::Romance,
            Category::Future,
        ]
    );
    for entry in &result.category_breakdown {
        assert_eq!(entry.matches, 3);
        assert_eq!(entry.total, 3);
        assert_eq!(entry.percentage, 100);
    }
}

// =============================================================================
// Worked scenarios
// =============================================================================

#[test]
fn test_scenario_identical_answers() {
    let prompts = single_category(4, 4);
    let result = score_choices(&prompts, &[0, 1, 2, 3], &[0, 1, 2, 3]).unwrap();

    assert_eq!(result.exact_matches, 4);
    assert_eq!(result.partial_matches, 0);
    assert_eq!(result.different_count, 0);
    assert_eq!(result.total_score, 100.0);
}

#[test]
fn test_scenario_all_adjacent_but_one() {
    let prompts = single_category(4, 4);
    let result = score_choices(&prompts, &[0, 1, 2, 3], &[1, 0, 3, 0]).unwrap();

    assert_eq!(result.exact_matches, 0);
    assert_eq!(result.partial_matches, 3);
    assert_eq!(result.different_count, 1);
    assert_eq!(result.total_score, 22.5);
}

#[test]
fn test_scenario_free_text_normalization() {
    let prompts: Vec<TextPrompt> = text_prompts()[..3].to_vec();
    let result = score_text(
        &prompts,
        &["Paris", " paris ", "Rome"],
        &["paris", "PARIS", "rome"],
    )
    .unwrap();

    assert_eq!(result.match_count, 3);
    assert_eq!(result.match_percentage, 100);
}

#[test]
fn test_invalid_length_returns_no_result() {
    let prompts = single_category(4, 4);
    let result = score_choices(&prompts, &[0, 1, 2], &[0, 1, 2, 3]);
    assert!(matches!(result, Err(Error::InvalidInput(_))));

    let prompts: Vec<TextPrompt> = text_prompts()[..2].to_vec();
    let result = score_text(&prompts, &["a", "b"], &["a"]);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

// =============================================================================
// Collector
// =============================================================================

#[test]
fn test_collector_switches_to_b_after_n_answers() {
    let n = 3;
    let mut collector = ResponseCollector::new(n).unwrap();
    for i in 0..n {
        assert_eq!(collector.phase(), Phase::CollectingA(i));
        collector.submit(i).unwrap();
    }
    assert_eq!(collector.phase(), Phase::CollectingB(0));

    collector.submit(99).unwrap();
    assert_eq!(collector.responses_a(), &[0, 1, 2]);
    assert_eq!(collector.responses_b(), &[99]);
}

#[test]
fn test_collector_rejects_after_complete_until_reset() {
    let mut collector = ResponseCollector::new(2).unwrap();
    for answer in [0, 1, 2, 3] {
        collector.submit(answer).unwrap();
    }
    assert_eq!(collector.phase(), Phase::Complete);
    assert!(matches!(collector.submit(4), Err(Error::InvalidState(_))));

    collector.reset();
    assert_eq!(collector.submit(4).unwrap(), Phase::CollectingA(1));
}

#[test]
fn test_full_choice_quiz_run() {
    let mut run = QuizRun::new(ChoiceScorer::standard()).unwrap();
    let n = run.scorer().prompts().len();

    // A always picks option 1, B always option 2: every answer adjacent
    for _ in 0..n {
        run.submit(1).unwrap();
    }
    assert_eq!(run.phase(), Phase::CollectingB(0));
    for _ in 0..n {
        run.submit(2).unwrap();
    }

    assert_eq!(run.phase(), Phase::Complete);
    let result = run.result().expect("Result should be available");
    assert_eq!(result.exact_matches, 0);
    assert_eq!(result.partial_matches, n);
    assert_eq!(result.total_score, 30.0);
}

#[test]
fn test_full_text_quiz_run() {
    let mut run = QuizRun::new(TextScorer::standard()).unwrap();
    let n = run.scorer().prompts().len();

    for i in 0..n {
        run.submit(format!("Answer {}", i)).unwrap();
    }
    for i in 0..n {
        let answer = if i % 2 == 0 {
            format!("  answer {}  ", i)
        } else {
            "something else".to_string()
        };
        run.submit(answer).unwrap();
    }

    let result = run.result().unwrap();
    assert_eq!(result.match_count, 5);
    assert_eq!(result.match_percentage, 50);
}
