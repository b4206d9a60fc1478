//! Property-based tests for the scorer using proptest

use proptest::prelude::*;

use answer_scorer::prelude::*;

/// Words drawn partly from concept keywords so that matches actually happen
fn arb_word() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(vec![
            "doelgroep", "kinderen", "lengte", "woorden", "regels", "toon",
            "formeel", "gedicht", "verhaal", "context", "voorbeeld", "stappen",
            "creatief", "sfeer", "website", "feedback", "specifiek", "zonder",
        ])
        .prop_map(String::from),
        2 => "[a-zé]{1,10}",
    ]
}

fn arb_text(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_word(), 0..max_words).prop_map(|words| words.join(" "))
}

fn arb_criteria() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_text(4), 0..5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn scores_stay_in_range(
        criteria in arb_criteria(),
        input in arb_text(12),
        solution in prop::option::of(arb_text(10)),
    ) {
        let summary = Evaluator::default().evaluate(&criteria, &input, solution.as_deref());

        prop_assert!((0.0..=100.0).contains(&summary.overall_score));
        for result in summary.results.values() {
            prop_assert!((0.0..=100.0).contains(&result.score));
            prop_assert_eq!(result.passed, result.score >= 70.0);
        }
        let passed = summary.results.values().filter(|r| r.passed).count();
        prop_assert!(summary.passed_criteria >= passed);
        prop_assert!(summary.passed_criteria <= summary.total_criteria);
    }

    #[test]
    fn arbitrary_unicode_never_panics(
        criterion in "\\PC{0,30}",
        input in "\\PC{0,60}",
    ) {
        let summary = Evaluator::default().evaluate(&[criterion], &input, Some(input.as_str()));
        prop_assert_eq!(summary.total_criteria, 1);
        prop_assert!((0.0..=100.0).contains(&summary.overall_score));
    }

    #[test]
    fn scoring_is_idempotent(
        criteria in arb_criteria(),
        input in arb_text(12),
        solution in prop::option::of(arb_text(10)),
    ) {
        let evaluator = Evaluator::default();
        let first = evaluator.evaluate(&criteria, &input, solution.as_deref());
        let second = evaluator.evaluate(&criteria, &input, solution.as_deref());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn adding_terms_never_lowers_concept_score(
        criterion in arb_text(4),
        base in arb_text(8),
        extra in arb_text(6),
    ) {
        let matcher = ConceptMatcher::default();
        let before = matcher.find_matching_concepts(&criterion, &base);
        let after = matcher.find_matching_concepts(&criterion, &format!("{} {}", base, extra));

        prop_assert!(after.score >= before.score);
        prop_assert!(before.matched_keywords.is_subset(&after.matched_keywords));
    }

    #[test]
    fn own_solution_always_validates(
        criteria in prop::collection::vec(arb_text(4), 1..5),
        solution in prop::collection::vec("[a-z]{3,8}", 1..8).prop_map(|w| w.join(" ")),
    ) {
        let exercise = Exercise::new("PROP", criteria).with_solution(solution);
        let check = validate_exercise_solution(&exercise);
        prop_assert!(check.is_valid, "issues: {:?}", check.issues);
        prop_assert!(check.score >= 95.0);
    }

    #[test]
    fn word_similarity_is_symmetric(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
        let ab = calculate_word_similarity(&a, &b);
        let ba = calculate_word_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert_eq!(calculate_word_similarity(&a, &a), 1.0);
    }
}

#[test]
fn empty_criteria_property() {
    for input in ["", "iets", "Schrijf een gedicht voor kinderen"] {
        let summary = Evaluator::default().evaluate::<&str>(&[], input, Some(input));
        assert_eq!(summary.overall_score, 0.0);
        assert_eq!(summary.total_criteria, 0);
        assert_eq!(summary.passed_criteria, 0);
        assert_eq!(summary.suggestions.len(), 1);
    }
}
