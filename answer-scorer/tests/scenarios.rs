//! End-to-end scoring scenarios through the public API

use std::path::PathBuf;

use answer_scorer::analysis::feedback;
use answer_scorer::prelude::*;

fn exercises_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("exercises")
}

#[test]
fn audience_named_by_answer_passes() {
    let exercise = Exercise::new("EX-1", ["doelgroep benoemen"]);
    let summary = evaluate_exercise(&exercise, "Dit is voor kinderen van 8 jaar oud");

    let result = &summary.results["doelgroep benoemen"];
    assert!(result.passed);
    assert!(result.score >= 85.0);
    for kw in ["kinderen", "jaar", "oud"] {
        assert!(result.matched_keywords.contains(kw));
    }
    assert_eq!(summary.total_criteria, 1);
    assert_eq!(summary.passed_criteria, 1);
}

#[test]
fn missing_length_fails_with_suggestion() {
    let exercise = Exercise::new("EX-2", ["lengte specificeren"]);
    let summary = evaluate_exercise(&exercise, "Schrijf iets leuks");

    let result = &summary.results["lengte specificeren"];
    assert!(!result.passed);
    assert!(result.score < 15.0 + f64::EPSILON);
    assert!(summary
        .suggestions
        .iter()
        .any(|s| s.to_lowercase().contains("add elements related to: lengte specificeren")));
}

#[test]
fn verbatim_solution_scores_near_perfect() {
    let solution = "Schrijf een gedicht van 10 regels voor kinderen";
    assert_eq!(calculate_similarity(solution, solution), 100.0);

    let exercise = Exercise::new(
        "EX-3",
        ["doelgroep benoemen", "lengte specificeren", "creativiteit stimuleren"],
    )
    .with_solution(solution);
    let summary = evaluate_exercise(&exercise, solution);

    assert_eq!(summary.passed_criteria, 3);
    assert!(summary.results.values().all(|r| r.score >= 95.0));
    assert!(summary.overall_score >= 95.0);
}

#[test]
fn empty_criteria_summary() {
    let exercise = Exercise::new("EX-4", Vec::<String>::new()).with_solution("iets");
    let summary = evaluate_exercise(&exercise, "een antwoord");

    assert_eq!(summary.overall_score, 0.0);
    assert_eq!(summary.total_criteria, 0);
    assert_eq!(summary.passed_criteria, 0);
    assert!(summary.results.is_empty());
    assert_eq!(summary.suggestions, vec![feedback::NO_CRITERIA]);
}

#[test]
fn good_solution_similarity_lifts_weak_criteria() {
    // All 5 answer tokens occur among the 7 solution tokens: Dice = 10/12
    let solution = "Schrijf een gedicht over de zee voor kinderen";
    let answer = "Schrijf een gedicht over de zee";
    let similarity = calculate_similarity(answer, solution);
    assert!(similarity > 70.0 && similarity <= 85.0, "similarity {similarity}");

    let exercise = Exercise::new("EX-5", ["lengte specificeren"]).with_solution(solution);
    let summary = evaluate_exercise(&exercise, answer);
    let result = &summary.results["lengte specificeren"];
    assert_eq!(result.score, 85.0);
    assert!(result.passed);
}

#[test]
fn sample_exercises_validate() {
    let exercises = load_exercises(exercises_dir()).unwrap();
    assert_eq!(exercises.len(), 5);

    let evaluator = Evaluator::default();
    for exercise in &exercises {
        let check = evaluator.validate_exercise_solution(exercise);
        assert!(check.is_valid, "{}: {:?}", exercise.id, check.issues);
    }
}

#[test]
fn evaluation_criteria_field_wins() {
    let exercises = load_exercises(exercises_dir().join("prompt-basics.json")).unwrap();
    let newsletter = exercises.iter().find(|e| e.id == "PB-003").unwrap();
    assert_eq!(
        newsletter.criteria,
        vec!["kanaal noemen", "doelgroep benoemen", "beperkingen aangeven"]
    );
}

#[test]
fn configured_evaluator_uses_extra_concepts() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("muziek.toml"),
        "[[concepts]]\nname = \"muziek\"\nkeywords = [\"muziek\", \"melodie\", \"ritme\"]\n",
    )
    .unwrap();
    let config_path = dir.path().join("scorer.toml");
    std::fs::write(&config_path, "[concepts]\nfile = \"muziek.toml\"\n").unwrap();

    let evaluator = Config::from_file(&config_path).unwrap().evaluator().unwrap();
    let summary = evaluator.evaluate(&["muziek noemen"], "Een liedje met een vrolijke melodie", None);
    assert!(summary.results["muziek noemen"].passed);

    // The built-in table knows nothing about music
    let builtin = Evaluator::default().evaluate(
        &["muziek noemen"],
        "Een liedje met een vrolijke melodie",
        None,
    );
    assert!(!builtin.results["muziek noemen"].passed);
}
