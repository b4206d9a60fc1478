//! Scoring of a free-text answer against a list of criteria

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::feedback::{self, FeedbackTier};
use super::matcher::ConceptMatcher;
use super::similarity::calculate_similarity;
use crate::exercises::Exercise;

/// Thresholds and boosts applied on top of the concept score.
///
/// The defaults reproduce the reference behavior; every value is tunable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// A criterion passes at or above this score
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f64,
    /// Solution similarity above which the answer counts as near-perfect
    #[serde(default = "default_near_perfect_similarity")]
    pub near_perfect_similarity: f64,
    /// Solution similarity above which the answer counts as good
    #[serde(default = "default_good_similarity")]
    pub good_similarity: f64,
    #[serde(default = "default_near_perfect_floor")]
    pub near_perfect_floor: f64,
    #[serde(default = "default_good_floor")]
    pub good_floor: f64,
    #[serde(default = "default_good_multiplier")]
    pub good_multiplier: f64,
    /// Concept scores above this get `strong_concept_multiplier`
    #[serde(default = "default_strong_concept_threshold")]
    pub strong_concept_threshold: f64,
    #[serde(default = "default_strong_concept_multiplier")]
    pub strong_concept_multiplier: f64,
    #[serde(default = "default_excellent_feedback")]
    pub excellent_feedback: f64,
    #[serde(default = "default_good_feedback")]
    pub good_feedback: f64,
    /// Failed criteria with matches below this score get an "elaborate" hint
    #[serde(default = "default_elaborate_below")]
    pub elaborate_below: f64,
    /// Trimmed answers shorter than this (in characters) get a length hint
    #[serde(default = "default_short_input_chars")]
    pub short_input_chars: usize,
    #[serde(default = "default_congratulate_at")]
    pub congratulate_at: f64,
    /// Minimum overall score for a reference solution to be valid
    #[serde(default = "default_solution_valid_at")]
    pub solution_valid_at: f64,
}

fn default_pass_threshold() -> f64 { 70.0 }
fn default_near_perfect_similarity() -> f64 { 85.0 }
fn default_good_similarity() -> f64 { 70.0 }
fn default_near_perfect_floor() -> f64 { 95.0 }
fn default_good_floor() -> f64 { 85.0 }
fn default_good_multiplier() -> f64 { 1.2 }
fn default_strong_concept_threshold() -> f64 { 70.0 }
fn default_strong_concept_multiplier() -> f64 { 1.1 }
fn default_excellent_feedback() -> f64 { 90.0 }
fn default_good_feedback() -> f64 { 80.0 }
fn default_elaborate_below() -> f64 { 50.0 }
fn default_short_input_chars() -> usize { 50 }
fn default_congratulate_at() -> f64 { 95.0 }
fn default_solution_valid_at() -> f64 { 95.0 }

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            pass_threshold: default_pass_threshold(),
            near_perfect_similarity: default_near_perfect_similarity(),
            good_similarity: default_good_similarity(),
            near_perfect_floor: default_near_perfect_floor(),
            good_floor: default_good_floor(),
            good_multiplier: default_good_multiplier(),
            strong_concept_threshold: default_strong_concept_threshold(),
            strong_concept_multiplier: default_strong_concept_multiplier(),
            excellent_feedback: default_excellent_feedback(),
            good_feedback: default_good_feedback(),
            elaborate_below: default_elaborate_below(),
            short_input_chars: default_short_input_chars(),
            congratulate_at: default_congratulate_at(),
            solution_valid_at: default_solution_valid_at(),
        }
    }
}

impl ScoringPolicy {
    /// Apply the solution-similarity boost to a concept score, clamped to 0..=100
    pub fn boost(&self, concept_score: f64, solution_similarity: f64) -> f64 {
        let score = if solution_similarity > self.near_perfect_similarity {
            concept_score.max(self.near_perfect_floor)
        } else if solution_similarity > self.good_similarity {
            (concept_score * self.good_multiplier).max(self.good_floor)
        } else if concept_score > self.strong_concept_threshold {
            (concept_score * self.strong_concept_multiplier).min(100.0)
        } else {
            concept_score
        };
        score.clamp(0.0, 100.0)
    }
}

/// Outcome for a single criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// Always `score >= pass_threshold`
    pub passed: bool,
    pub score: f64,
    pub feedback: String,
    pub matched_keywords: BTreeSet<String>,
    /// Concepts the criterion names that the answer leaves out
    pub missing_keywords: BTreeSet<String>,
}

/// Outcome for one answer against all criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSummary {
    pub overall_score: f64,
    pub total_criteria: usize,
    pub passed_criteria: usize,
    pub results: IndexMap<String, EvaluationResult>,
    pub suggestions: Vec<String>,
}

impl EvaluationSummary {
    /// Summary for an exercise without criteria
    pub fn empty() -> Self {
        Self {
            overall_score: 0.0,
            total_criteria: 0,
            passed_criteria: 0,
            results: IndexMap::new(),
            suggestions: vec![feedback::NO_CRITERIA.to_string()],
        }
    }

    pub fn all_passed(&self) -> bool {
        self.total_criteria > 0 && self.passed_criteria == self.total_criteria
    }
}

/// Result of scoring an exercise's own reference solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionCheck {
    pub is_valid: bool,
    pub score: f64,
    pub issues: Vec<String>,
}

/// Scores answers with a concept matcher and a scoring policy
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    matcher: ConceptMatcher,
    policy: ScoringPolicy,
}

impl Evaluator {
    pub fn new(matcher: ConceptMatcher, policy: ScoringPolicy) -> Self {
        Self { matcher, policy }
    }

    pub fn matcher(&self) -> &ConceptMatcher {
        &self.matcher
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score an answer against an exercise's criteria and solution
    pub fn evaluate_exercise(&self, exercise: &Exercise, user_input: &str) -> EvaluationSummary {
        self.evaluate(&exercise.criteria, user_input, exercise.solution())
    }

    /// Score `user_input` against `criteria`, boosted by similarity to `solution`
    pub fn evaluate<S: AsRef<str>>(
        &self,
        criteria: &[S],
        user_input: &str,
        solution: Option<&str>,
    ) -> EvaluationSummary {
        if criteria.is_empty() {
            return EvaluationSummary::empty();
        }

        let policy = &self.policy;
        let solution_similarity = solution
            .map(|s| calculate_similarity(user_input, s))
            .unwrap_or(0.0);

        let mut results = IndexMap::new();
        let mut suggestions = IndexSet::new();
        let mut total_score = 0.0;
        let mut passed_count = 0;

        for criterion in criteria {
            let criterion = criterion.as_ref();
            let found = self.matcher.find_matching_concepts(criterion, user_input);
            let score = policy.boost(found.score, solution_similarity);
            let passed = score >= policy.pass_threshold;

            tracing::debug!(
                criterion,
                concept_score = found.score,
                score,
                passed,
                "scored criterion"
            );

            total_score += score;
            if passed {
                passed_count += 1;
            } else if found.matched_keywords.is_empty() {
                suggestions.insert(feedback::add_elements(criterion));
            } else if score < policy.elaborate_below {
                suggestions.insert(feedback::elaborate(criterion));
            }

            let tier = FeedbackTier::classify(
                score,
                passed,
                policy.excellent_feedback,
                policy.good_feedback,
            );

            results.insert(
                criterion.to_string(),
                EvaluationResult {
                    passed,
                    score,
                    feedback: tier.message(score),
                    matched_keywords: found.matched_keywords,
                    missing_keywords: found.missing_concepts,
                },
            );
        }

        let overall_score = total_score / criteria.len() as f64;

        if user_input.trim().chars().count() < policy.short_input_chars {
            suggestions.insert(feedback::SHORT_INPUT.to_string());
        }
        if overall_score < policy.pass_threshold {
            if solution.is_some() {
                suggestions.insert(feedback::REVIEW_SOLUTION.to_string());
            }
            suggestions.insert(feedback::BE_SPECIFIC.to_string());
        }
        if overall_score >= policy.congratulate_at {
            suggestions.insert(feedback::CONGRATULATIONS.to_string());
        }

        EvaluationSummary {
            overall_score,
            total_criteria: criteria.len(),
            passed_criteria: passed_count,
            results,
            suggestions: suggestions.into_iter().collect(),
        }
    }

    /// Check that an exercise's reference solution scores near-perfect
    /// against its own criteria.
    pub fn validate_exercise_solution(&self, exercise: &Exercise) -> SolutionCheck {
        let Some(solution) = exercise.solution() else {
            return SolutionCheck {
                is_valid: false,
                score: 0.0,
                issues: vec!["Exercise has no reference solution".to_string()],
            };
        };

        let summary = self.evaluate(&exercise.criteria, solution, Some(solution));
        let mut issues: Vec<String> = summary
            .results
            .iter()
            .filter(|(_, r)| !r.passed)
            .map(|(criterion, r)| {
                format!(
                    "Solution fails criterion '{}' ({}%)",
                    criterion,
                    feedback::percent(r.score)
                )
            })
            .collect();

        let is_valid = summary.overall_score >= self.policy.solution_valid_at;
        if !is_valid && issues.is_empty() {
            issues.push(format!(
                "Overall score {}% is below {}%",
                feedback::percent(summary.overall_score),
                feedback::percent(self.policy.solution_valid_at)
            ));
        }

        SolutionCheck {
            is_valid,
            score: summary.overall_score,
            issues,
        }
    }
}

/// Score an answer with the built-in concept table and default policy
pub fn evaluate_exercise(exercise: &Exercise, user_input: &str) -> EvaluationSummary {
    Evaluator::default().evaluate_exercise(exercise, user_input)
}

/// Self-check an exercise's solution with the built-in concept table and default policy
pub fn validate_exercise_solution(exercise: &Exercise) -> SolutionCheck {
    Evaluator::default().validate_exercise_solution(exercise)
}
