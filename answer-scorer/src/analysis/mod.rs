//! Answer analysis: concept matching, similarity and scoring

pub mod evaluator;
pub mod feedback;
pub mod matcher;
pub mod similarity;

pub use evaluator::{
    evaluate_exercise, validate_exercise_solution, EvaluationResult, EvaluationSummary,
    Evaluator, ScoringPolicy, SolutionCheck,
};
pub use feedback::FeedbackTier;
pub use matcher::{ConceptMatch, ConceptMatcher, MatchingConfig};
pub use similarity::{calculate_similarity, calculate_word_similarity, tokenize};
