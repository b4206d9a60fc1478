//! Answer Scorer for Learning Exercises
//!
//! Scores a free-text answer (typically a prompt written by a learner)
//! against an exercise's natural-language evaluation criteria.
//!
//! # Features
//!
//! - Built-in table of 17 concept groups, extensible from TOML
//! - Fuzzy keyword matching tolerant of typos and inflection
//! - Solution-similarity boost when a reference solution is available
//! - Per-criterion feedback plus deduplicated improvement suggestions
//! - Self-check that an exercise's own solution scores near-perfect
//!
//! # Example
//!
//! ```
//! use answer_scorer::{analysis::evaluate_exercise, exercises::Exercise};
//!
//! let exercise = Exercise::new("EX-1", ["doelgroep benoemen"]);
//! let summary = evaluate_exercise(&exercise, "Dit is voor kinderen van 8 jaar oud");
//!
//! assert_eq!(summary.passed_criteria, 1);
//! assert!(summary.results["doelgroep benoemen"].passed);
//! ```

pub mod analysis;
pub mod concepts;
pub mod config;
pub mod exercises;
pub mod reporting;

pub use config::Config;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::analysis::{
        calculate_similarity, calculate_word_similarity, evaluate_exercise,
        validate_exercise_solution, ConceptMatch, ConceptMatcher, EvaluationResult,
        EvaluationSummary, Evaluator, MatchingConfig, ScoringPolicy, SolutionCheck,
    };
    pub use crate::concepts::{ConceptGroup, ConceptTable};
    pub use crate::config::{Config, ConfigError};
    pub use crate::exercises::{load_exercises, Exercise, LoadError};
    pub use crate::reporting::{print_console_report, JsonReport};
}
