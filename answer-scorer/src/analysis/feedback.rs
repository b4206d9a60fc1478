//! Feedback tiers and suggestion texts

use serde::{Deserialize, Serialize};

/// Returned as the only suggestion when an exercise has no criteria
pub const NO_CRITERIA: &str = "No evaluation criteria are defined for this exercise.";
pub const SHORT_INPUT: &str =
    "Write a more detailed prompt: add context, an audience and the desired format.";
pub const REVIEW_SOLUTION: &str =
    "Review the sample solution to see which elements your prompt is missing.";
pub const BE_SPECIFIC: &str =
    "Make your prompt more specific and address every criterion explicitly.";
pub const CONGRATULATIONS: &str = "Excellent work! Your prompt meets all criteria.";

/// Suggestion for a failed criterion the answer did not touch at all
pub fn add_elements(criterion: &str) -> String {
    format!("Add elements related to: {}", criterion)
}

/// Suggestion for a failed criterion the answer only touched on
pub fn elaborate(criterion: &str) -> String {
    format!("Elaborate further: {}", criterion)
}

/// Score rounded half away from zero, for display
pub fn percent(score: f64) -> u32 {
    score.round().clamp(0.0, 100.0) as u32
}

/// Quality band of a criterion score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    Excellent,
    Good,
    Sufficient,
    NeedsImprovement,
}

impl FeedbackTier {
    /// First matching band wins
    pub fn classify(score: f64, passed: bool, excellent_at: f64, good_at: f64) -> Self {
        if score >= excellent_at {
            FeedbackTier::Excellent
        } else if score >= good_at {
            FeedbackTier::Good
        } else if passed {
            FeedbackTier::Sufficient
        } else {
            FeedbackTier::NeedsImprovement
        }
    }

    pub fn message(&self, score: f64) -> String {
        let pct = percent(score);
        match self {
            FeedbackTier::Excellent => format!("Excellent! This criterion is fully met ({}%).", pct),
            FeedbackTier::Good => format!("Good! This criterion is well covered ({}%).", pct),
            FeedbackTier::Sufficient => {
                format!("Sufficient. This criterion is met but could be stronger ({}%).", pct)
            }
            FeedbackTier::NeedsImprovement => {
                format!("Needs improvement. This criterion is not met yet ({}%).", pct)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bands() {
        assert_eq!(FeedbackTier::classify(93.5, true, 90.0, 80.0), FeedbackTier::Excellent);
        assert_eq!(FeedbackTier::classify(85.0, true, 90.0, 80.0), FeedbackTier::Good);
        assert_eq!(FeedbackTier::classify(72.0, true, 90.0, 80.0), FeedbackTier::Sufficient);
        assert_eq!(
            FeedbackTier::classify(42.5, false, 90.0, 80.0),
            FeedbackTier::NeedsImprovement
        );
    }

    #[test]
    fn test_message_rounds() {
        assert!(FeedbackTier::Excellent.message(93.5).contains("(94%)"));
        assert!(FeedbackTier::NeedsImprovement.message(42.5).contains("(43%)"));
    }

    #[test]
    fn test_criterion_suggestions() {
        assert_eq!(add_elements("lengte"), "Add elements related to: lengte");
        assert_eq!(elaborate("toon"), "Elaborate further: toon");
    }
}
