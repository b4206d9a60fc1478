//! Concept matching between a criterion and an answer

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::similarity::{calculate_word_similarity, char_len, substring_related, tokenize};
use crate::concepts::{ConceptGroup, ConceptTable};

/// Tunable weights and thresholds for concept matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Score awarded when every invoked concept is satisfied
    #[serde(default = "default_concept_weight")]
    pub concept_weight: f64,
    /// Upper bound of the direct token match bonus
    #[serde(default = "default_direct_bonus_max")]
    pub direct_bonus_max: f64,
    /// Word similarity needed for an answer token to satisfy a keyword
    #[serde(default = "default_loose_similarity")]
    pub loose_similarity: f64,
    /// Word similarity needed for a direct criterion/answer token match
    #[serde(default = "default_strict_similarity")]
    pub strict_similarity: f64,
    /// Shared prefix length that links a criterion token to a keyword
    #[serde(default = "default_prefix_chars")]
    pub prefix_chars: usize,
}

fn default_concept_weight() -> f64 { 85.0 }
fn default_direct_bonus_max() -> f64 { 15.0 }
fn default_loose_similarity() -> f64 { 0.7 }
fn default_strict_similarity() -> f64 { 0.8 }
fn default_prefix_chars() -> usize { 4 }

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            concept_weight: default_concept_weight(),
            direct_bonus_max: default_direct_bonus_max(),
            loose_similarity: default_loose_similarity(),
            strict_similarity: default_strict_similarity(),
            prefix_chars: default_prefix_chars(),
        }
    }
}

/// Outcome of matching one criterion against one answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptMatch {
    /// Keywords and tokens that contributed to the score
    pub matched_keywords: BTreeSet<String>,
    /// Concepts the criterion refers to
    pub invoked_concepts: Vec<String>,
    /// Invoked concepts the answer does not cover
    pub missing_concepts: BTreeSet<String>,
    pub concept_score: f64,
    pub direct_bonus: f64,
    /// `min(100, concept_score + direct_bonus)`
    pub score: f64,
}

/// Matches criteria to concept groups and checks answers against them
#[derive(Debug, Clone)]
pub struct ConceptMatcher {
    table: Arc<ConceptTable>,
    config: MatchingConfig,
}

impl Default for ConceptMatcher {
    fn default() -> Self {
        Self::new(ConceptTable::builtin(), MatchingConfig::default())
    }
}

impl ConceptMatcher {
    pub fn new(table: Arc<ConceptTable>, config: MatchingConfig) -> Self {
        Self { table, config }
    }

    pub fn table(&self) -> &ConceptTable {
        &self.table
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Score how well `user_input` covers the concepts named by `criterion`
    pub fn find_matching_concepts(&self, criterion: &str, user_input: &str) -> ConceptMatch {
        let criterion_lower = criterion.to_lowercase();
        let input_lower = user_input.to_lowercase();
        let criterion_tokens = tokenize(criterion);
        let input_tokens = tokenize(user_input);

        let mut matched_keywords = BTreeSet::new();
        let mut missing_concepts = BTreeSet::new();
        let mut invoked_concepts = Vec::new();
        let mut satisfied = 0usize;

        for group in self.table.iter() {
            if !self.invokes(group, &criterion_lower, &criterion_tokens) {
                continue;
            }
            invoked_concepts.push(group.name.clone());

            let hits = self.satisfying_keywords(group, &input_lower, &input_tokens);
            if hits.is_empty() {
                missing_concepts.insert(group.name.clone());
            } else {
                satisfied += 1;
                matched_keywords.extend(hits.into_iter().map(str::to_string));
            }
        }

        let concept_score = if invoked_concepts.is_empty() {
            0.0
        } else {
            satisfied as f64 / invoked_concepts.len() as f64 * self.config.concept_weight
        };

        let direct: Vec<&String> = criterion_tokens
            .iter()
            .filter(|t| self.direct_match(t, &input_tokens))
            .collect();
        let direct_bonus = if criterion_tokens.is_empty() {
            0.0
        } else {
            (direct.len() as f64 / criterion_tokens.len() as f64 * self.config.direct_bonus_max)
                .min(self.config.direct_bonus_max)
        };
        matched_keywords.extend(direct.into_iter().cloned());

        ConceptMatch {
            matched_keywords,
            invoked_concepts,
            missing_concepts,
            concept_score,
            direct_bonus,
            score: (concept_score + direct_bonus).min(100.0),
        }
    }

    /// Does the criterion refer to this concept?
    fn invokes(&self, group: &ConceptGroup, criterion_lower: &str, tokens: &[String]) -> bool {
        group.keywords.iter().any(|kw| {
            criterion_lower.contains(kw.as_str())
                || tokens.iter().any(|t| {
                    self.shares_prefix(t, kw) || substring_related(t, kw)
                })
        })
    }

    /// Keywords of the group the answer satisfies; empty if none
    fn satisfying_keywords<'g>(
        &self,
        group: &'g ConceptGroup,
        input_lower: &str,
        tokens: &[String],
    ) -> Vec<&'g str> {
        group
            .keywords
            .iter()
            .filter(|kw| {
                input_lower.contains(kw.as_str())
                    || tokens.iter().any(|t| {
                        substring_related(t, kw)
                            || (char_len(t) > 3
                                && char_len(kw) > 3
                                && calculate_word_similarity(t, kw) > self.config.loose_similarity)
                    })
            })
            .map(String::as_str)
            .collect()
    }

    fn shares_prefix(&self, token: &str, keyword: &str) -> bool {
        let n = self.config.prefix_chars;
        char_len(token) >= n
            && char_len(keyword) >= n
            && token.chars().take(n).eq(keyword.chars().take(n))
    }

    fn direct_match(&self, token: &str, input_tokens: &[String]) -> bool {
        input_tokens.iter().any(|u| {
            u == token
                || substring_related(token, u)
                || (char_len(token) > 3
                    && char_len(u) > 3
                    && calculate_word_similarity(token, u) > self.config.strict_similarity)
        })
    }
}
