//! Exercise definitions and loading

pub mod loader;

pub use loader::{
    find_exercise, load_exercises, load_exercises_from_directory, load_exercises_from_file,
    load_exercises_from_json_str, load_exercises_from_toml_str, LoadError,
};

use serde::{Deserialize, Serialize};

/// A learning exercise an answer is scored against.
///
/// `criteria` is already resolved: loaders decide whether it comes from an
/// `evaluationCriteria` or a `criteria` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub criteria: Vec<String>,
    /// Reference solution, if the author supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl Exercise {
    /// Create an exercise with the given criteria
    pub fn new<I, S>(id: impl Into<String>, criteria: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            title: String::new(),
            criteria: criteria.into_iter().map(Into::into).collect(),
            solution: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }

    /// The solution, ignoring blank strings
    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Title, or the id when no title is set
    pub fn display_name(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let ex = Exercise::new("EX-1", ["doelgroep benoemen"])
            .with_title("Gedicht")
            .with_solution("Schrijf een gedicht");
        assert_eq!(ex.criteria, vec!["doelgroep benoemen"]);
        assert_eq!(ex.display_name(), "Gedicht");
        assert_eq!(ex.solution(), Some("Schrijf een gedicht"));
    }

    #[test]
    fn test_blank_solution_ignored() {
        let ex = Exercise::new("EX-2", Vec::<String>::new()).with_solution("   ");
        assert_eq!(ex.solution(), None);
        assert_eq!(ex.display_name(), "EX-2");
    }
}
