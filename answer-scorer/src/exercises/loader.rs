//! Exercise loading from JSON and TOML files

use std::path::Path;

use serde::Deserialize;

use super::Exercise;

/// Error type for exercise and concept file loading
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported file type: {0}")]
    Unsupported(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Exercise not found: {0}")]
    NotFound(String),
}

/// An exercise as authored on disk.
///
/// Content stores use either `evaluationCriteria` or `criteria`; both are
/// accepted here and resolved into [`Exercise::criteria`].
#[derive(Debug, Deserialize)]
struct ExerciseDefinition {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "evaluationCriteria", alias = "evaluation_criteria")]
    evaluation_criteria: Option<Vec<String>>,
    #[serde(default)]
    criteria: Option<Vec<String>>,
    #[serde(default)]
    solution: Option<String>,
}

impl ExerciseDefinition {
    fn into_exercise(self, index: usize) -> Result<Exercise, LoadError> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| LoadError::MissingField(format!("id (exercise {})", index)))?;

        let criteria = resolve_criteria(self.evaluation_criteria, self.criteria);

        Ok(Exercise {
            id,
            title: self.title.unwrap_or_default(),
            criteria,
            solution: self.solution,
        })
    }
}

/// Prefer non-empty `evaluationCriteria`, fall back to `criteria`
fn resolve_criteria(
    evaluation_criteria: Option<Vec<String>>,
    criteria: Option<Vec<String>>,
) -> Vec<String> {
    let clean = |list: Vec<String>| -> Vec<String> {
        list.into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    };

    match evaluation_criteria.map(clean) {
        Some(list) if !list.is_empty() => list,
        _ => criteria.map(clean).unwrap_or_default(),
    }
}

/// Accepted JSON layouts
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonExercises {
    Wrapped { exercises: Vec<ExerciseDefinition> },
    List(Vec<ExerciseDefinition>),
    Single(ExerciseDefinition),
}

#[derive(Deserialize)]
struct TomlExercises {
    #[serde(default)]
    exercises: Vec<ExerciseDefinition>,
}

fn convert(definitions: Vec<ExerciseDefinition>) -> Result<Vec<Exercise>, LoadError> {
    definitions
        .into_iter()
        .enumerate()
        .map(|(idx, def)| def.into_exercise(idx))
        .collect()
}

/// Load exercises from a JSON string.
///
/// Accepts a single exercise object, an array of exercises, or an object
/// with an `exercises` array.
pub fn load_exercises_from_json_str(content: &str) -> Result<Vec<Exercise>, LoadError> {
    let parsed: JsonExercises = serde_json::from_str(content)
        .map_err(|e| LoadError::Parse(format!("JSON parse error: {}", e)))?;

    let definitions = match parsed {
        JsonExercises::Wrapped { exercises } => exercises,
        JsonExercises::List(list) => list,
        JsonExercises::Single(def) => vec![def],
    };
    convert(definitions)
}

/// Load exercises from `[[exercises]]` tables in a TOML string
pub fn load_exercises_from_toml_str(content: &str) -> Result<Vec<Exercise>, LoadError> {
    let parsed: TomlExercises = toml::from_str(content)
        .map_err(|e| LoadError::Parse(format!("TOML parse error: {}", e)))?;
    convert(parsed.exercises)
}

/// Load exercises from a `.json` or `.toml` file
pub fn load_exercises_from_file(path: impl AsRef<Path>) -> Result<Vec<Exercise>, LoadError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "json" => load_exercises_from_json_str(&std::fs::read_to_string(path)?),
        "toml" => load_exercises_from_toml_str(&std::fs::read_to_string(path)?),
        _ => Err(LoadError::Unsupported(path.display().to_string())),
    }
}

/// Load all exercises from a directory.
///
/// Files are read in name order; files that fail to parse are skipped.
pub fn load_exercises_from_directory(dir: impl AsRef<Path>) -> Result<Vec<Exercise>, LoadError> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("json") | Some("toml")
            )
        })
        .collect();
    paths.sort();

    let mut all = Vec::new();
    for path in paths {
        match load_exercises_from_file(&path) {
            Ok(exercises) => all.extend(exercises),
            Err(e) => {
                tracing::warn!("Failed to load exercises from {:?}: {}", path, e);
            }
        }
    }

    Ok(all)
}

/// Load from a file or a directory
pub fn load_exercises(path: impl AsRef<Path>) -> Result<Vec<Exercise>, LoadError> {
    let path = path.as_ref();
    let exercises = if path.is_dir() {
        load_exercises_from_directory(path)?
    } else {
        load_exercises_from_file(path)?
    };
    tracing::info!("Loaded {} exercises from {:?}", exercises.len(), path);
    Ok(exercises)
}

/// Pick an exercise by id, or the only one when `id` is `None`
pub fn find_exercise<'a>(exercises: &'a [Exercise], id: Option<&str>) -> Result<&'a Exercise, LoadError> {
    match id {
        Some(id) => exercises
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| LoadError::NotFound(id.to_string())),
        None if exercises.len() == 1 => Ok(&exercises[0]),
        None if exercises.is_empty() => Err(LoadError::NotFound("no exercises loaded".to_string())),
        None => Err(LoadError::MissingField(format!(
            "id (file contains {} exercises)",
            exercises.len()
        ))),
    }
}
