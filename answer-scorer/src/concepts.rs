//! Concept groups: clusters of related keywords that a criterion can invoke
//!
//! The built-in table is initialized once per process and never mutated.
//! Additional groups can be loaded from a TOML file at startup.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::exercises::LoadError;

/// A named cluster of synonymous or related terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptGroup {
    pub name: String,
    pub keywords: Vec<String>,
}

impl ConceptGroup {
    /// Create a group, lowercasing every keyword
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }
}

/// Ordered, read-only set of concept groups keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptTable {
    groups: IndexMap<String, ConceptGroup>,
}

/// (name, keywords) for every built-in group
const BUILTIN_GROUPS: &[(&str, &[&str])] = &[
    (
        "doelgroep",
        &[
            "doelgroep", "target", "kinderen", "leeftijd", "publiek", "lezers",
            "jaar", "oud", "volwassenen", "studenten", "leerlingen", "tieners",
            "audience",
        ],
    ),
    (
        "lengte",
        &[
            "lengte", "woorden", "zinnen", "regels", "alinea", "pagina",
            "tekens", "kort", "maximaal", "minimaal", "length", "words",
        ],
    ),
    (
        "toon",
        &[
            "toon", "stijl", "tone", "formeel", "informeel", "vriendelijk",
            "humor", "serieus", "enthousiast", "schrijfstijl",
        ],
    ),
    (
        "formaat",
        &[
            "formaat", "format", "lijst", "opsomming", "tabel", "structuur",
            "kopjes", "bullet", "gedicht", "verhaal", "email", "brief",
        ],
    ),
    (
        "onderwerp",
        &["onderwerp", "thema", "topic", "inhoud", "focus", "rondom"],
    ),
    (
        "rol",
        &[
            "rol", "role", "persona", "expert", "leraar", "docent", "fungeer",
            "gedraag", "je bent", "jij bent",
        ],
    ),
    (
        "context",
        &[
            "context", "achtergrond", "situatie", "omstandigheden", "aanleiding",
            "background",
        ],
    ),
    (
        "intentie",
        &[
            "bedoeling", "purpose", "goal", "zodat", "waarom", "intentie",
            "beoogd",
        ],
    ),
    (
        "voorbeelden",
        &[
            "voorbeeld", "voorbeelden", "example", "bijvoorbeeld", "zoals",
            "illustratie",
        ],
    ),
    (
        "taal",
        &[
            "taal", "language", "nederlands", "engels", "dutch", "english",
            "vertaal", "taalniveau",
        ],
    ),
    (
        "details",
        &[
            "details", "specifiek", "concreet", "precies", "nauwkeurig",
            "gedetailleerd",
        ],
    ),
    (
        "beperkingen",
        &[
            "beperking", "restrictie", "vermijd", "zonder", "constraint",
            "verboden", "mag niet",
        ],
    ),
    (
        "stappen",
        &[
            "stappen", "stapsgewijs", "eerst", "daarna", "volgorde", "step",
            "steps",
        ],
    ),
    (
        "creativiteit",
        &[
            "creatief", "origineel", "fantasie", "verzin", "bedenk", "uniek",
            "verrassend", "creative",
        ],
    ),
    (
        "emotie",
        &[
            "gevoel", "gevoelens", "emotie", "blij", "verdrietig", "spannend",
            "sfeer",
        ],
    ),
    (
        "kanaal",
        &[
            "kanaal", "platform", "website", "social", "instagram",
            "nieuwsbrief", "medium", "presentatie",
        ],
    ),
    (
        "evaluatie",
        &[
            "feedback", "beoordeel", "evalueer", "controleer", "verbeter",
            "review",
        ],
    ),
];

static BUILTIN: Lazy<Arc<ConceptTable>> = Lazy::new(|| {
    Arc::new(ConceptTable::from_groups(
        BUILTIN_GROUPS
            .iter()
            .map(|(name, keywords)| ConceptGroup::new(*name, keywords.iter())),
    ))
});

#[derive(Deserialize)]
struct ConceptFile {
    #[serde(default)]
    concepts: Vec<ConceptGroup>,
}

impl ConceptTable {
    /// The process-wide built-in table
    pub fn builtin() -> Arc<ConceptTable> {
        Arc::clone(&BUILTIN)
    }

    /// Build a table; later groups replace earlier ones with the same name
    pub fn from_groups(groups: impl IntoIterator<Item = ConceptGroup>) -> Self {
        let mut table = Self::default();
        for group in groups {
            table.groups.insert(group.name.clone(), group);
        }
        table
    }

    /// Return a copy of this table extended with `extra`.
    ///
    /// A group named like an existing one replaces it in place.
    pub fn extended(&self, extra: impl IntoIterator<Item = ConceptGroup>) -> Self {
        let mut table = self.clone();
        for group in extra {
            table.groups.insert(group.name.clone(), group);
        }
        table
    }

    /// Parse `[[concepts]]` tables from a TOML string
    pub fn groups_from_toml(content: &str) -> Result<Vec<ConceptGroup>, LoadError> {
        let file: ConceptFile =
            toml::from_str(content).map_err(|e| LoadError::Parse(e.to_string()))?;
        Ok(file
            .concepts
            .into_iter()
            .map(|g| ConceptGroup::new(g.name, g.keywords))
            .collect())
    }

    /// Load the built-in table extended with the groups in a TOML file
    pub fn load_extended(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let extra = Self::groups_from_toml(&content)?;
        tracing::info!("Loaded {} concept groups from {:?}", extra.len(), path);
        Ok(BUILTIN.extended(extra))
    }

    pub fn get(&self, name: &str) -> Option<&ConceptGroup> {
        self.groups.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConceptGroup> {
        self.groups.values()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
