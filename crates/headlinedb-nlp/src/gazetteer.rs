//! Dictionary-based entity extractor.
//!
//! A gazetteer maps each entity type to the surface forms that denote it:
//!
//! ```yaml
//! ORG:
//!   - Apple
//!   - Bank of America
//! GPE:
//!   - New York
//! ```
//!
//! Matching is case-sensitive on word boundaries. At each position the longest
//! surface form wins and matches never overlap.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use headlinedb_core::{EntityExtractor, EntityMention, ModelError};
use regex::Regex;

use crate::error::NlpError;

/// [`EntityExtractor`] backed by a fixed surface-form dictionary.
#[derive(Debug, Clone)]
pub struct GazetteerExtractor {
    pattern: Option<Regex>,
    types: HashMap<String, String>,
}

impl GazetteerExtractor {
    /// Build from `(entity_type, surface_forms)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`NlpError::Gazetteer`] if a type or surface form is blank, or
    /// if one surface form is listed under two different types.
    pub fn from_entries<I, F>(entries: I) -> Result<Self, NlpError>
    where
        I: IntoIterator<Item = (String, F)>,
        F: IntoIterator<Item = String>,
    {
        let mut types: HashMap<String, String> = HashMap::new();

        for (entity_type, forms) in entries {
            if entity_type.trim().is_empty() {
                return Err(NlpError::Gazetteer("blank entity type".to_string()));
            }
            for form in forms {
                if form.trim().is_empty() {
                    return Err(NlpError::Gazetteer(format!(
                        "blank surface form under {entity_type}"
                    )));
                }
                match types.get(&form) {
                    Some(existing) if *existing != entity_type => {
                        return Err(NlpError::Gazetteer(format!(
                            "'{form}' is listed as both {existing} and {entity_type}"
                        )));
                    }
                    Some(_) => {}
                    None => {
                        types.insert(form, entity_type.clone());
                    }
                }
            }
        }

        let pattern = build_pattern(types.keys().map(String::as_str))?;
        Ok(Self { pattern, types })
    }

    /// Parse a YAML gazetteer document.
    ///
    /// # Errors
    ///
    /// Returns [`NlpError::Yaml`] for invalid YAML and [`NlpError::Gazetteer`]
    /// for invalid entries.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, NlpError> {
        let parsed: BTreeMap<String, Vec<String>> = serde_yaml::from_str(yaml)?;
        Self::from_entries(parsed)
    }

    /// Load a YAML gazetteer from disk.
    ///
    /// # Errors
    ///
    /// Returns [`NlpError::Io`] if the file cannot be read, otherwise as
    /// [`GazetteerExtractor::from_yaml_str`].
    pub fn load(path: &Path) -> Result<Self, NlpError> {
        let raw = std::fs::read_to_string(path).map_err(|source| NlpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let gazetteer = Self::from_yaml_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            surface_forms = gazetteer.len(),
            "gazetteer loaded"
        );
        Ok(gazetteer)
    }

    /// Number of distinct surface forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Every gazetteer match in `text`, left to right.
    #[must_use]
    pub fn mentions(&self, text: &str) -> Vec<EntityMention> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };
        pattern
            .find_iter(text)
            .filter_map(|m| {
                self.types
                    .get(m.as_str())
                    .map(|kind| EntityMention::new(m.as_str(), kind.as_str()))
            })
            .collect()
    }
}

impl EntityExtractor for GazetteerExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<EntityMention>, ModelError> {
        Ok(self.mentions(text))
    }
}

/// One alternation over every surface form, longest first so leftmost-first
/// matching picks the longest form at each position.
fn build_pattern<'a>(forms: impl Iterator<Item = &'a str>) -> Result<Option<Regex>, NlpError> {
    let mut forms: Vec<&str> = forms.collect();
    if forms.is_empty() {
        return Ok(None);
    }
    forms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    // Same Unicode word class that `\b` is defined over.
    let word = Regex::new(r"\A\w\z")?;
    let is_word_char = |c: char| word.is_match(c.encode_utf8(&mut [0; 4]));

    let alternatives: Vec<String> = forms
        .iter()
        .map(|form| {
            let starts_word = form.chars().next().is_some_and(is_word_char);
            let ends_word = form.chars().next_back().is_some_and(is_word_char);
            format!(
                "{}{}{}",
                if starts_word { r"\b" } else { "" },
                regex::escape(form),
                if ends_word { r"\b" } else { "" },
            )
        })
        .collect();

    let pattern = Regex::new(&format!("(?:{})", alternatives.join("|")))?;
    Ok(Some(pattern))
}
