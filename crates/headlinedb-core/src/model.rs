//! Record and annotation types shared by every crate in the workspace.

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of a compound score labelled [`SentimentLabel::Positive`].
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Upper bound (inclusive) of a compound score labelled [`SentimentLabel::Negative`].
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Three-way sentiment label persisted on an annotated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Derive the label from a compound score.
    ///
    /// Both thresholds are inclusive on the non-neutral side: `0.05` is
    /// positive and `-0.05` is negative.
    #[must_use]
    pub fn from_compound(score: f64) -> Self {
        if score >= POSITIVE_THRESHOLD {
            Self::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// The string stored in the `sentimentAnalysis` field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }

    /// Parse a stored label. Returns `None` for anything but the three
    /// canonical spellings.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Positive" => Some(Self::Positive),
            "Negative" => Some(Self::Negative),
            "Neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One occurrence of a named entity inside a record's text.
///
/// Serializes to the persisted shape `{"entity": {"text": ..., "type": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "StoredMention", into = "StoredMention")]
pub struct EntityMention {
    pub surface_text: String,
    pub entity_type: String,
}

impl EntityMention {
    #[must_use]
    pub fn new(surface_text: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            surface_text: surface_text.into(),
            entity_type: entity_type.into(),
        }
    }

    /// True when both halves of the aggregation key are non-empty.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.surface_text.is_empty() && !self.entity_type.is_empty()
    }
}

#[derive(Serialize, Deserialize)]
struct StoredMention {
    entity: StoredEntity,
}

#[derive(Serialize, Deserialize)]
struct StoredEntity {
    #[serde(default)]
    text: String,
    #[serde(rename = "type", default)]
    kind: String,
}

impl From<StoredMention> for EntityMention {
    fn from(stored: StoredMention) -> Self {
        Self {
            surface_text: stored.entity.text,
            entity_type: stored.entity.kind,
        }
    }
}

impl From<EntityMention> for StoredMention {
    fn from(mention: EntityMention) -> Self {
        Self {
            entity: StoredEntity {
                text: mention.surface_text,
                kind: mention.entity_type,
            },
        }
    }
}

/// A headline as held by the record store.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Store-assigned position; defines store iteration order.
    pub seq: i64,
    pub record_id: String,
    pub text: String,
    pub entities: Vec<EntityMention>,
    /// `None` until the first annotation pass has written a label.
    pub sentiment: Option<SentimentLabel>,
}

/// A raw row produced by ingestion, before the store assigns a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub record_id: String,
    pub text: String,
}

/// Output of annotating one record. Replaces the record's `entities` and
/// `sentiment` as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationResult {
    pub entities: Vec<EntityMention>,
    pub sentiment: SentimentLabel,
}

/// One row of the entity-frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityFrequency {
    pub surface_text: String,
    pub entity_type: String,
    pub frequency: u64,
}
