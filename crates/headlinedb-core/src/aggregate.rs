//! Analytical read queries over the enriched corpus.
//!
//! Both queries read persisted annotations only. Nothing here depends on
//! state accumulated while annotating.

use std::collections::HashMap;

use crate::error::{InputError, StoreError};
use crate::model::{EntityFrequency, EntityMention};
use crate::store::RecordStore;

/// Ranking size used when the caller does not pick one.
pub const DEFAULT_TOP_K: usize = 100;

/// Count mentions by `(surface_text, entity_type)` and return the `limit`
/// most frequent.
///
/// Mentions with an empty surface text or type are ignored. Ties on
/// frequency are broken by surface text, then entity type, both ascending
/// by byte order.
#[must_use]
pub fn rank_entities<'a>(
    mentions: impl IntoIterator<Item = &'a EntityMention>,
    limit: usize,
) -> Vec<EntityFrequency> {
    let mut counts: HashMap<(&str, &str), u64> = HashMap::new();
    for mention in mentions {
        if !mention.is_well_formed() {
            continue;
        }
        *counts
            .entry((mention.surface_text.as_str(), mention.entity_type.as_str()))
            .or_default() += 1;
    }

    let mut ranked: Vec<EntityFrequency> = counts
        .into_iter()
        .map(|((text, kind), frequency)| EntityFrequency {
            surface_text: text.to_string(),
            entity_type: kind.to_string(),
            frequency,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then_with(|| a.surface_text.cmp(&b.surface_text))
            .then_with(|| a.entity_type.cmp(&b.entity_type))
    });
    ranked.truncate(limit);
    ranked
}

/// Errors surfaced by [`Aggregator`] queries.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Runs the top-K ranking and the per-entity lookup against a store.
pub struct Aggregator<'a, S> {
    store: &'a S,
}

impl<'a, S: RecordStore> Aggregator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The `k` most frequently mentioned entities across the store.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Input`] when `k` is zero and
    /// [`QueryError::Store`] when the store query fails.
    pub async fn top_entities(&self, k: usize) -> Result<Vec<EntityFrequency>, QueryError> {
        if k == 0 {
            return Err(InputError::ZeroLimit.into());
        }
        let ranked = self.store.top_entities(k).await?;
        tracing::debug!(k, returned = ranked.len(), "entity ranking computed");
        Ok(ranked)
    }

    /// Text of every headline with a mention exactly equal to `entity_name`.
    ///
    /// Matching is case-sensitive and ignores the entity type. An empty name,
    /// or one containing NUL (which no stored mention can hold), matches
    /// nothing. No match is an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store query fails.
    pub async fn headlines_for(&self, entity_name: &str) -> Result<Vec<String>, StoreError> {
        if entity_name.is_empty() || entity_name.contains('\0') {
            return Ok(Vec::new());
        }
        let headlines = self.store.headlines_for(entity_name).await?;
        tracing::debug!(
            entity = entity_name,
            matches = headlines.len(),
            "entity lookup completed"
        );
        Ok(headlines)
    }
}
