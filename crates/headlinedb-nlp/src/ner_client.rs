//! Client for a spaCy-style named-entity recognition HTTP service.
//!
//! `POST {base}/ents` with `{"text": "..."}` returns the entities in order of
//! appearance as `[{"text": "Apple", "label": "ORG"}, ...]`.

use std::time::Duration;

use headlinedb_core::{EntityExtractor, EntityMention, ModelError};
use serde::{Deserialize, Serialize};

use crate::error::NlpError;

/// NER HTTP client.
pub struct NerClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct EntsRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EntsResponseItem {
    text: String,
    #[serde(alias = "type")]
    label: String,
}

impl NerClient {
    /// Create a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`NlpError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, NlpError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("headlinedb/0.1 (annotation)")
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/ents", base_url.trim_end_matches('/')),
        })
    }

    /// Extract entity mentions from one text.
    ///
    /// # Errors
    ///
    /// Returns [`NlpError::Ner`] if the request fails, the service answers
    /// with a non-success status, or the body cannot be parsed.
    pub async fn entities(&self, text: &str) -> Result<Vec<EntityMention>, NlpError> {
        let response = self
            .client
            .post(&self.url)
            .json(&EntsRequest { text })
            .send()
            .await
            .map_err(|e| NlpError::Ner(format!("NER request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(NlpError::Ner(format!(
                "NER service returned status {}",
                response.status()
            )));
        }

        let items: Vec<EntsResponseItem> = response
            .json()
            .await
            .map_err(|e| NlpError::Ner(format!("NER response parse error: {e}")))?;

        Ok(items
            .into_iter()
            .map(|item| EntityMention::new(item.text, item.label))
            .collect())
    }
}

impl EntityExtractor for NerClient {
    async fn extract(&self, text: &str) -> Result<Vec<EntityMention>, ModelError> {
        self.entities(text)
            .await
            .map_err(|e| ModelError::extractor(e.to_string()))
    }
}
