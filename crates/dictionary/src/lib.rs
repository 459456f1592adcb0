use api::get_definitions;

mod api;
mod word;

pub use word::{Definition, Meaning, Phonetic, WordDefinition};

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to reach the dictionary service: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("could not parse the dictionary response: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("dictionary service returned status {0}")]
    Status(u16),
}

pub struct Dictionary {
    client: reqwest::Client,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Looks a word up and returns every entry the API knows for it, most
    /// relevant first. An unknown word yields an empty list rather than an
    /// error.
    pub async fn fetch_definition(
        &self,
        word: &str,
    ) -> Result<Vec<WordDefinition>, DictionaryError> {
        get_definitions(&self.client, word).await
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
