use std::time::Duration;

use reqwest::StatusCode;

use crate::{DictionaryError, WordDefinition};

const DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

// The API answers slowly for uncommon words but never this slowly.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) async fn get_definitions(
    client: &reqwest::Client,
    word: &str,
) -> Result<Vec<WordDefinition>, DictionaryError> {
    let res = client
        .get(format!("{DICTIONARY_API_URL}/{word}"))
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await
        .map_err(DictionaryError::Fetch)?;
    match res.status() {
        // The API reports an unknown word as 404 with a small JSON apology.
        // That is a successful lookup with zero entries, not a failure.
        StatusCode::NOT_FOUND => Ok(Vec::new()),
        status if status.is_success() => {
            let body = res.text().await.map_err(DictionaryError::Fetch)?;
            serde_json::from_str(&body).map_err(DictionaryError::Deserialize)
        }
        status => Err(DictionaryError::Status(status.as_u16())),
    }
}
