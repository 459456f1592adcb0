use dictionary::DictionaryError;

use crate::cache::CacheError;

/// The single error surface a caller of the repository sees: exactly one
/// kind per failure path, after every local recovery (cache fallback,
/// swallowed soft failures) has already been tried.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("enter a word to look up")]
    InvalidInput,
    #[error("no definition found for this word")]
    NoDataFound,
    #[error("no internet connection and nothing cached for this word")]
    NetworkUnavailable,
    #[error("dictionary request failed: {0}")]
    Remote(#[source] DictionaryError),
    #[error("could not read the dictionary response: {0}")]
    Data(#[source] DictionaryError),
    #[error("search history unavailable: {0}")]
    Storage(#[from] CacheError),
}

impl LookupError {
    /// Classifies a remote failure whose cache fallback came up empty.
    pub(crate) fn from_remote(error: DictionaryError) -> Self {
        match error {
            DictionaryError::Deserialize(_) => LookupError::Data(error),
            DictionaryError::Fetch(_) | DictionaryError::Status(_) => LookupError::Remote(error),
        }
    }
}
