pub mod cache;
pub mod connectivity;
pub mod error;
pub mod repository;

pub use cache::{Cache, CacheError};
pub use connectivity::{AlwaysOnline, ConnectivityMonitor, ConnectivityProbe};
pub use error::LookupError;
pub use repository::{LocalCache, RemoteSource, WordRepository};

pub use dictionary::{Definition, Dictionary, DictionaryError, Meaning, Phonetic, WordDefinition};
