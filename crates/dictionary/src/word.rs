use serde::{Deserialize, Serialize};

/// A full dictionary entry for a single word, as returned by the API and as
/// stored in the local cache. Identity is the word itself, compared
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordDefinition {
    pub word: String,
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    pub origin: Option<String>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phonetic {
    pub text: Option<String>,
    pub audio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trimmed response from api.dictionaryapi.dev/api/v2/entries/en/hello
    const HELLO_JSON: &str = r#"[
        {
            "word": "hello",
            "phonetic": "həˈləʊ",
            "phonetics": [
                { "text": "həˈləʊ", "audio": "https://lex-audio.useremarkable.com/mp3/hello_us_1_rr.mp3" },
                { "text": "hɛˈləʊ" }
            ],
            "origin": "early 19th century: variant of earlier hollo; related to holla.",
            "meanings": [
                {
                    "partOfSpeech": "exclamation",
                    "definitions": [
                        {
                            "definition": "used as a greeting or to begin a phone conversation.",
                            "example": "hello there, Katie!",
                            "synonyms": ["hi", "howdy"],
                            "antonyms": []
                        }
                    ]
                },
                {
                    "partOfSpeech": "verb",
                    "definitions": [
                        { "definition": "say or shout 'hello'." }
                    ]
                }
            ]
        }
    ]"#;

    #[test]
    fn deserializes_api_response() {
        let entries: Vec<WordDefinition> = serde_json::from_str(HELLO_JSON).unwrap();
        assert_eq!(entries.len(), 1);

        let hello = &entries[0];
        assert_eq!(hello.word, "hello");
        assert_eq!(hello.phonetic.as_deref(), Some("həˈləʊ"));
        assert_eq!(hello.phonetics.len(), 2);
        assert_eq!(hello.phonetics[1].audio, None);
        assert_eq!(hello.meanings[0].part_of_speech, "exclamation");
        assert_eq!(
            hello.meanings[0].definitions[0].synonyms,
            vec!["hi", "howdy"]
        );
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let entries: Vec<WordDefinition> = serde_json::from_str(HELLO_JSON).unwrap();
        let verb = &entries[0].meanings[1].definitions[0];
        assert_eq!(verb.example, None);
        assert!(verb.synonyms.is_empty());
        assert!(verb.antonyms.is_empty());
    }

    #[test]
    fn round_trips_through_json() {
        let entries: Vec<WordDefinition> = serde_json::from_str(HELLO_JSON).unwrap();
        let encoded = serde_json::to_string(&entries[0]).unwrap();
        let decoded: WordDefinition = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, entries[0]);
    }
}
