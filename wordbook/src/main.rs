use std::sync::Arc;

use dictionary::{Dictionary, WordDefinition};
use wordbook::{AlwaysOnline, Cache, WordRepository};

use utilities::input;
mod utilities;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cache = Cache::initialize().await?;
    let repository = WordRepository::new(
        Arc::new(Dictionary::new()),
        Arc::new(cache),
        Arc::new(AlwaysOnline),
    );

    loop {
        let line = input(">> ")?;
        let line = line.trim();
        let mut command_parts = line.split_ascii_whitespace();
        if let Some(command) = command_parts.next() {
            match command {
                "exit" | "leave" | "quit" | "e" | "q" | "l" => {
                    break;
                }
                "define" | "find" => {
                    let word = command_parts.collect::<Vec<&str>>().join(" ");
                    define_word(&repository, &word).await;
                }
                "cached" => {
                    let word = command_parts.collect::<Vec<&str>>().join(" ");
                    show_cached(&repository, &word).await;
                }
                "history" => {
                    show_history(&repository).await;
                }
                _ => {
                    println!("Unknown command {command}.");
                }
            }
        }
    }
    Ok(())
}

async fn define_word(repository: &WordRepository, word: &str) {
    match repository.fetch_definition(word).await {
        Ok(definition) => print_definition(&definition),
        Err(error) => {
            println!("{error}");
        }
    }
}

async fn show_cached(repository: &WordRepository, word: &str) {
    match repository.get_cached_definition(word).await {
        Ok(Some(definition)) => print_definition(&definition),
        Ok(None) => {
            println!("This word has not been looked up yet.");
        }
        Err(error) => {
            println!("{error}");
        }
    }
}

async fn show_history(repository: &WordRepository) {
    match repository.past_searches().await {
        Ok(searches) if searches.is_empty() => {
            println!("No past searches.");
        }
        Ok(searches) => {
            for definition in searches {
                println!("{}", definition.word);
            }
        }
        Err(error) => {
            println!("{error}");
        }
    }
}

fn print_definition(definition: &WordDefinition) {
    println!("Showing definition for '{}':", definition.word);
    if let Some(phonetic) = &definition.phonetic {
        println!("  {phonetic}");
    }
    if let Some(origin) = &definition.origin {
        println!("  origin: {origin}");
    }
    for meaning in &definition.meanings {
        println!("    {}:", meaning.part_of_speech);
        for entry in &meaning.definitions {
            println!("        {}", entry.definition);
            if let Some(example) = &entry.example {
                println!("          example: {example}");
            }
            if !entry.synonyms.is_empty() {
                println!("          synonyms: {}", entry.synonyms.join(", "));
            }
            if !entry.antonyms.is_empty() {
                println!("          antonyms: {}", entry.antonyms.join(", "));
            }
        }
    }
}
