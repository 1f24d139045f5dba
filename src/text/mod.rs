//! Text cleaning: turn raw document text into a sequence of words.
//!
//! `WordCleaner` lowercases the text, splits it into Unicode words and
//! keeps the alphabetic ones of at least two characters. Stopwords are
//! removed unless `insert_stopwords` is set, and words are reduced to
//! their English Snowball stem when `stem` is set.
//!
//! `lemmatize` has no implementation and is ignored. `extend_window`
//! controls how word windows are formed when the graph is built, so it
//! does not change the word sequence returned here.
//!
//! # Examples
//!
//! ```
//! use graphofdocs::text::{CleaningFlags, TextCleaner, WordCleaner};
//!
//! let flags = CleaningFlags::default();
//! let words = WordCleaner::new().generate_words("The rockets were launched in 1969!", &flags);
//!
//! assert_eq!(words, vec!["rockets", "launched"]);
//! ```

use std::collections::HashSet;

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;


const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
    "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
    "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor",
    "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
    "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
];


/// Switches passed through to the text cleaner.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct CleaningFlags {
    pub extend_window: bool,
    pub insert_stopwords: bool,
    pub lemmatize: bool,
    pub stem: bool,
}


impl Default for CleaningFlags {
    fn default() -> CleaningFlags {
        CleaningFlags {
            extend_window: true,
            insert_stopwords: false,
            lemmatize: false,
            stem: false,
        }
    }
}


/// The text-cleaning collaborator.
pub trait TextCleaner {
    fn generate_words(&self, raw_text: &str, flags: &CleaningFlags) -> Vec<String>;
}


pub struct WordCleaner {
    stopwords: HashSet<&'static str>,
    stemmer: Stemmer,
}


impl Default for WordCleaner {
    fn default() -> WordCleaner {
        WordCleaner::new()
    }
}


impl WordCleaner {
    pub fn new() -> WordCleaner {
        WordCleaner {
            stopwords: STOPWORDS.iter().cloned().collect(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}


impl TextCleaner for WordCleaner {
    fn generate_words(&self, raw_text: &str, flags: &CleaningFlags) -> Vec<String> {
        raw_text
            .unicode_words()
            .map(|word| word.to_lowercase())
            .filter(|word| word.chars().count() > 1 && word.chars().all(char::is_alphabetic))
            .filter(|word| flags.insert_stopwords || !self.is_stopword(word))
            .map(|word| {
                if flags.stem {
                    self.stemmer.stem(&word).into_owned()
                } else {
                    word
                }
            })
            .collect()
    }
}
