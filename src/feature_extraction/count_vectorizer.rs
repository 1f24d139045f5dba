//! `CountVectorizer` turns raw documents into a sparse term-count matrix.
//!
//! Documents are lowercased and split into tokens of two or more word
//! characters. Features are the n-grams of those tokens for every `n` in
//! the configured range, joined by a single space. A learned vocabulary is
//! sorted lexicographically so column order does not depend on document
//! order; a fixed vocabulary keeps the order it was given in.
//!
//! # Examples
//!
//! ```
//! use graphofdocs::prelude::*;
//! use graphofdocs::feature_extraction::CountVectorizer;
//!
//! let documents = vec!["the cat sat", "the cat sat on the cat"];
//!
//! let mut vectorizer = CountVectorizer::new();
//! let X = vectorizer.fit_transform(&documents).unwrap();
//!
//! assert!(X.rows() == 2 && X.cols() == 4);
//! assert_eq!(vectorizer.feature_names(), vec!["cat", "on", "sat", "the"]);
//! assert!(X.get(1, 0) == 2.0);
//! ```

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::prelude::*;


fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"))
}


/// Split a document into lowercase tokens of at least two word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug)]
pub struct CountVectorizer {
    ngram_range: (usize, usize),
    binary: bool,
    fixed_vocabulary: bool,
    vocabulary: HashMap<String, usize>,
    feature_names: Vec<String>,
}


impl Default for CountVectorizer {
    fn default() -> CountVectorizer {
        CountVectorizer::new()
    }
}


impl CountVectorizer {
    /// Create a new unigram `CountVectorizer`.
    pub fn new() -> CountVectorizer {
        CountVectorizer {
            ngram_range: (1, 1),
            binary: false,
            fixed_vocabulary: false,
            vocabulary: HashMap::new(),
            feature_names: Vec::new(),
        }
    }

    /// Create a vectorizer restricted to the given terms, in the given order.
    ///
    /// Repeated terms keep their first position. `fit` leaves a fixed
    /// vocabulary untouched.
    pub fn with_vocabulary<I, S>(terms: I) -> CountVectorizer
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vectorizer = CountVectorizer::new();

        for term in terms {
            let term = term.into();
            if !vectorizer.vocabulary.contains_key(&term) {
                vectorizer.vocabulary.insert(term.clone(), vectorizer.feature_names.len());
                vectorizer.feature_names.push(term);
            }
        }

        vectorizer.fixed_vocabulary = true;
        vectorizer
    }

    /// Extract all n-grams with `min_n <= n <= max_n`.
    pub fn ngram_range(&mut self, min_n: usize, max_n: usize) -> &mut CountVectorizer {
        self.ngram_range = (min_n.max(1), max_n.max(min_n.max(1)));
        self
    }

    /// Record presence (1.0) instead of counts.
    pub fn binary(&mut self, binary: bool) -> &mut CountVectorizer {
        self.binary = binary;
        self
    }

    /// Feature names in column order.
    pub fn feature_names(&self) -> Vec<&str> {
        self.feature_names.iter().map(|name| name.as_str()).collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.feature_names.len()
    }

    /// Column index of a feature, if it is in the vocabulary.
    pub fn column(&self, feature: &str) -> Option<usize> {
        self.vocabulary.get(feature).cloned()
    }

    fn analyze(&self, document: &str) -> Vec<String> {
        let tokens = tokenize(document);
        let (min_n, max_n) = self.ngram_range;

        let mut features = Vec::new();

        for n in min_n..(max_n + 1) {
            if n == 1 {
                features.extend(tokens.iter().cloned());
            } else {
                features.extend(tokens.windows(n).map(|window| window.join(" ")));
            }
        }

        features
    }

    /// Learn the vocabulary of the documents.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<(), &'static str> {

        if !self.fixed_vocabulary {
            let terms = documents
                .iter()
                .flat_map(|document| self.analyze(document.as_ref()))
                .collect::<BTreeSet<_>>();

            self.feature_names = terms.into_iter().collect();
            self.vocabulary = self.feature_names
                .iter()
                .enumerate()
                .map(|(idx, name)| (name.clone(), idx))
                .collect();
        }

        if self.feature_names.is_empty() {
            return Err("Empty vocabulary; the documents contain no tokens");
        }

        Ok(())
    }

    /// Count vocabulary features in each document. Unknown features are ignored.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> SparseRowArray {

        let rows = documents
            .iter()
            .map(|document| {
                let mut row = self.analyze(document.as_ref())
                    .iter()
                    .filter_map(|feature| self.vocabulary.get(feature))
                    .map(|&col| (col, 1.0))
                    .collect::<Vec<_>>();

                if self.binary {
                    row.sort_by_key(|&(col, _)| col);
                    row.dedup_by_key(|&mut (col, _)| col);
                }

                row
            })
            .collect();

        SparseRowArray::from_rows(self.feature_names.len(), rows)
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<SparseRowArray, &'static str> {
        self.fit(documents)?;
        Ok(self.transform(documents))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_need_two_word_characters() {
        assert_eq!(tokenize("A cat, a HAT-trick; x2 _y"),
                   vec!["cat", "hat", "trick", "x2", "_y"]);
    }

    #[test]
    fn bigrams_join_adjacent_tokens() {
        let documents = vec!["red fox jumps", "red fox"];

        let mut vectorizer = CountVectorizer::new();
        vectorizer.ngram_range(2, 2);

        let X = vectorizer.fit_transform(&documents).unwrap();

        assert_eq!(vectorizer.feature_names(), vec!["fox jumps", "red fox"]);
        assert!(X.get(0, 0) == 1.0 && X.get(0, 1) == 1.0);
        assert!(X.get(1, 0) == 0.0 && X.get(1, 1) == 1.0);
    }

    #[test]
    fn fixed_vocabulary_ignores_other_terms() {
        let mut vectorizer = CountVectorizer::with_vocabulary(vec!["zebra", "apple", "zebra"]);
        let X = vectorizer.fit_transform(&["apple apple pear zebra"]).unwrap();

        assert_eq!(vectorizer.feature_names(), vec!["zebra", "apple"]);
        assert!(X.cols() == 2);
        assert!(X.get(0, 0) == 1.0 && X.get(0, 1) == 2.0);
    }

    #[test]
    fn binary_counts_presence() {
        let mut vectorizer = CountVectorizer::new();
        vectorizer.binary(true);

        let X = vectorizer.fit_transform(&["go go go stop"]).unwrap();

        assert!(X.get(0, 0) == 1.0 && X.get(0, 1) == 1.0);
    }

    #[test]
    fn empty_vocabulary_is_an_error() {
        let mut vectorizer = CountVectorizer::new();

        assert!(vectorizer.fit(&["a b c", ""]).is_err());
    }
}
