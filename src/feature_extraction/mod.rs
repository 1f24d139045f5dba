//! Feature extraction from raw text.

pub mod count_vectorizer;

pub use self::count_vectorizer::{tokenize, CountVectorizer};
