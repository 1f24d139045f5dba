//! The Dataset Frame: every selected document with its label, encoded
//! class number and cleaned text, in a seeded shuffled order, together
//! with the one train/test split shared by every evaluator.
//!
//! Labels are encoded over the label vocabulary of the whole dataset,
//! before documents outside the selected communities are dropped, so the
//! class number of a label never depends on which documents were kept.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::community::CommunityIndex;
use crate::cross_validation::{shuffled_positions, train_test_split};
use crate::datasets::RawDocument;
use crate::error::{Error, Result};
use crate::prelude::*;
use crate::text::{CleaningFlags, TextCleaner};


/// Maps label strings to class numbers `0..n`, in sorted label order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}


impl LabelEncoder {
    pub fn fit<I, S>(labels: I) -> LabelEncoder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes = labels.into_iter().map(Into::into).collect::<Vec<String>>();
        classes.sort();
        classes.dedup();

        LabelEncoder { classes }
    }

    pub fn transform(&self, label: &str) -> Option<usize> {
        self.classes.binary_search_by(|class| class.as_str().cmp(label)).ok()
    }

    pub fn inverse_transform(&self, class: usize) -> Option<&str> {
        self.classes.get(class).map(|label| label.as_str())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}


#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub identifier: String,
    pub label: String,
    pub class: usize,
    pub text: String,
}


/// Row positions of the training and test documents.
#[derive(Clone, Debug, PartialEq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}


#[derive(Clone, Copy, Debug)]
pub struct FrameOptions {
    pub flags: CleaningFlags,
    pub seed: u64,
    pub test_size: f32,
}


#[derive(Clone, Debug)]
pub struct DatasetFrame {
    documents: Vec<Document>,
    encoder: LabelEncoder,
    split: Split,
}


impl DatasetFrame {
    /// Build the frame from the raw dataset.
    ///
    /// Only documents present in `selected` are kept. Fails with
    /// `Error::EmptyCorpus` when none are, and with `Error::InvalidSplit`
    /// when the kept documents cannot be split with `options.test_size`.
    pub fn build<L, C>(raw: &[RawDocument],
                       label_extractor: L,
                       cleaner: &C,
                       selected: &CommunityIndex,
                       options: &FrameOptions)
                       -> Result<DatasetFrame>
    where
        L: Fn(&str) -> String,
        C: TextCleaner + ?Sized,
    {
        if options.flags.lemmatize {
            warn!("lemmatization is not supported; continuing without it");
        }

        let encoder = LabelEncoder::fit(raw.iter().map(|doc| label_extractor(&doc.identifier)));

        let mut seen = HashSet::new();
        let mut kept = Vec::new();

        for doc in raw {
            if !selected.contains(&doc.identifier) || !seen.insert(doc.identifier.as_str()) {
                continue;
            }

            let label = label_extractor(&doc.identifier);
            let class = encoder.transform(&label).ok_or_else(|| Error::UnknownDocument(doc.identifier.clone()))?;

            kept.push(Document {
                identifier: doc.identifier.clone(),
                label,
                class,
                text: cleaner.generate_words(&doc.text, &options.flags).join(" "),
            });
        }

        if kept.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let missing = selected.num_documents() - kept.len();
        if missing > 0 {
            warn!(missing, "selected documents absent from the dataset");
        }

        let order = shuffled_positions(kept.len(), options.seed);
        let mut slots = kept.into_iter().map(Some).collect::<Vec<_>>();
        let documents = order
            .into_iter()
            .filter_map(|position| slots[position].take())
            .collect::<Vec<_>>();

        let (train, test) = train_test_split(documents.len(), options.test_size, options.seed)
            .map_err(|reason| Error::InvalidSplit(reason.to_string()))?;

        info!(documents = documents.len(),
              classes = encoder.classes().len(),
              train = train.len(),
              test = test.len(),
              "built dataset frame");

        Ok(DatasetFrame {
            documents,
            encoder,
            split: Split { train, test },
        })
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    pub fn split(&self) -> &Split {
        &self.split
    }

    /// Cleaned texts of every row, in row order.
    pub fn texts(&self) -> Vec<&str> {
        self.documents.iter().map(|doc| doc.text.as_str()).collect()
    }

    /// Class numbers of every row as a column vector.
    pub fn targets(&self) -> Array {
        Array::from(self.documents.iter().map(|doc| doc.class as f32).collect::<Vec<_>>())
    }

    pub fn train_documents(&self) -> impl Iterator<Item = &Document> {
        self.split.train.iter().map(move |&position| &self.documents[position])
    }

    pub fn test_documents(&self) -> impl Iterator<Item = &Document> {
        self.split.test.iter().map(move |&position| &self.documents[position])
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::datasets::label_from_identifier;
    use crate::graph::CommunityRecord;
    use crate::text::WordCleaner;

    fn raw() -> Vec<RawDocument> {
        vec![RawDocument::new("space_1", "Orbit of the moon"),
             RawDocument::new("sport_1", "A late goal"),
             RawDocument::new("space_2", "Rocket launch"),
             RawDocument::new("sport_2", "Match report"),
             RawDocument::new("autos_1", "Engine noise"),
             RawDocument::new("space_3", "Mars orbit"),
             RawDocument::new("sport_3", "Penalty goal")]
    }

    fn index() -> CommunityIndex {
        CommunityIndex::build(&[CommunityRecord::new(1, vec!["space_1", "space_2", "space_3"]),
                                CommunityRecord::new(2, vec!["sport_1", "sport_2", "sport_3"])])
            .unwrap()
    }

    fn options() -> FrameOptions {
        FrameOptions { flags: CleaningFlags::default(), seed: 42, test_size: 0.33 }
    }

    fn build() -> Result<DatasetFrame> {
        DatasetFrame::build(&raw(),
                            |id: &str| label_from_identifier(id, '_').to_string(),
                            &WordCleaner::new(),
                            &index(),
                            &options())
    }

    #[test]
    fn keeps_only_selected_documents() {
        let frame = build().unwrap();

        assert_eq!(frame.len(), 6);
        assert!(frame.documents().iter().all(|doc| doc.label != "autos"));
    }

    #[test]
    fn encoding_covers_full_label_vocabulary() {
        let frame = build().unwrap();

        assert_eq!(frame.encoder().classes(), &["autos", "space", "sport"]);
        assert!(frame.documents().iter().all(|doc| {
            frame.encoder().inverse_transform(doc.class) == Some(doc.label.as_str())
        }));
    }

    #[test]
    fn texts_are_cleaned() {
        let frame = build().unwrap();

        let doc = frame.documents().iter().find(|doc| doc.identifier == "space_1").unwrap();

        assert_eq!(doc.text, "orbit moon");
    }

    #[test]
    fn build_is_deterministic() {
        let first = build().unwrap();
        let second = build().unwrap();

        assert_eq!(first.documents(), second.documents());
        assert_eq!(first.split(), second.split());
        assert_eq!(first.split().test.len(), 2);
        assert_eq!(first.split().train.len(), 4);
    }

    #[test]
    fn empty_selection_fails() {
        let result = DatasetFrame::build(&raw(),
                                         |id: &str| id.to_string(),
                                         &WordCleaner::new(),
                                         &CommunityIndex::default(),
                                         &options());

        assert!(matches!(result, Err(Error::EmptyCorpus)));
    }

    proptest! {
        #[test]
        fn label_encoding_is_bijective(labels in prop::collection::vec("[a-z]{1,6}", 1..30)) {
            let encoder = LabelEncoder::fit(labels.iter().cloned());

            for label in &labels {
                let class = encoder.transform(label).unwrap();
                prop_assert_eq!(encoder.inverse_transform(class), Some(label.as_str()));
            }

            for class in 0..encoder.classes().len() {
                let label = encoder.inverse_transform(class).unwrap();
                prop_assert_eq!(encoder.transform(label), Some(class));
            }
        }
    }
}
