//! The Community-Majority Classifier.
//!
//! A test document is assigned the most common label among the *other*
//! members of its community; no features and no training are involved.
//! Equally common labels are resolved in favour of the one met first when
//! walking the community's members in stored order.
//!
//! The classifier moves from built to evaluated: `calculate_accuracy`
//! consumes it and returns a `MajorityReport`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::community::CommunityIndex;
use crate::error::{Error, Result};


/// What to do with a test document whose community has no other members.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsufficientEvidencePolicy {
    /// Fail with `Error::InsufficientEvidence`.
    Abort,
    /// Leave the document out of the denominator and list it in the report.
    Exclude,
}


#[derive(Clone, Debug, PartialEq)]
pub struct MajorityReport {
    pub accuracy: f32,
    pub correct: usize,
    pub evaluated: usize,
    pub excluded: Vec<String>,
}


/// Most frequent value, ties going to the value seen first.
pub fn majority<I, T>(values: I) -> Option<T>
where
    I: IntoIterator<Item = T>,
    T: PartialEq,
{
    let mut counts: Vec<(T, usize)> = Vec::new();

    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some(entry) => entry.1 += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;

    for (value, count) in counts {
        if best.as_ref().map_or(true, |&(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value)
}


pub struct CommunityMajorityClassifier<'a, L> {
    index: &'a CommunityIndex,
    label_extractor: L,
}


impl<'a, L> CommunityMajorityClassifier<'a, L>
where
    L: Fn(&str) -> String,
{
    pub fn new(index: &'a CommunityIndex, label_extractor: L) -> CommunityMajorityClassifier<'a, L> {
        CommunityMajorityClassifier { index, label_extractor }
    }

    /// Label voted for `document` by the rest of its community.
    pub fn predict(&self, document: &str) -> Result<String> {

        let community = self.index
            .community_of(document)
            .ok_or_else(|| Error::UnknownDocument(document.to_string()))?;

        let members = self.index.members(community).unwrap_or(&[]);

        let votes = members
            .iter()
            .filter(|member| member.as_str() != document)
            .map(|member| (self.label_extractor)(member.as_str()));

        majority(votes).ok_or_else(|| Error::InsufficientEvidence {
            document: document.to_string(),
            community: community.clone(),
        })
    }

    pub fn calculate_accuracy<S: AsRef<str>>(self,
                                             test_documents: &[S],
                                             policy: InsufficientEvidencePolicy)
                                             -> Result<MajorityReport> {

        let mut correct = 0;
        let mut evaluated = 0;
        let mut excluded = Vec::new();

        for document in test_documents {
            let document = document.as_ref();

            let predicted = match self.predict(document) {
                Ok(label) => label,
                Err(Error::InsufficientEvidence { document, community })
                    if policy == InsufficientEvidencePolicy::Exclude => {
                    warn!(%document, %community, "no community evidence; excluding document");
                    excluded.push(document);
                    continue;
                }
                Err(error) => return Err(error),
            };

            evaluated += 1;
            if predicted == (self.label_extractor)(document) {
                correct += 1;
            }
        }

        let accuracy = if evaluated == 0 {
            0.0
        } else {
            correct as f32 / evaluated as f32
        };

        debug!(correct, evaluated, excluded = excluded.len(), "community majority evaluated");

        Ok(MajorityReport { accuracy, correct, evaluated, excluded })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::datasets::label_from_identifier;
    use crate::graph::CommunityRecord;

    fn labels(id: &str) -> String {
        label_from_identifier(id, '_').to_string()
    }

    #[test]
    fn vote_excludes_the_test_document() {
        let index = CommunityIndex::build(&[CommunityRecord::new(1, vec!["a_1", "a_2", "b_1"])]).unwrap();

        let classifier = CommunityMajorityClassifier::new(&index, labels);

        // Neighbours of a_1 are [a, b]; the tie goes to the first met.
        assert_eq!(classifier.predict("a_1").unwrap(), "a");

        let report = classifier.calculate_accuracy(&["a_1"], InsufficientEvidencePolicy::Abort).unwrap();
        assert!(report.accuracy == 1.0);
    }

    #[test]
    fn ties_go_to_first_encountered() {
        assert_eq!(majority(vec!["b", "a", "a", "b"]), Some("b"));
        assert_eq!(majority(vec!["c", "a", "a"]), Some("a"));
        assert_eq!(majority(Vec::<&str>::new()), None);
    }

    #[test]
    fn lone_member_is_insufficient_evidence() {
        let index = CommunityIndex::build(&[CommunityRecord::new(1, vec!["a_1", "a_2"]),
                                            CommunityRecord::new(2, vec!["b_1"])])
            .unwrap();

        let abort = CommunityMajorityClassifier::new(&index, labels)
            .calculate_accuracy(&["a_1", "b_1"], InsufficientEvidencePolicy::Abort);

        assert!(matches!(abort, Err(Error::InsufficientEvidence { .. })));

        let report = CommunityMajorityClassifier::new(&index, labels)
            .calculate_accuracy(&["a_1", "b_1"], InsufficientEvidencePolicy::Exclude)
            .unwrap();

        assert_eq!(report.evaluated, 1);
        assert_eq!(report.excluded, vec!["b_1".to_string()]);
        assert!(report.accuracy == 1.0);
    }

    #[test]
    fn unknown_document_fails() {
        let index = CommunityIndex::build(&[CommunityRecord::new(1, vec!["a_1", "a_2"])]).unwrap();

        let result = CommunityMajorityClassifier::new(&index, labels)
            .calculate_accuracy(&["z_9"], InsufficientEvidencePolicy::Exclude);

        assert!(matches!(result, Err(Error::UnknownDocument(_))));
    }
}
