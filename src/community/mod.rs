//! Community Index: the mapping between documents and the communities
//! they belong to.
//!
//! The index is built once from the community records that passed the
//! size filter and is read-only afterwards. Both directions are exact
//! inverses of each other: every member of a community maps back to that
//! community. Communities are assumed to be disjoint, and building fails
//! with `Error::OverlappingCommunities` when they are not.
//!
//! # Examples
//!
//! ```
//! use graphofdocs::community::{CommunityId, CommunityIndex};
//! use graphofdocs::graph::CommunityRecord;
//!
//! let records = vec![CommunityRecord::new(1, vec!["sport_1", "sport_2"]),
//!                    CommunityRecord::new(2, vec!["space_1"])];
//!
//! let index = CommunityIndex::build(&records).unwrap();
//!
//! assert_eq!(index.community_of("sport_2"), Some(&CommunityId::from(1)));
//! assert_eq!(index.members(&CommunityId::from(2)).unwrap(), &["space_1".to_string()]);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::CommunityRecord;


/// Identifier of a community: a number or a name.
///
/// Numbers order before names; each kind orders naturally.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(untagged)]
pub enum CommunityId {
    Number(i64),
    Name(String),
}


impl From<i64> for CommunityId {
    fn from(id: i64) -> CommunityId {
        CommunityId::Number(id)
    }
}


impl fmt::Display for CommunityId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CommunityId::Number(id) => write!(f, "{}", id),
            CommunityId::Name(id) => write!(f, "{}", id),
        }
    }
}


/// Keep only communities with at least `min_size` documents.
///
/// The size reported by the database decides, not the length of the
/// member list.
pub fn filter_by_size(records: Vec<CommunityRecord>, min_size: usize) -> Vec<CommunityRecord> {
    let before = records.len();

    let kept = records
        .into_iter()
        .filter(|record| record.size >= min_size)
        .collect::<Vec<_>>();

    debug!(kept = kept.len(), dropped = before - kept.len(), min_size, "filtered communities");

    kept
}


#[derive(Clone, Debug, Default)]
pub struct CommunityIndex {
    doc_to_community: HashMap<String, CommunityId>,
    community_to_docs: BTreeMap<CommunityId, Vec<String>>,
}


impl CommunityIndex {
    /// Build both directions of the index.
    ///
    /// A document listed twice in the same community is kept once.
    pub fn build(records: &[CommunityRecord]) -> Result<CommunityIndex> {

        let mut index = CommunityIndex::default();

        for record in records {
            let mut members = Vec::with_capacity(record.members.len());

            for document in &record.members {
                match index.doc_to_community.get(document) {
                    Some(existing) if *existing == record.id => continue,
                    Some(existing) => {
                        return Err(Error::OverlappingCommunities {
                            document: document.clone(),
                            first: existing.clone(),
                            second: record.id.clone(),
                        });
                    }
                    None => {
                        index.doc_to_community.insert(document.clone(), record.id.clone());
                        members.push(document.clone());
                    }
                }
            }

            index.community_to_docs
                .entry(record.id.clone())
                .or_insert_with(Vec::new)
                .extend(members);
        }

        Ok(index)
    }

    pub fn community_of(&self, document: &str) -> Option<&CommunityId> {
        self.doc_to_community.get(document)
    }

    /// Members of a community in the order the database listed them.
    pub fn members(&self, community: &CommunityId) -> Option<&[String]> {
        self.community_to_docs.get(community).map(|docs| docs.as_slice())
    }

    pub fn contains(&self, document: &str) -> bool {
        self.doc_to_community.contains_key(document)
    }

    /// Communities in ascending id order with their members.
    pub fn communities(&self) -> impl Iterator<Item = (&CommunityId, &[String])> {
        self.community_to_docs.iter().map(|(id, docs)| (id, docs.as_slice()))
    }

    /// Every indexed document, grouped by community in ascending id order.
    pub fn documents(&self) -> impl Iterator<Item = &str> {
        self.community_to_docs.values().flat_map(|docs| docs.iter().map(|doc| doc.as_str()))
    }

    pub fn num_communities(&self) -> usize {
        self.community_to_docs.len()
    }

    pub fn num_documents(&self) -> usize {
        self.doc_to_community.len()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn overlapping_communities_fail() {
        let records = vec![CommunityRecord::new(1, vec!["a_1", "a_2"]),
                           CommunityRecord::new(2, vec!["b_1", "a_2"])];

        match CommunityIndex::build(&records) {
            Err(Error::OverlappingCommunities { document, first, second }) => {
                assert_eq!(document, "a_2");
                assert_eq!(first, CommunityId::from(1));
                assert_eq!(second, CommunityId::from(2));
            }
            other => panic!("expected overlap error, got {:?}", other),
        }
    }

    #[test]
    fn repeated_member_kept_once() {
        let records = vec![CommunityRecord::new(7, vec!["a_1", "a_1", "a_2"])];

        let index = CommunityIndex::build(&records).unwrap();

        assert_eq!(index.members(&CommunityId::from(7)).unwrap().len(), 2);
    }

    #[test]
    fn size_filter_uses_reported_size() {
        let records = vec![CommunityRecord::new(1, vec!["a_1"]),
                           CommunityRecord::new(2, vec!["b_1", "b_2"]),
                           CommunityRecord::new(3, vec!["c_1", "c_2", "c_3"])];

        let kept = filter_by_size(records, 2);

        assert_eq!(kept.iter().map(|r| r.id.clone()).collect::<Vec<_>>(),
                   vec![CommunityId::from(2), CommunityId::from(3)]);
    }

    #[test]
    fn numbers_order_before_names() {
        let name = CommunityId::Name("x".to_string());
        let mut ids = vec![name.clone(), CommunityId::from(10), CommunityId::from(2)];
        ids.sort();

        assert_eq!(ids, vec![CommunityId::from(2), CommunityId::from(10), name]);
    }

    #[test]
    fn ids_deserialize_from_numbers_and_strings() {
        let ids: Vec<CommunityId> = serde_json::from_str(r#"[3, "north"]"#).unwrap();

        assert_eq!(ids, vec![CommunityId::from(3), CommunityId::Name("north".to_string())]);
    }

    proptest! {
        #[test]
        fn members_map_back_to_their_community(sizes in prop::collection::vec(1usize..6, 1..10)) {
            let records = sizes
                .iter()
                .enumerate()
                .map(|(community, &size)| {
                    let members = (0..size)
                        .map(|doc| format!("c{}_{}", community, doc))
                        .collect::<Vec<_>>();
                    CommunityRecord::new(community as i64, members)
                })
                .collect::<Vec<_>>();

            let index = CommunityIndex::build(&records).unwrap();

            for (community, members) in index.communities() {
                for member in members {
                    prop_assert_eq!(index.community_of(member), Some(community));
                }
            }

            prop_assert_eq!(index.num_documents(), sizes.iter().sum::<usize>());
            prop_assert_eq!(index.documents().count(), index.num_documents());
        }
    }
}
