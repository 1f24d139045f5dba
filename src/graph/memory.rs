use std::collections::HashMap;

use crate::community::CommunityId;
use crate::error::{Error, Result};
use crate::graph::{CommunityRecord, GraphStore};


/// A graph store built in code.
#[derive(Clone, Debug, Default)]
pub struct MemoryGraphStore {
    communities: Vec<CommunityRecord>,
    tags: HashMap<CommunityId, Vec<String>>,
    open: bool,
}


impl MemoryGraphStore {
    pub fn new() -> MemoryGraphStore {
        MemoryGraphStore {
            open: true,
            ..MemoryGraphStore::default()
        }
    }

    /// Add a community and its ranked terms.
    pub fn add_community<S: Into<String>>(&mut self, record: CommunityRecord, tags: Vec<S>) -> &mut MemoryGraphStore {
        self.tags.insert(record.id.clone(), tags.into_iter().map(Into::into).collect());
        self.communities.push(record);
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}


impl GraphStore for MemoryGraphStore {
    fn document_communities(&self) -> Result<Vec<CommunityRecord>> {
        Ok(self.communities.clone())
    }

    fn community_tags(&self, community: &CommunityId, top_terms: usize) -> Result<Vec<String>> {
        let tags = self.tags
            .get(community)
            .ok_or_else(|| Error::UnknownCommunity(community.clone()))?;

        Ok(tags.iter().take(top_terms).cloned().collect())
    }

    fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_truncated_not_padded() {
        let mut store = MemoryGraphStore::new();
        store.add_community(CommunityRecord::new(1, vec!["a_1"]), vec!["x", "y", "z"]);

        let id = CommunityId::from(1);

        assert_eq!(store.community_tags(&id, 2).unwrap(), vec!["x", "y"]);
        assert_eq!(store.community_tags(&id, 10).unwrap().len(), 3);
        assert!(matches!(store.community_tags(&CommunityId::from(9), 10),
                         Err(Error::UnknownCommunity(CommunityId::Number(9)))));
    }

    #[test]
    fn close_marks_store_closed() {
        let mut store = MemoryGraphStore::new();

        assert!(store.is_open());
        store.close().unwrap();
        assert!(!store.is_open());
    }
}
