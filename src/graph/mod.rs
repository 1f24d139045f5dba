//! Access to the graph database holding document communities.
//!
//! The harness only needs two queries: the community membership of every
//! document, and the most significant terms of a community. `GraphStore`
//! captures that pair plus an explicit `close`. A store is opened by the
//! caller and handed to whatever needs it; `with_store` runs a closure
//! against a store and always closes it afterwards, whether or not the
//! closure failed.
//!
//! Two stores are provided: `JsonGraphStore` reads a JSON export of the
//! graph, and `MemoryGraphStore` is built in code.

mod json;
mod memory;

pub use self::json::JsonGraphStore;
pub use self::memory::MemoryGraphStore;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::community::CommunityId;
use crate::error::Result;


/// One community as reported by the database.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
pub struct CommunityRecord {
    pub id: CommunityId,
    pub members: Vec<String>,
    pub size: usize,
}


impl CommunityRecord {
    /// A record whose size is the number of members.
    pub fn new<I, S>(id: I, members: Vec<S>) -> CommunityRecord
    where
        I: Into<CommunityId>,
        S: Into<String>,
    {
        let members = members.into_iter().map(Into::into).collect::<Vec<String>>();

        CommunityRecord {
            id: id.into(),
            size: members.len(),
            members,
        }
    }
}


/// The database collaborator.
pub trait GraphStore {
    /// Every community with its member documents and member count.
    fn document_communities(&self) -> Result<Vec<CommunityRecord>>;

    /// Up to `top_terms` terms of a community, most significant first.
    ///
    /// A community with fewer terms returns all of them; an id the store
    /// does not hold is `Error::UnknownCommunity`.
    fn community_tags(&self, community: &CommunityId, top_terms: usize) -> Result<Vec<String>>;

    /// Release the connection.
    fn close(&mut self) -> Result<()>;
}


/// Run `f` against `store`, then close the store.
///
/// The store is closed even when `f` fails; the error of `f` takes
/// precedence over an error raised while closing.
pub fn with_store<S, T, F>(mut store: S, f: F) -> Result<T>
where
    S: GraphStore,
    F: FnOnce(&S) -> Result<T>,
{
    let outcome = f(&store);
    let closed = store.close();

    match (outcome, closed) {
        (Ok(value), Ok(())) => {
            info!("graph store closed");
            Ok(value)
        }
        (Ok(_), Err(error)) => Err(error),
        (Err(error), closed) => {
            if let Err(close_error) = closed {
                warn!(%close_error, "failed to close graph store after an error");
            }
            Err(error)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use std::rc::Rc;

    use crate::error::Error;

    struct CountingStore {
        inner: MemoryGraphStore,
        closes: Rc<Cell<usize>>,
    }

    impl GraphStore for CountingStore {
        fn document_communities(&self) -> Result<Vec<CommunityRecord>> {
            self.inner.document_communities()
        }

        fn community_tags(&self, community: &CommunityId, top_terms: usize) -> Result<Vec<String>> {
            self.inner.community_tags(community, top_terms)
        }

        fn close(&mut self) -> Result<()> {
            self.closes.set(self.closes.get() + 1);
            self.inner.close()
        }
    }

    fn store() -> (CountingStore, Rc<Cell<usize>>) {
        let closes = Rc::new(Cell::new(0));
        let mut inner = MemoryGraphStore::new();
        inner.add_community(CommunityRecord::new(1, vec!["a_1", "a_2"]), vec!["alpha", "beta"]);

        (CountingStore { inner, closes: closes.clone() }, closes)
    }

    #[test]
    fn closes_after_success() {
        let (store, closes) = store();

        let records = with_store(store, |s| s.document_communities()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn closes_after_failure() {
        let (store, closes) = store();

        let result: Result<()> = with_store(store, |_| Err(Error::EmptyCorpus));

        assert!(matches!(result, Err(Error::EmptyCorpus)));
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn record_size_follows_members() {
        let record = CommunityRecord::new(4, vec!["x_1", "x_2", "x_3"]);

        assert_eq!(record.size, 3);
        assert_eq!(record.id, CommunityId::from(4));
    }
}
