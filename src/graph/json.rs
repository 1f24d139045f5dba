//! A graph store backed by a JSON export of the database.
//!
//! The export lists each community with its members, optionally its
//! member count, and its terms ranked by significance:
//!
//! ```json
//! {
//!   "communities": [
//!     { "id": 4, "members": ["sport_1", "sport_7"], "tags": ["goal", "match"] },
//!     { "id": 9, "members": ["space_2"], "size": 1, "tags": ["orbit"] }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::community::CommunityId;
use crate::error::{Error, Result};
use crate::graph::{CommunityRecord, GraphStore};


#[derive(Deserialize)]
struct Export {
    communities: Vec<ExportedCommunity>,
}


#[derive(Deserialize)]
struct ExportedCommunity {
    id: CommunityId,
    members: Vec<String>,
    #[serde(default)]
    size: Option<usize>,
    #[serde(default)]
    tags: Vec<String>,
}


#[derive(Debug)]
pub struct JsonGraphStore {
    path: PathBuf,
    communities: Vec<CommunityRecord>,
    tags: HashMap<CommunityId, Vec<String>>,
}


impl JsonGraphStore {
    /// Open and parse an export file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<JsonGraphStore> {

        let path = path.as_ref().to_path_buf();
        let export: Export = serde_json::from_reader(BufReader::new(File::open(&path)?))?;

        let mut communities = Vec::with_capacity(export.communities.len());
        let mut tags = HashMap::with_capacity(export.communities.len());

        for community in export.communities {
            communities.push(CommunityRecord {
                id: community.id.clone(),
                size: community.size.unwrap_or(community.members.len()),
                members: community.members,
            });
            tags.insert(community.id, community.tags);
        }

        info!(path = %path.display(), communities = communities.len(), "opened graph export");

        Ok(JsonGraphStore { path, communities, tags })
    }
}


impl GraphStore for JsonGraphStore {
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
        self.communities.clear();
        self.tags.clear();
        info!(path = %self.path.display(), "closed graph export");
        Ok(())
    }
}
