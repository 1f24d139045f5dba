//! Errors raised by the evaluation harness.
//!
//! Models keep returning `&'static str` errors; the harness wraps them in
//! `Error::Model` when they surface through an evaluator.

use std::io;

use thiserror::Error;

use crate::community::CommunityId;


#[derive(Debug, Error)]
pub enum Error {
    #[error("document '{document}' belongs to both community {first} and community {second}")]
    OverlappingCommunities {
        document: String,
        first: CommunityId,
        second: CommunityId,
    },
    #[error("document '{0}' is not part of any selected community")]
    UnknownDocument(String),
    #[error("community {community} of test document '{document}' was never seen in training")]
    UnseenCommunity {
        document: String,
        community: CommunityId,
    },
    #[error("community {community} has no other members to vote on document '{document}'")]
    InsufficientEvidence {
        document: String,
        community: CommunityId,
    },
    #[error("the corpus is empty")]
    EmptyCorpus,
    #[error("community {0} is unknown to the graph store")]
    UnknownCommunity(CommunityId),
    #[error("invalid train/test split: {0}")]
    InvalidSplit(String),
    #[error("model error: {0}")]
    Model(&'static str),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Config(#[from] ::config::ConfigError),
}


pub type Result<T> = std::result::Result<T, Error>;
