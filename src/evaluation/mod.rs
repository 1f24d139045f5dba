//! The evaluation harness.
//!
//! An experiment runs every configured `Evaluator` against one shared
//! `EvaluationContext` (the Dataset Frame, the Community Index, the graph
//! store and the classifier roster), optionally adds the community-majority
//! baseline, and collects everything in a `ResultAggregator`.
//!
//! # Examples
//!
//! ```
//! use graphofdocs::community::CommunityIndex;
//! use graphofdocs::datasets::{label_from_identifier, RawDocument};
//! use graphofdocs::evaluation::{run_experiment, ClassifierSpec, EvaluationContext, Evaluator, Family};
//! use graphofdocs::evaluation::majority::InsufficientEvidencePolicy;
//! use graphofdocs::frame::{DatasetFrame, FrameOptions};
//! use graphofdocs::graph::{CommunityRecord, MemoryGraphStore};
//! use graphofdocs::text::{CleaningFlags, WordCleaner};
//!
//! let labels = |id: &str| label_from_identifier(id, '_').to_string();
//!
//! let records = vec![CommunityRecord::new(1, vec!["space_1", "space_2", "space_3"]),
//!                    CommunityRecord::new(2, vec!["sport_1", "sport_2", "sport_3"])];
//! let raw = vec![RawDocument::new("space_1", "rocket orbit"),
//!                RawDocument::new("space_2", "orbit moon"),
//!                RawDocument::new("space_3", "rocket moon"),
//!                RawDocument::new("sport_1", "goal match"),
//!                RawDocument::new("sport_2", "match referee"),
//!                RawDocument::new("sport_3", "goal referee")];
//!
//! let index = CommunityIndex::build(&records).unwrap();
//! let options = FrameOptions { flags: CleaningFlags::default(), seed: 42, test_size: 0.33 };
//! let frame = DatasetFrame::build(&raw, labels, &WordCleaner::new(), &index, &options).unwrap();
//! let store = MemoryGraphStore::new();
//! let classifiers = vec![ClassifierSpec::naive_bayes()];
//!
//! let ctx = EvaluationContext {
//!     frame: &frame,
//!     index: &index,
//!     store: &store,
//!     classifiers: &classifiers,
//!     label_extractor: &labels,
//! };
//!
//! let results = run_experiment(&ctx,
//!                              &[Evaluator::BagOfWords],
//!                              Some(InsufficientEvidencePolicy::Exclude))
//!     .unwrap();
//!
//! assert_eq!(results.table(Family::Overall).len(), 2);
//! ```

pub mod benchmark;
pub mod classifiers;
pub mod evaluators;
pub mod majority;
pub mod results;

pub use self::classifiers::{Classifier, ClassifierSpec};
pub use self::evaluators::{CommunityParams, Evaluator, FitScope, KBestParams, MetaModelParams, NgramParams,
                           VarianceParams};
pub use self::majority::{CommunityMajorityClassifier, InsufficientEvidencePolicy, MajorityReport};
pub use self::results::{Details, Family, ResultAggregator, ResultCondition, ResultRecord, ResultTable};

use tracing::info;

use crate::community::CommunityIndex;
use crate::error::Result;
use crate::frame::DatasetFrame;
use crate::graph::GraphStore;


/// Read-only state shared by every evaluator of a run.
pub struct EvaluationContext<'a> {
    pub frame: &'a DatasetFrame,
    pub index: &'a CommunityIndex,
    pub store: &'a dyn GraphStore,
    pub classifiers: &'a [ClassifierSpec],
    pub label_extractor: &'a dyn Fn(&str) -> String,
}


/// Score the community-majority baseline on the frame's test documents.
pub fn evaluate_majority(ctx: &EvaluationContext, policy: InsufficientEvidencePolicy) -> Result<ResultRecord> {

    let test_ids = ctx.frame
        .test_documents()
        .map(|doc| doc.identifier.as_str())
        .collect::<Vec<_>>();

    let report = CommunityMajorityClassifier::new(ctx.index, ctx.label_extractor)
        .calculate_accuracy(&test_ids, policy)?;

    info!(accuracy = report.accuracy,
          evaluated = report.evaluated,
          excluded = report.excluded.len(),
          "community majority");

    let condition = if report.excluded.is_empty() {
        ResultCondition::Complete
    } else {
        ResultCondition::ExcludedDocuments(report.excluded.len())
    };

    Ok(ResultRecord {
        method: "community_majority".to_string(),
        classifier: "majority vote".to_string(),
        accuracy: report.accuracy,
        features: 0,
        train_size: ctx.frame.split().train.len(),
        test_size: ctx.frame.split().test.len(),
        details: Details::new(),
        condition,
    })
}


/// Run every evaluator in order, then the majority baseline when a policy is given.
///
/// The first failing evaluator aborts the run.
pub fn run_experiment(ctx: &EvaluationContext,
                      evaluators: &[Evaluator],
                      majority: Option<InsufficientEvidencePolicy>)
                      -> Result<ResultAggregator> {

    let mut aggregator = ResultAggregator::new();

    for evaluator in evaluators {
        info!(method = evaluator.method(), details = ?evaluator.details(), "running evaluator");
        aggregator.extend(evaluator.family(), evaluator.evaluate(ctx)?);
    }

    if let Some(policy) = majority {
        aggregator.extend(None, Some(evaluate_majority(ctx, policy)?));
    }

    info!(records = aggregator.len(), "experiment finished");

    Ok(aggregator)
}
