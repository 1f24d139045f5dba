//! Result records and their aggregation into per-family tables.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};


/// Strategy hyperparameters attached to a record, keyed by name.
pub type Details = BTreeMap<String, String>;


/// A condition reported alongside a record instead of stopping the run.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultCondition {
    Complete,
    /// Feature selection kept no columns; accuracy is reported as zero.
    NoFeatures,
    /// Documents left out of the accuracy denominator for lack of evidence.
    ExcludedDocuments(usize),
}


impl fmt::Display for ResultCondition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResultCondition::Complete => write!(f, "complete"),
            ResultCondition::NoFeatures => write!(f, "no features"),
            ResultCondition::ExcludedDocuments(count) => write!(f, "excluded {} documents", count),
        }
    }
}


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRecord {
    pub method: String,
    pub classifier: String,
    pub accuracy: f32,
    pub features: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub details: Details,
    pub condition: ResultCondition,
}


impl ResultRecord {
    /// Hyperparameters rendered as `key=value` pairs in key order.
    pub fn details_string(&self) -> String {
        self.details
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}


/// Experiment family a table collects.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Overall,
    FeatureSelection,
    BigramExtraction,
}


impl Family {
    pub fn all() -> [Family; 3] {
        [Family::Overall, Family::FeatureSelection, Family::BigramExtraction]
    }

    /// Suffix appended to the output prefix for this family's files.
    pub fn suffix(&self) -> &'static str {
        match self {
            Family::Overall => "",
            Family::FeatureSelection => "_feature_selection",
            Family::BigramExtraction => "_bigram_extraction",
        }
    }
}


/// A normalized table of records belonging to one family.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultTable {
    pub family: Family,
    pub records: Vec<ResultRecord>,
}


impl ResultTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}


/// Collects records from every evaluator, remembering each record's family.
#[derive(Clone, Debug, Default)]
pub struct ResultAggregator {
    records: Vec<(Option<Family>, ResultRecord)>,
}


impl ResultAggregator {
    pub fn new() -> ResultAggregator {
        ResultAggregator::default()
    }

    /// Add records belonging to `family`, or to the overall table only when `None`.
    pub fn extend<I>(&mut self, family: Option<Family>, records: I)
    where
        I: IntoIterator<Item = ResultRecord>,
    {
        self.records.extend(records.into_iter().map(|record| (family, record)));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one family in insertion order. The overall table holds every record.
    pub fn table(&self, family: Family) -> ResultTable {
        let records = self.records
            .iter()
            .filter(|(record_family, _)| family == Family::Overall || *record_family == Some(family))
            .map(|(_, record)| record.clone())
            .collect();

        ResultTable { family, records }
    }

    pub fn tables(&self) -> Vec<ResultTable> {
        Family::all().iter().map(|&family| self.table(family)).collect()
    }
}
