//! Experiment configuration.
//!
//! Settings come from an optional file (any format the `config` crate
//! understands, picked by extension) overlaid by environment variables
//! prefixed with `GRAPHOFDOCS_`, nested keys separated by `__`: for example
//! `GRAPHOFDOCS_SEED=7` or `GRAPHOFDOCS_OUTPUT__PREFIX=sweep`. Anything left
//! unset keeps its default.

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::evaluation::{
    ClassifierSpec, CommunityParams, Evaluator, InsufficientEvidencePolicy, KBestParams, MetaModelParams,
    NgramParams, VarianceParams,
};
use crate::output::SortColumn;
use crate::text::CleaningFlags;


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// JSON export of the graph database.
    pub export: PathBuf,
}


impl Default for DatabaseConfig {
    fn default() -> DatabaseConfig {
        DatabaseConfig { export: PathBuf::from("graph.json") }
    }
}


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    /// A directory with one file per document, or an `identifier,text` CSV file.
    pub path: PathBuf,
    pub label_delimiter: char,
}


impl Default for DatasetConfig {
    fn default() -> DatasetConfig {
        DatasetConfig {
            path: PathBuf::from("data"),
            label_delimiter: '_',
        }
    }
}


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MajorityConfig {
    pub enabled: bool,
    pub policy: InsufficientEvidencePolicy,
}


impl Default for MajorityConfig {
    fn default() -> MajorityConfig {
        MajorityConfig {
            enabled: true,
            policy: InsufficientEvidencePolicy::Exclude,
        }
    }
}


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub prefix: String,
    pub sort_by: SortColumn,
    pub descending: bool,
}


impl Default for OutputConfig {
    fn default() -> OutputConfig {
        OutputConfig {
            directory: PathBuf::from("."),
            prefix: "results".to_string(),
            sort_by: SortColumn::Accuracy,
            descending: true,
        }
    }
}


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ExperimentConfig {
    pub database: DatabaseConfig,
    pub dataset: DatasetConfig,
    pub cleaning: CleaningFlags,
    /// Communities with fewer documents are dropped.
    pub min_community_size: usize,
    pub seed: u64,
    /// Fraction of documents held out for testing.
    pub test_size: f32,
    pub classifiers: Vec<ClassifierSpec>,
    pub evaluators: Vec<Evaluator>,
    pub majority: MajorityConfig,
    pub output: OutputConfig,
}


fn default_evaluators() -> Vec<Evaluator> {
    vec![Evaluator::BagOfWords,
         Evaluator::MetaModel(MetaModelParams::default()),
         Evaluator::VarianceThreshold(VarianceParams { threshold: 0.001 }),
         Evaluator::KBest(KBestParams { k: 20000 }),
         Evaluator::Bigrams(NgramParams { min_n: 2, max_n: 2 }),
         Evaluator::CommunityVocabulary(CommunityParams { top_terms: 250 }),
         Evaluator::CommunityTags(CommunityParams { top_terms: 250 })]
}


impl Default for ExperimentConfig {
    fn default() -> ExperimentConfig {
        ExperimentConfig {
            database: DatabaseConfig::default(),
            dataset: DatasetConfig::default(),
            cleaning: CleaningFlags::default(),
            min_community_size: 2,
            seed: 42,
            test_size: 0.33,
            classifiers: ClassifierSpec::default_roster(),
            evaluators: default_evaluators(),
            majority: MajorityConfig::default(),
            output: OutputConfig::default(),
        }
    }
}


impl ExperimentConfig {
    /// Load the configuration from an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<ExperimentConfig> {

        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix("GRAPHOFDOCS")
                .prefix_separator("_")
                .separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use crate::array::dense::close;
    use crate::neighbors::Weights;

    #[test]
    fn defaults_follow_reference_experiment() {
        let config = ExperimentConfig::default();

        assert_eq!(config.seed, 42);
        assert!(close(config.test_size, 0.33));
        assert_eq!(config.min_community_size, 2);
        assert_eq!(config.classifiers.len(), 6);
        assert_eq!(config.evaluators.len(), 7);
        assert_eq!(config.dataset.label_delimiter, '_');
        assert!(config.cleaning.extend_window && !config.cleaning.stem);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "seed = 7").unwrap();
        writeln!(file, "test_size = 0.5").unwrap();
        writeln!(file, "[output]").unwrap();
        writeln!(file, "prefix = \"sweep\"").unwrap();
        writeln!(file, "sort_by = \"classifier\"").unwrap();
        writeln!(file, "[[classifiers]]").unwrap();
        writeln!(file, "type = \"k_nearest\"").unwrap();
        writeln!(file, "k = 3").unwrap();
        writeln!(file, "weights = \"uniform\"").unwrap();
        writeln!(file, "[[evaluators]]").unwrap();
        writeln!(file, "strategy = \"variance_threshold\"").unwrap();
        writeln!(file, "threshold = 0.01").unwrap();
        file.flush().unwrap();

        let config = ExperimentConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.seed, 7);
        assert!(close(config.test_size, 0.5));
        assert_eq!(config.output.prefix, "sweep");
        assert_eq!(config.output.sort_by, SortColumn::Classifier);
        assert!(config.output.descending);
        assert_eq!(config.classifiers, vec![ClassifierSpec::KNearest { k: 3, weights: Weights::Uniform }]);
        assert_eq!(config.evaluators, vec![Evaluator::VarianceThreshold(VarianceParams { threshold: 0.01 })]);
        assert_eq!(config.majority, MajorityConfig::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(ExperimentConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
