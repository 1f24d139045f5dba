//! The Evaluator family.
//!
//! Each evaluator builds a feature matrix in its own way, runs the
//! Benchmark Loop over the shared train/test split and tags every record
//! with its method name and hyperparameters. Evaluators never mutate the
//! frame, the index or the store, and keep no state between calls.
//!
//! When a selection strategy keeps no columns the evaluator still emits
//! one record per classifier, with zero accuracy and
//! `ResultCondition::NoFeatures`, so that parameter sweeps carry on.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::evaluation::benchmark;
use crate::evaluation::majority::majority;
use crate::evaluation::results::{Details, Family, ResultCondition, ResultRecord};
use crate::evaluation::EvaluationContext;
use crate::feature_extraction::CountVectorizer;
use crate::feature_selection::{FeatureSelector, SelectFromModel, SelectKBest, Threshold, VarianceThreshold};
use crate::linear_models::sgdclassifier::{Hyperparameters, Loss};
use crate::prelude::*;


/// Rows the meta-model is fit on.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FitScope {
    TrainOnly,
    All,
}


/// Meta-model selection with a linear SVM as the auxiliary model.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MetaModelParams {
    pub fit_scope: FitScope,
    pub epochs: usize,
    pub learning_rate: f32,
    pub l2_penalty: f32,
}


impl Default for MetaModelParams {
    fn default() -> MetaModelParams {
        MetaModelParams {
            fit_scope: FitScope::TrainOnly,
            epochs: 10,
            learning_rate: 0.1,
            l2_penalty: 1.0e-4,
        }
    }
}


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
pub struct VarianceParams {
    pub threshold: f32,
}


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
pub struct KBestParams {
    pub k: usize,
}


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
pub struct NgramParams {
    pub min_n: usize,
    pub max_n: usize,
}


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
pub struct CommunityParams {
    pub top_terms: usize,
}


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Evaluator {
    /// Term counts over the vocabulary of the whole corpus.
    BagOfWords,
    /// Bag-of-words restricted to columns a linear SVM finds important.
    MetaModel(MetaModelParams),
    /// Bag-of-words without low-variance columns.
    VarianceThreshold(VarianceParams),
    /// Bag-of-words restricted to the `k` best chi-squared columns.
    KBest(KBestParams),
    /// Counts of contiguous token n-grams.
    Bigrams(NgramParams),
    /// Bag-of-words over the top terms of the training documents' communities.
    CommunityVocabulary(CommunityParams),
    /// One training row per community, built from its top terms.
    CommunityTags(CommunityParams),
}


struct Features {
    X_train: SparseRowArray,
    y_train: Array,
    X_test: SparseRowArray,
    y_test: Array,
}


enum Built {
    Matrix(Features),
    NoFeatures { train_size: usize, test_size: usize },
}


fn no_features(ctx: &EvaluationContext) -> Built {
    let split = ctx.frame.split();

    Built::NoFeatures {
        train_size: split.train.len(),
        test_size: split.test.len(),
    }
}


fn split_rows(X: SparseRowArray, ctx: &EvaluationContext) -> Built {
    let split = ctx.frame.split();
    let y = ctx.frame.targets();

    Built::Matrix(Features {
        X_train: X.get_rows(&split.train),
        y_train: y.get_rows(&split.train),
        X_test: X.get_rows(&split.test),
        y_test: y.get_rows(&split.test),
    })
}


/// Fit `vectorizer` on every document; `None` when no term is found.
fn vectorize(mut vectorizer: CountVectorizer, ctx: &EvaluationContext) -> Option<SparseRowArray> {
    match vectorizer.fit_transform(&ctx.frame.texts()) {
        Ok(X) => Some(X),
        Err(reason) => {
            warn!(reason, "nothing to vectorize");
            None
        }
    }
}


/// Fit `selector` on the chosen rows, keep its columns in every row, then split.
fn select<S: FeatureSelector>(mut selector: S,
                              X: SparseRowArray,
                              fit_scope: FitScope,
                              ctx: &EvaluationContext)
                              -> Result<Built> {

    let split = ctx.frame.split();
    let y = ctx.frame.targets();

    let fitted = match fit_scope {
        FitScope::TrainOnly => selector.fit(&X.get_rows(&split.train), &y.get_rows(&split.train)),
        FitScope::All => selector.fit(&X, &y),
    };
    fitted.map_err(Error::Model)?;

    if selector.get_support().is_empty() {
        return Ok(no_features(ctx));
    }

    Ok(split_rows(selector.transform(&X), ctx))
}


fn community_vocabulary(params: &CommunityParams, ctx: &EvaluationContext) -> Result<Built> {

    let mut seen = HashSet::new();
    let mut vocabulary = BTreeSet::new();

    for doc in ctx.frame.train_documents() {
        let community = ctx.index
            .community_of(&doc.identifier)
            .ok_or_else(|| Error::UnknownDocument(doc.identifier.clone()))?;

        if seen.insert(community) {
            vocabulary.extend(ctx.store.community_tags(community, params.top_terms)?);
        }
    }

    info!(communities = seen.len(), terms = vocabulary.len(), "built community vocabulary");

    if vocabulary.is_empty() {
        return Ok(no_features(ctx));
    }

    let vectorizer = CountVectorizer::with_vocabulary(vocabulary);

    Ok(split_rows(vectorizer.transform(&ctx.frame.texts()), ctx))
}


/// Distinct whitespace-separated tokens, in first-seen order.
fn distinct_tokens(text: &str) -> String {
    text.split_whitespace().unique().join(" ")
}


fn community_tags(params: &CommunityParams, ctx: &EvaluationContext) -> Result<Built> {

    let test_ids = ctx.frame
        .test_documents()
        .map(|doc| doc.identifier.as_str())
        .collect::<HashSet<_>>();

    // Each training community with the first training document seen in it.
    let mut communities = BTreeMap::new();

    for doc in ctx.frame.train_documents() {
        let community = ctx.index
            .community_of(&doc.identifier)
            .ok_or_else(|| Error::UnknownDocument(doc.identifier.clone()))?;
        communities.entry(community).or_insert(doc.identifier.as_str());
    }

    let mut community_texts = Vec::with_capacity(communities.len());
    let mut community_classes = Vec::with_capacity(communities.len());

    for (&community, &representative) in &communities {
        let members = ctx.index
            .members(community)
            .ok_or_else(|| Error::UnknownCommunity(community.clone()))?;

        let label = majority(members
                .iter()
                .filter(|member| !test_ids.contains(member.as_str()))
                .map(|member| (ctx.label_extractor)(member.as_str())))
            .ok_or_else(|| Error::InsufficientEvidence {
                document: representative.to_string(),
                community: community.clone(),
            })?;

        let class = ctx.frame
            .encoder()
            .transform(&label)
            .ok_or_else(|| Error::UnknownDocument(representative.to_string()))?;

        community_texts.push(ctx.store.community_tags(community, params.top_terms)?.join(" "));
        community_classes.push(class as f32);
    }

    let mut test_texts = Vec::new();
    let mut test_classes = Vec::new();

    for doc in ctx.frame.test_documents() {
        let community = ctx.index
            .community_of(&doc.identifier)
            .ok_or_else(|| Error::UnknownDocument(doc.identifier.clone()))?;

        if !communities.contains_key(community) {
            return Err(Error::UnseenCommunity {
                document: doc.identifier.clone(),
                community: community.clone(),
            });
        }

        test_texts.push(distinct_tokens(&doc.text));
        test_classes.push(doc.class as f32);
    }

    let mut vectorizer = CountVectorizer::new();

    let X_train = match vectorizer.fit_transform(&community_texts) {
        Ok(X) => X,
        Err(_) => {
            return Ok(Built::NoFeatures {
                train_size: community_texts.len(),
                test_size: test_texts.len(),
            })
        }
    };

    Ok(Built::Matrix(Features {
        X_train,
        y_train: Array::from(community_classes),
        X_test: vectorizer.transform(&test_texts),
        y_test: Array::from(test_classes),
    }))
}


impl Evaluator {
    pub fn method(&self) -> &'static str {
        match self {
            Evaluator::BagOfWords => "bag_of_words",
            Evaluator::MetaModel(_) => "meta_model",
            Evaluator::VarianceThreshold(_) => "variance_threshold",
            Evaluator::KBest(_) => "k_best",
            Evaluator::Bigrams(_) => "bigrams",
            Evaluator::CommunityVocabulary(_) => "community_vocabulary",
            Evaluator::CommunityTags(_) => "community_tags",
        }
    }

    /// Family table the records belong to besides the overall one.
    pub fn family(&self) -> Option<Family> {
        match self {
            Evaluator::BagOfWords => None,
            Evaluator::Bigrams(_) => Some(Family::BigramExtraction),
            _ => Some(Family::FeatureSelection),
        }
    }

    pub fn details(&self) -> Details {
        let mut details = Details::new();

        let mut put = |key: &str, value: String| {
            details.insert(key.to_string(), value);
        };

        match self {
            Evaluator::BagOfWords => {}
            Evaluator::MetaModel(params) => {
                put("estimator", "Linear SVM".to_string());
                put("threshold", "mean".to_string());
                put("fit_scope", match params.fit_scope {
                    FitScope::TrainOnly => "train_only".to_string(),
                    FitScope::All => "all".to_string(),
                });
            }
            Evaluator::VarianceThreshold(params) => put("threshold", params.threshold.to_string()),
            Evaluator::KBest(params) => {
                put("k", params.k.to_string());
                put("score", "chi2".to_string());
            }
            Evaluator::Bigrams(params) => {
                put("ngram_range", format!("{}-{}", params.min_n, params.max_n));
            }
            Evaluator::CommunityVocabulary(params) | Evaluator::CommunityTags(params) => {
                put("top_terms", params.top_terms.to_string());
            }
        }

        details
    }

    fn build(&self, ctx: &EvaluationContext) -> Result<Built> {

        let bag_of_words = || vectorize(CountVectorizer::new(), ctx);

        match self {
            Evaluator::BagOfWords => Ok(bag_of_words().map_or_else(|| no_features(ctx), |X| split_rows(X, ctx))),
            Evaluator::MetaModel(params) => {
                let X = match bag_of_words() {
                    Some(X) => X,
                    None => return Ok(no_features(ctx)),
                };
                let model = Hyperparameters::new(X.cols())
                    .loss(Loss::Hinge)
                    .epochs(params.epochs)
                    .learning_rate(params.learning_rate)
                    .l2_penalty(params.l2_penalty)
                    .one_vs_rest();

                select(SelectFromModel::new(model, Threshold::Mean), X, params.fit_scope, ctx)
            }
            Evaluator::VarianceThreshold(params) => match bag_of_words() {
                Some(X) => select(VarianceThreshold::new(params.threshold), X, FitScope::TrainOnly, ctx),
                None => Ok(no_features(ctx)),
            },
            Evaluator::KBest(params) => match bag_of_words() {
                Some(X) => select(SelectKBest::new(params.k), X, FitScope::TrainOnly, ctx),
                None => Ok(no_features(ctx)),
            },
            Evaluator::Bigrams(params) => {
                let mut vectorizer = CountVectorizer::new();
                vectorizer.ngram_range(params.min_n, params.max_n);

                Ok(vectorize(vectorizer, ctx).map_or_else(|| no_features(ctx), |X| split_rows(X, ctx)))
            }
            Evaluator::CommunityVocabulary(params) => community_vocabulary(params, ctx),
            Evaluator::CommunityTags(params) => community_tags(params, ctx),
        }
    }

    /// Build this evaluator's features and benchmark every classifier on them.
    pub fn evaluate(&self, ctx: &EvaluationContext) -> Result<Vec<ResultRecord>> {

        let method = self.method();
        let details = self.details();

        let record = |classifier: String, accuracy: f32, features: usize, train_size: usize, test_size: usize, condition: ResultCondition| {
            ResultRecord {
                method: method.to_string(),
                classifier,
                accuracy,
                features,
                train_size,
                test_size,
                details: details.clone(),
                condition,
            }
        };

        match self.build(ctx)? {
            Built::Matrix(features) => {
                let (train_size, test_size) = (features.X_train.rows(), features.X_test.rows());
                let width = features.X_train.cols();

                info!(method, features = width, train_size, test_size, "built feature matrix");

                let scores = benchmark::run(&features.X_train,
                                            &features.y_train,
                                            &features.X_test,
                                            &features.y_test,
                                            ctx.classifiers)?;

                Ok(scores
                    .into_iter()
                    .map(|score| {
                        info!(method, classifier = %score.classifier, accuracy = score.accuracy, "scored");
                        record(score.classifier, score.accuracy, width, train_size, test_size, ResultCondition::Complete)
                    })
                    .collect())
            }
            Built::NoFeatures { train_size, test_size } => {
                warn!(method, details = ?details, "no features survived selection; reporting zero accuracy");

                Ok(ctx.classifiers
                    .iter()
                    .map(|spec| record(spec.name(), 0.0, 0, train_size, test_size, ResultCondition::NoFeatures))
                    .collect())
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::community::CommunityIndex;
    use crate::datasets::{label_from_identifier, RawDocument};
    use crate::evaluation::classifiers::ClassifierSpec;
    use crate::frame::{DatasetFrame, FrameOptions};
    use crate::graph::{CommunityRecord, MemoryGraphStore};
    use crate::text::{CleaningFlags, WordCleaner};

    fn labels(id: &str) -> String {
        label_from_identifier(id, '_').to_string()
    }

    struct Fixture {
        frame: DatasetFrame,
        index: CommunityIndex,
        store: MemoryGraphStore,
        classifiers: Vec<ClassifierSpec>,
    }

    impl Fixture {
        fn new() -> Fixture {
            let raw = vec![RawDocument::new("space_1", "rocket orbit launch moon"),
                           RawDocument::new("space_2", "orbit satellite rocket"),
                           RawDocument::new("space_3", "moon landing orbit"),
                           RawDocument::new("space_4", "rocket engine launch"),
                           RawDocument::new("sport_1", "goal match referee"),
                           RawDocument::new("sport_2", "match penalty goal"),
                           RawDocument::new("sport_3", "referee whistle match"),
                           RawDocument::new("sport_4", "goal keeper save")];

            let communities = vec![
                (CommunityRecord::new(1, vec!["space_1", "space_2", "space_3", "space_4"]), vec!["orbit", "rocket", "moon"]),
                (CommunityRecord::new(2, vec!["sport_1", "sport_2", "sport_3", "sport_4"]), vec!["goal", "match", "referee"]),
            ];

            Fixture::build(&raw, communities, 42, 0.25)
        }

        fn build(raw: &[RawDocument], communities: Vec<(CommunityRecord, Vec<&str>)>, seed: u64, test_size: f32) -> Fixture {
            let mut store = MemoryGraphStore::new();
            let mut records = Vec::new();

            for (record, tags) in communities {
                store.add_community(record.clone(), tags);
                records.push(record);
            }

            let index = CommunityIndex::build(&records).unwrap();
            let frame = DatasetFrame::build(raw,
                                            labels,
                                            &WordCleaner::new(),
                                            &index,
                                            &FrameOptions { flags: CleaningFlags::default(), seed, test_size })
                .unwrap();

            Fixture {
                frame,
                index,
                store,
                classifiers: vec![ClassifierSpec::naive_bayes(), ClassifierSpec::k_nearest(1)],
            }
        }

        fn context(&self) -> EvaluationContext<'_> {
            EvaluationContext {
                frame: &self.frame,
                index: &self.index,
                store: &self.store,
                classifiers: &self.classifiers,
                label_extractor: &labels,
            }
        }
    }

    fn check(records: &[ResultRecord], method: &str) {
        assert_eq!(records.len(), 2);
        for record in records {
            assert_eq!(record.method, method);
            assert!(record.accuracy >= 0.0 && record.accuracy <= 1.0);
        }
    }

    #[test]
    fn bag_of_words_records() {
        let fixture = Fixture::new();

        let records = Evaluator::BagOfWords.evaluate(&fixture.context()).unwrap();

        check(&records, "bag_of_words");
        assert_eq!(records[0].classifier, "Naive Bayes");
        assert_eq!(records[0].train_size, 6);
        assert_eq!(records[0].test_size, 2);
        assert!(records[0].features > 0);
        assert_eq!(records[0].condition, ResultCondition::Complete);
    }

    #[test]
    fn selection_strategies_report_their_parameters() {
        let fixture = Fixture::new();
        let ctx = fixture.context();

        let kbest = Evaluator::KBest(KBestParams { k: 3 }).evaluate(&ctx).unwrap();
        check(&kbest, "k_best");
        assert_eq!(kbest[0].features, 3);
        assert_eq!(kbest[0].details.get("k").map(String::as_str), Some("3"));

        let variance = Evaluator::VarianceThreshold(VarianceParams { threshold: 0.0 }).evaluate(&ctx).unwrap();
        let bow = Evaluator::BagOfWords.evaluate(&ctx).unwrap();
        assert_eq!(variance[0].features, bow[0].features);

        for scope in &[FitScope::TrainOnly, FitScope::All] {
            let params = MetaModelParams { fit_scope: *scope, ..MetaModelParams::default() };
            let meta = Evaluator::MetaModel(params).evaluate(&ctx).unwrap();
            check(&meta, "meta_model");
            assert!(meta[0].features <= bow[0].features);
        }
    }

    #[test]
    fn degenerate_selection_is_reported() {
        let fixture = Fixture::new();

        let records = Evaluator::VarianceThreshold(VarianceParams { threshold: 1.0e6 })
            .evaluate(&fixture.context())
            .unwrap();

        check(&records, "variance_threshold");
        assert!(records.iter().all(|r| r.accuracy == 0.0 && r.features == 0));
        assert!(records.iter().all(|r| r.condition == ResultCondition::NoFeatures));
    }

    #[test]
    fn bigrams_use_token_pairs() {
        let fixture = Fixture::new();

        let records = Evaluator::Bigrams(NgramParams { min_n: 2, max_n: 2 })
            .evaluate(&fixture.context())
            .unwrap();

        check(&records, "bigrams");
        assert_eq!(Evaluator::Bigrams(NgramParams { min_n: 2, max_n: 2 }).family(),
                   Some(Family::BigramExtraction));
    }

    #[test]
    fn community_vocabulary_limits_columns() {
        let fixture = Fixture::new();

        let records = Evaluator::CommunityVocabulary(CommunityParams { top_terms: 2 })
            .evaluate(&fixture.context())
            .unwrap();

        check(&records, "community_vocabulary");
        // Top two terms of each community: orbit, rocket, goal, match.
        assert_eq!(records[0].features, 4);
    }

    #[test]
    fn community_tags_train_on_communities() {
        let fixture = Fixture::new();

        let records = Evaluator::CommunityTags(CommunityParams { top_terms: 3 })
            .evaluate(&fixture.context())
            .unwrap();

        check(&records, "community_tags");
        assert_eq!(records[0].train_size, 2);
        assert_eq!(records[0].test_size, 2);
        assert_eq!(records[0].features, 6);
    }

    #[test]
    fn distinct_tokens_keep_first_occurrence() {
        assert_eq!(distinct_tokens("b a b c a"), "b a c");
    }

    #[test]
    fn evaluators_deserialize_from_tagged_config() {
        let evaluators: Vec<Evaluator> = serde_json::from_str(r#"[
            {"strategy": "bag_of_words"},
            {"strategy": "meta_model", "fit_scope": "all"},
            {"strategy": "k_best", "k": 10}
        ]"#).unwrap();

        assert_eq!(evaluators[0], Evaluator::BagOfWords);
        assert_eq!(evaluators[1], Evaluator::MetaModel(MetaModelParams { fit_scope: FitScope::All, ..MetaModelParams::default() }));
        assert_eq!(evaluators[2], Evaluator::KBest(KBestParams { k: 10 }));
    }

    #[test]
    fn missing_ngrams_are_reported_not_fatal() {
        let raw = vec![RawDocument::new("space_1", "rocket"),
                       RawDocument::new("space_2", "orbit"),
                       RawDocument::new("space_3", "moon"),
                       RawDocument::new("sport_1", "goal"),
                       RawDocument::new("sport_2", "match"),
                       RawDocument::new("sport_3", "referee")];
        let communities = vec![
            (CommunityRecord::new(1, vec!["space_1", "space_2", "space_3"]), vec!["rocket", "orbit"]),
            (CommunityRecord::new(2, vec!["sport_1", "sport_2", "sport_3"]), vec!["goal", "match"]),
        ];
        let fixture = Fixture::build(&raw, communities, 42, 0.33);
        let split = fixture.frame.split();

        let bigrams = Evaluator::Bigrams(NgramParams { min_n: 2, max_n: 2 });
        let records = bigrams.evaluate(&fixture.context()).unwrap();

        check(&records, "bigrams");
        assert!(records.iter().all(|r| r.condition == ResultCondition::NoFeatures && r.features == 0));
        assert!(records.iter().all(|r| r.train_size == split.train.len() && r.test_size == split.test.len()));

        let results = crate::evaluation::run_experiment(&fixture.context(), &[Evaluator::BagOfWords, bigrams], None)
            .unwrap();
        let overall = results.table(Family::Overall).records;

        assert_eq!(overall.len(), 4);
        assert!(overall
            .iter()
            .filter(|r| r.method == "bag_of_words")
            .all(|r| r.condition == ResultCondition::Complete && r.features == 6));
    }

    #[test]
    fn empty_corpus_vocabulary_gives_no_features_for_selectors() {
        // Every word is a stopword or too short, so the cleaned texts are empty.
        let raw = vec![RawDocument::new("space_1", "the a"),
                       RawDocument::new("space_2", "of"),
                       RawDocument::new("sport_1", "and the"),
                       RawDocument::new("sport_2", "is")];
        let communities = vec![
            (CommunityRecord::new(1, vec!["space_1", "space_2"]), vec!["orbit"]),
            (CommunityRecord::new(2, vec!["sport_1", "sport_2"]), vec!["goal"]),
        ];
        let fixture = Fixture::build(&raw, communities, 42, 0.5);

        for evaluator in &[Evaluator::BagOfWords,
                           Evaluator::MetaModel(MetaModelParams::default()),
                           Evaluator::VarianceThreshold(VarianceParams { threshold: 0.0 }),
                           Evaluator::KBest(KBestParams { k: 3 })] {
            let records = evaluator.evaluate(&fixture.context()).unwrap();

            check(&records, evaluator.method());
            assert!(records.iter().all(|r| r.condition == ResultCondition::NoFeatures));
        }
    }

    #[test]
    fn test_community_absent_from_training_is_fatal() {
        let raw = vec![RawDocument::new("a_1", "rocket orbit"),
                       RawDocument::new("a_2", "orbit moon"),
                       RawDocument::new("b_1", "goal match"),
                       RawDocument::new("b_2", "match referee"),
                       RawDocument::new("c_1", "sauce garlic"),
                       RawDocument::new("c_2", "garlic basil")];
        let communities = || vec![
            (CommunityRecord::new(1, vec!["a_1", "a_2"]), vec!["rocket", "orbit", "moon"]),
            (CommunityRecord::new(2, vec!["b_1", "b_2"]), vec!["goal", "match", "referee"]),
            (CommunityRecord::new(3, vec!["c_1", "c_2"]), vec!["sauce", "garlic", "basil"]),
        ];

        let mut fatal_runs = 0;

        for seed in 0..20 {
            let fixture = Fixture::build(&raw, communities(), seed, 0.5);

            let trained = fixture.frame
                .train_documents()
                .filter_map(|doc| fixture.index.community_of(&doc.identifier))
                .collect::<HashSet<_>>();
            let unseen = fixture.frame
                .test_documents()
                .any(|doc| !trained.contains(fixture.index.community_of(&doc.identifier).unwrap()));

            let result = Evaluator::CommunityTags(CommunityParams { top_terms: 3 }).evaluate(&fixture.context());

            if unseen {
                fatal_runs += 1;
                assert!(matches!(result, Err(Error::UnseenCommunity { .. })));
            } else {
                check(&result.unwrap(), "community_tags");
            }
        }

        assert!(fatal_runs > 0);
    }

    #[test]
    fn community_missing_from_store_is_an_error() {
        let fixture = Fixture::new();
        let empty_store = MemoryGraphStore::new();

        let ctx = EvaluationContext { store: &empty_store, ..fixture.context() };

        let result = Evaluator::CommunityVocabulary(CommunityParams { top_terms: 3 }).evaluate(&ctx);

        assert!(matches!(result, Err(Error::UnknownCommunity(_))));
    }
}
